use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use teryt_core::loader::{DatasetSource, JsonFileSource};
use teryt_core::settings::settings;
use teryt_core::{LoadStats, ReferenceLoader, TerritorialUnit, UnitMatcher, UnitType};

use crate::submission::{FoundItemReport, MunicipalityInfo};

/// One loader and the matcher over it, shared by the whole form.
pub struct TerytService {
    matcher: UnitMatcher,
}

impl TerytService {
    pub fn new(source: impl DatasetSource + 'static) -> Self {
        let loader = Arc::new(ReferenceLoader::new(source));
        Self {
            matcher: UnitMatcher::new(loader),
        }
    }

    /// Service over a dataset file.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileSource::new(path))
    }

    /// Service over the dataset file named in the settings.
    pub fn from_settings() -> Self {
        Self::open(&settings().dataset.path)
    }

    /// Begin loading in the background. Returns `false` if already started.
    ///
    /// Optional: the first `search` starts the load too.
    pub fn start(&self) -> bool {
        self.matcher.loader().spawn_load()
    }

    pub fn is_ready(&self) -> bool {
        self.matcher.loader().is_loaded()
    }

    pub fn stats(&self) -> Option<LoadStats> {
        self.matcher.loader().stats()
    }

    pub fn matcher(&self) -> &UnitMatcher {
        &self.matcher
    }

    pub async fn search(&self, query: &str, type_filter: Option<UnitType>) -> Vec<TerritorialUnit> {
        self.matcher.search(query, type_filter).await
    }

    pub fn get_by_type(&self, unit_type: UnitType) -> Vec<TerritorialUnit> {
        self.matcher.get_by_type(unit_type)
    }

    pub fn derive_contact_address(&self, unit: &TerritorialUnit) -> String {
        self.matcher.derive_contact_address(unit)
    }

    /// Municipality block for a picked unit, with its contact address
    /// derived unless the operator supplied one.
    pub fn municipality_info(
        &self,
        unit: &TerritorialUnit,
        contact_override: Option<&str>,
    ) -> MunicipalityInfo {
        let email = match contact_override.map(str::trim) {
            Some(e) if !e.is_empty() => {
                debug!(unit = %unit.name, "contact address entered by operator");
                e.to_string()
            }
            _ => self.derive_contact_address(unit),
        };
        MunicipalityInfo::from_unit(unit, email)
    }

    /// Start a report for a picked unit; form sections are added by the caller.
    pub fn start_report(
        &self,
        unit: &TerritorialUnit,
        contact_override: Option<&str>,
    ) -> FoundItemReport {
        FoundItemReport::new(self.municipality_info(unit, contact_override))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use teryt_core::loader::JsonSource;
    use teryt_core::DatasetOrigin;

    const DATASET: &str = r#"[
        {"id": "1418052", "name": "Lesznowola", "type": "gmina", "voivodeship": "mazowieckie",
         "email": "sekretariat@lesznowola.pl, gmina@lesznowola.pl"},
        {"id": "1418000", "name": "Powiat piaseczyński", "type": "powiat", "voivodeship": "mazowieckie"},
        {"id": "1400000", "name": "Województwo mazowieckie", "type": "wojewodztwo"}
    ]"#;

    #[tokio::test]
    async fn test_open_file_and_search() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();
        let service = TerytService::open(file.path());
        assert!(service.start());
        assert!(!service.start());

        let hits = service.search("piasecz", None).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].full_name, "Powiat piaseczyński (woj. mazowieckie)");
        assert!(service.is_ready());
        assert_eq!(service.stats().unwrap().origin, DatasetOrigin::Primary);
    }

    #[tokio::test]
    async fn test_missing_file_uses_fallback() {
        let service = TerytService::open("/nonexistent/territorial-units.json");
        let hits = service.search("Warszawa", Some(UnitType::City)).await;
        assert_eq!(hits[0].name, "Warszawa");
        assert_eq!(service.stats().unwrap().origin, DatasetOrigin::Fallback);
    }

    #[tokio::test]
    async fn test_report_uses_recorded_or_overridden_address() {
        let service = TerytService::new(JsonSource::new(DATASET));
        let gmina = service.search("lesznow", None).await.remove(0);

        let derived = service.start_report(&gmina, None);
        assert_eq!(derived.municipality.contact_email, "sekretariat@lesznowola.pl");
        assert_eq!(derived.municipality.unit_type, UnitType::Municipality);

        let blank = service.municipality_info(&gmina, Some("  "));
        assert_eq!(blank.contact_email, "sekretariat@lesznowola.pl");

        let typed = service.municipality_info(&gmina, Some("ug@lesznowola.pl"));
        assert_eq!(typed.contact_email, "ug@lesznowola.pl");
    }

    #[tokio::test]
    async fn test_get_by_type_after_search() {
        let service = TerytService::new(JsonSource::new(DATASET));
        assert!(service.get_by_type(UnitType::Region).is_empty());
        service.search("mazow", None).await;
        let regions = service.get_by_type(UnitType::Region);
        assert_eq!(regions.len(), 1);
        assert_eq!(
            service.derive_contact_address(&regions[0]),
            "kontakt@mazowieckie.uw.gov.pl"
        );
    }
}
