//! Lookup settings: search limits, dataset location, contact templates.
//!
//! The process-wide instance is fixed on first use. A host that ships its own
//! TOML installs it with [`init_custom`] before anything calls [`settings`];
//! otherwise the embedded `default_settings.toml` applies.
//!
//! Components take their section by value (`SearchSettings`, `ContactSettings`)
//! so tests can build isolated instances without touching the global one.

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::unit::UnitType;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Placeholder substituted with the name slug in contact templates.
pub const SLUG_PLACEHOLDER: &str = "{slug}";

static ACTIVE: OnceLock<Settings> = OnceLock::new();

/// Validate `toml_content` and make it the process-wide settings.
///
/// Fails with `AlreadyInitialized` once [`settings`] has been read or a
/// custom TOML was installed.
pub fn init_custom(toml_content: &str) -> Result<(), SettingsError> {
    let parsed = parse_settings_toml(toml_content)?;
    ACTIVE
        .set(parsed)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// The process-wide settings, defaulting to the embedded TOML.
pub fn settings() -> &'static Settings {
    ACTIVE.get_or_init(Settings::default)
}

/// The embedded default TOML, for export.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub search: SearchSettings,
    pub dataset: DatasetSettings,
    pub contact: ContactSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub min_query_chars: usize,
    pub max_results: usize,
    pub load_wait_ms: u64,
}

impl SearchSettings {
    pub fn load_wait(&self) -> Duration {
        Duration::from_millis(self.load_wait_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    pub path: String,
    pub context_label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactSettings {
    pub region: String,
    pub county: String,
    pub city: String,
    pub municipality: String,
    pub other: String,
    pub strip_prefixes: Vec<String>,
}

impl ContactSettings {
    /// Address template for a unit type; `None` selects the generic template.
    pub fn template_for(&self, unit_type: Option<UnitType>) -> &str {
        match unit_type {
            Some(UnitType::Region) => &self.region,
            Some(UnitType::County) => &self.county,
            Some(UnitType::City) => &self.city,
            Some(UnitType::Municipality) => &self.municipality,
            None => &self.other,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        // build.rs rejects an embedded default that would fail here.
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_template {
        ($section:ident . $field:ident) => {
            if !s.$section.$field.contains(SLUG_PLACEHOLDER) {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: format!("must contain {SLUG_PLACEHOLDER}"),
                });
            }
        };
    }

    check_positive!(search.max_results);
    check_positive!(search.load_wait_ms);

    if s.dataset.path.trim().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "dataset.path".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    check_template!(contact.region);
    check_template!(contact.county);
    check_template!(contact.city);
    check_template!(contact.municipality);
    check_template!(contact.other);

    if let Some(i) = s
        .contact
        .strip_prefixes
        .iter()
        .position(|p| p.trim().is_empty())
    {
        return Err(SettingsError::InvalidValue {
            field: format!("contact.strip_prefixes[{i}]"),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM: &str = r#"
[search]
min_query_chars = 3
max_results = 10
load_wait_ms = 500

[dataset]
path = "data/jst.json"
context_label = "region:"

[contact]
region = "biuro@{slug}.example.pl"
county = "starostwo@{slug}.pl"
city = "urzad@um.{slug}.pl"
municipality = "ug@{slug}.pl"
other = "kontakt@{slug}.pl"
strip_prefixes = ["Powiat"]
"#;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.search.min_query_chars, 2);
        assert_eq!(s.search.max_results, 20);
        assert_eq!(s.search.load_wait(), Duration::from_secs(10));
        assert_eq!(s.dataset.context_label, "woj.");
        assert_eq!(s.contact.region, "kontakt@{slug}.uw.gov.pl");
        assert_eq!(s.contact.strip_prefixes[0], "Województwo");
        // "Powiat m." has to be tried before the bare "Powiat".
        let marker = s
            .contact
            .strip_prefixes
            .iter()
            .position(|p| p == "Powiat m.")
            .unwrap();
        let bare = s
            .contact
            .strip_prefixes
            .iter()
            .position(|p| p == "Powiat")
            .unwrap();
        assert!(marker < bare);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let s = parse_settings_toml(CUSTOM).unwrap();
        assert_eq!(s.search.min_query_chars, 3);
        assert_eq!(s.search.max_results, 10);
        assert_eq!(s.dataset.path, "data/jst.json");
        assert_eq!(
            s.contact.template_for(Some(UnitType::Region)),
            "biuro@{slug}.example.pl"
        );
        assert_eq!(s.contact.template_for(None), "kontakt@{slug}.pl");
    }

    #[test]
    fn custom_rejected_after_first_read() {
        assert_eq!(settings().search.max_results, 20);
        let err = init_custom(CUSTOM).unwrap_err();
        assert!(matches!(err, SettingsError::AlreadyInitialized));
        assert_eq!(settings().search.max_results, 20);
        // Invalid content is reported as such, not as a second install.
        let err = init_custom("[search").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_zero_max_results() {
        let toml = CUSTOM.replace("max_results = 10", "max_results = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("search.max_results"));
    }

    #[test]
    fn error_zero_load_wait() {
        let toml = CUSTOM.replace("load_wait_ms = 500", "load_wait_ms = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("search.load_wait_ms"));
    }

    #[test]
    fn error_template_without_slug() {
        let toml = CUSTOM.replace("ug@{slug}.pl", "ug@gmina.pl");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("contact.municipality"));
    }

    #[test]
    fn error_blank_prefix() {
        let toml = CUSTOM.replace(r#"["Powiat"]"#, r#"["Powiat", " "]"#);
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("contact.strip_prefixes[1]"));
    }

    #[test]
    fn error_blank_dataset_path() {
        let toml = CUSTOM.replace(r#"path = "data/jst.json""#, r#"path = """#);
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("dataset.path"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[search]
min_query_chars = 2
max_results = 20
load_wait_ms = 10000
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
