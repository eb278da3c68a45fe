use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use teryt_core::contact::first_address;
use teryt_core::loader::JsonFileSource;
use teryt_core::settings::settings;
use teryt_core::unicode::normalize;
use teryt_core::{ReferenceLoader, TerritorialUnit, UnitMatcher, UnitType};

use super::die;

/// Load the dataset at `path` (or the configured one) completely.
pub async fn open_matcher(path: Option<&str>) -> UnitMatcher {
    let path = path.unwrap_or(&settings().dataset.path);
    let loader = Arc::new(ReferenceLoader::new(JsonFileSource::new(path)));
    loader.load().await;
    debug!(dataset = path, stats = ?loader.stats(), "dataset opened");
    UnitMatcher::new(loader)
}

pub async fn search(dataset: Option<&str>, query: &str, unit_type: Option<UnitType>, json: bool) {
    let matcher = open_matcher(dataset).await;
    let hits = matcher.search(query, unit_type).await;
    if json {
        println!("{}", die!(serde_json::to_string_pretty(&hits), "Error: {}"));
        return;
    }
    if hits.is_empty() {
        eprintln!("No matches for \"{query}\"");
        return;
    }
    print!("{}", format_table(&hits));
}

pub async fn list(dataset: Option<&str>, unit_type: UnitType, json: bool) {
    let matcher = open_matcher(dataset).await;
    let units = matcher.get_by_type(unit_type);
    if json {
        println!("{}", die!(serde_json::to_string_pretty(&units), "Error: {}"));
        return;
    }
    print!("{}", format_table(&units));
    eprintln!("{} {unit_type} units", units.len());
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactOutput<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    unit_type: Option<UnitType>,
    contact_email: String,
    /// Whether the address came from the dataset rather than the template.
    recorded: bool,
}

/// Contact address for a unit picked by exact name; falls back to a
/// template guess when no loaded unit carries that name.
pub async fn contact(dataset: Option<&str>, name: &str, unit_type: Option<UnitType>, json: bool) {
    let matcher = open_matcher(dataset).await;
    let unit = find_by_name(matcher.loader().units(), name, unit_type);

    let output = match unit {
        Some(u) => ContactOutput {
            name: &u.name,
            unit_type: Some(u.unit_type),
            contact_email: matcher.derive_contact_address(u),
            recorded: has_recorded_address(u),
        },
        None => ContactOutput {
            name,
            unit_type,
            contact_email: matcher.suggest_address(name, unit_type),
            recorded: false,
        },
    };

    if json {
        println!("{}", die!(serde_json::to_string_pretty(&output), "Error: {}"));
    } else {
        let source = if output.recorded { "dataset" } else { "derived" };
        println!("{}\t{}", output.contact_email, source);
    }
}

pub async fn stats(dataset: Option<&str>, json: bool) {
    let matcher = open_matcher(dataset).await;
    let Some(stats) = matcher.loader().stats() else {
        eprintln!("Error: dataset not loaded");
        std::process::exit(1);
    };
    if json {
        println!("{}", die!(serde_json::to_string_pretty(&stats), "Error: {}"));
        return;
    }
    println!("origin:         {:?}", stats.origin);
    println!("total:          {}", stats.total);
    println!("regions:        {}", stats.regions);
    println!("counties:       {}", stats.counties);
    println!("cities:         {}", stats.cities);
    println!("municipalities: {}", stats.municipalities);
    println!("skipped:        {}", stats.skipped);
}

/// Whether the contact address comes from the unit's own email field.
fn has_recorded_address(unit: &TerritorialUnit) -> bool {
    unit.email.as_deref().and_then(first_address).is_some()
}

/// Exact name match, ignoring case and diacritics.
fn find_by_name<'a>(
    units: &'a [TerritorialUnit],
    name: &str,
    unit_type: Option<UnitType>,
) -> Option<&'a TerritorialUnit> {
    let wanted = normalize(name.trim());
    units.iter().find(|u| {
        unit_type.map_or(true, |t| u.unit_type == t) && normalize(&u.name) == wanted
    })
}

/// Two-column table: display name padded to the widest entry, then type.
pub fn format_table(units: &[TerritorialUnit]) -> String {
    let width = units
        .iter()
        .map(|u| UnicodeWidthStr::width(u.full_name.as_str()))
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for u in units {
        let pad = width - UnicodeWidthStr::width(u.full_name.as_str());
        out.push_str(&u.full_name);
        out.push_str(&" ".repeat(pad + 2));
        out.push_str(u.unit_type.source_label());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, t: UnitType, parent: Option<&str>) -> TerritorialUnit {
        TerritorialUnit::new(name, t, parent, "woj.")
    }

    #[test]
    fn test_format_table_aligns_by_display_width() {
        let units = vec![
            unit("Łódź", UnitType::City, Some("łódzkie")),
            unit("Gmina Raszyn", UnitType::Municipality, Some("mazowieckie")),
        ];
        let table = format_table(&units);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        // Both type columns start at the same display column.
        let col = |l: &str| {
            let name_end = l.rfind("  ").unwrap();
            UnicodeWidthStr::width(&l[..name_end])
        };
        assert_eq!(col(lines[0]), col(lines[1]));
        assert!(lines[0].ends_with("miasto"));
        assert!(lines[1].ends_with("gmina"));
    }

    #[test]
    fn test_format_table_empty() {
        assert_eq!(format_table(&[]), "");
    }

    #[test]
    fn test_recorded_address_needs_usable_field() {
        let mut u = unit("Gmina Raszyn", UnitType::Municipality, Some("mazowieckie"));
        assert!(!has_recorded_address(&u));
        u.email = Some("  ".into());
        assert!(!has_recorded_address(&u));
        u.email = Some("ug@raszyn.pl; sekretariat@raszyn.pl".into());
        assert!(has_recorded_address(&u));
    }

    #[test]
    fn test_find_by_name() {
        let units = vec![
            unit("Powiat bielski", UnitType::County, Some("śląskie")),
            unit("Powiat bielski", UnitType::County, Some("podlaskie")),
            unit("Bielsko-Biała", UnitType::City, Some("śląskie")),
        ];
        let found = find_by_name(&units, " bielsko-biala ", None).unwrap();
        assert_eq!(found.name, "Bielsko-Biała");
        assert!(find_by_name(&units, "Bielsko-Biała", Some(UnitType::County)).is_none());
        let first = find_by_name(&units, "powiat bielski", None).unwrap();
        assert_eq!(first.parent_name.as_deref(), Some("śląskie"));
    }
}
