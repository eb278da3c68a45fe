//! Contact-address derivation for a selected unit.
//!
//! A recorded address wins. Otherwise the address is guessed from the unit
//! name with a per-type template; the result is a heuristic, not a lookup
//! in any official directory.

use crate::settings::{settings, ContactSettings, SLUG_PLACEHOLDER};
use crate::unicode::slugify;
use crate::unit::{TerritorialUnit, UnitType};

/// First segment of a raw contact field holding one or more addresses
/// separated by `;` or `,`, trimmed but otherwise taken as is (it may be
/// empty). `None` only when the whole field is blank.
pub fn first_address(raw: &str) -> Option<&str> {
    if raw.trim().is_empty() {
        return None;
    }
    raw.split([';', ',']).next().map(str::trim)
}

/// Remove at most one leading type word (`Gmina `, `Powiat m. `, ...).
///
/// Prefixes are tried in order and compared case-insensitively; a prefix
/// only matches when followed by whitespace, so `Gminów` keeps its name.
pub fn strip_type_prefix<'a>(name: &'a str, prefixes: &[String]) -> &'a str {
    let name = name.trim_start();
    for prefix in prefixes {
        if let Some(rest) = strip_prefix_ci(name, prefix.trim()) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    name
}

/// Case-insensitive `str::strip_prefix`, char by char.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = s.char_indices();
    for p in prefix.chars() {
        let (_, c) = rest.next()?;
        if !c.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }
    let offset = rest.next().map_or(s.len(), |(i, _)| i);
    Some(&s[offset..])
}

/// Build an address for `name` from the template of `unit_type`.
pub fn suggest_address_with(
    contact: &ContactSettings,
    name: &str,
    unit_type: Option<UnitType>,
) -> String {
    let slug = slugify(strip_type_prefix(name, &contact.strip_prefixes));
    contact
        .template_for(unit_type)
        .replace(SLUG_PLACEHOLDER, &slug)
}

pub fn derive_with(contact: &ContactSettings, unit: &TerritorialUnit) -> String {
    if let Some(addr) = unit.email.as_deref().and_then(first_address) {
        return addr.to_string();
    }
    suggest_address_with(contact, &unit.name, Some(unit.unit_type))
}

/// Contact address for a unit, using the global settings.
pub fn derive_contact_address(unit: &TerritorialUnit) -> String {
    derive_with(&settings().contact, unit)
}

/// Address guess for a free-form name; `None` uses the generic template.
pub fn suggest_address(name: &str, unit_type: Option<UnitType>) -> String {
    suggest_address_with(&settings().contact, name, unit_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn contact() -> ContactSettings {
        Settings::default().contact
    }

    fn unit(name: &str, t: UnitType, email: Option<&str>) -> TerritorialUnit {
        let mut u = TerritorialUnit::new(name, t, Some("mazowieckie"), "woj.");
        u.email = email.map(str::to_string);
        u
    }

    #[test]
    fn test_recorded_email_first_segment() {
        let u = unit("Gmina Raszyn", UnitType::Municipality, Some("a@x.pl;b@y.pl"));
        assert_eq!(derive_with(&contact(), &u), "a@x.pl");
        let u = unit("Gmina Raszyn", UnitType::Municipality, Some("  a@x.pl , b@y.pl"));
        assert_eq!(derive_with(&contact(), &u), "a@x.pl");
    }

    #[test]
    fn test_recorded_email_empty_first_segment_kept() {
        let u = unit("Gmina Raszyn", UnitType::Municipality, Some(";b@y.pl"));
        assert_eq!(derive_with(&contact(), &u), "");
        let u = unit("Gmina Raszyn", UnitType::Municipality, Some(" ; "));
        assert_eq!(derive_with(&contact(), &u), "");
        assert_eq!(first_address(" , a@x.pl"), Some(""));
    }

    #[test]
    fn test_blank_email_falls_through() {
        let u = unit("Gmina Raszyn", UnitType::Municipality, Some("   "));
        assert_eq!(derive_with(&contact(), &u), "ug@raszyn.pl");
        let u = unit("Gmina Raszyn", UnitType::Municipality, Some(""));
        assert_eq!(derive_with(&contact(), &u), "ug@raszyn.pl");
        assert_eq!(first_address("\t"), None);
    }

    #[test]
    fn test_templates_per_type() {
        let c = contact();
        let region = unit("Region examplia", UnitType::Region, None);
        assert_eq!(derive_with(&c, &region), "kontakt@examplia.uw.gov.pl");
        let county = unit("Powiat piaseczyński", UnitType::County, None);
        assert_eq!(derive_with(&c, &county), "starostwo@piaseczynski.pl");
        let city = unit("Zielona Góra", UnitType::City, None);
        assert_eq!(derive_with(&c, &city), "urzad@um.zielona-gora.pl");
        let gmina = unit("Gmina Konstancin-Jeziorna", UnitType::Municipality, None);
        assert_eq!(derive_with(&c, &gmina), "ug@konstancin-jeziorna.pl");
    }

    #[test]
    fn test_unknown_type_uses_generic_template() {
        assert_eq!(
            suggest_address_with(&contact(), "Dzielnica Mokotów", None),
            "kontakt@dzielnica-mokotow.pl"
        );
    }

    #[test]
    fn test_strip_city_rights_marker() {
        let p = contact().strip_prefixes;
        assert_eq!(strip_type_prefix("Powiat m. Nowy Sącz", &p), "Nowy Sącz");
        assert_eq!(strip_type_prefix("POWIAT  bielski", &p), "bielski");
        assert_eq!(strip_type_prefix("Województwo śląskie", &p), "śląskie");
        assert_eq!(strip_type_prefix("County Cork", &p), "Cork");
    }

    #[test]
    fn test_strip_at_most_one_prefix() {
        let p = contact().strip_prefixes;
        assert_eq!(strip_type_prefix("Gmina Miasto Test", &p), "Miasto Test");
    }

    #[test]
    fn test_prefix_needs_word_boundary() {
        let p = contact().strip_prefixes;
        assert_eq!(strip_type_prefix("Gminów", &p), "Gminów");
        assert_eq!(strip_type_prefix("Powiatowo Dolne", &p), "Powiatowo Dolne");
        assert_eq!(strip_type_prefix("Gmina", &p), "Gmina");
    }

    #[test]
    fn test_empty_slug_is_accepted() {
        let u = unit("Gmina ", UnitType::Municipality, None);
        assert_eq!(derive_with(&contact(), &u), "ug@.pl");
        assert_eq!(
            suggest_address_with(&contact(), "Gmina ???", Some(UnitType::Municipality)),
            "ug@.pl"
        );
    }

    #[test]
    fn test_deterministic() {
        let u = unit("Powiat wołomiński", UnitType::County, None);
        assert_eq!(derive_with(&contact(), &u), derive_with(&contact(), &u));
    }

    #[test]
    fn test_global_settings() {
        let u = unit("Kraków", UnitType::City, None);
        assert_eq!(derive_contact_address(&u), "urzad@um.krakow.pl");
        assert_eq!(suggest_address("Kraków", None), "kontakt@krakow.pl");
    }
}
