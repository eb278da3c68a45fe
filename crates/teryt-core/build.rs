const SETTINGS_PATH: &str = "src/default_settings.toml";
const SECTIONS: &[&str] = &["search", "dataset", "contact"];
const TEMPLATES: &[&str] = &["region", "county", "city", "municipality", "other"];

fn main() {
    println!("cargo:rerun-if-changed={SETTINGS_PATH}");
    check_default_settings(include_str!("src/default_settings.toml"));
}

/// Reject an embedded default that `settings()` could not load.
fn check_default_settings(content: &str) {
    let table: toml::Table = content
        .parse()
        .unwrap_or_else(|e| panic!("{SETTINGS_PATH} contains invalid TOML: {e}"));

    for section in SECTIONS {
        if !table.get(*section).is_some_and(toml::Value::is_table) {
            panic!("{SETTINGS_PATH} is missing the [{section}] table");
        }
    }

    let contact = &table["contact"];
    for key in TEMPLATES {
        match contact.get(*key).and_then(toml::Value::as_str) {
            Some(t) if t.contains("{slug}") => {}
            _ => panic!("{SETTINGS_PATH}: contact.{key} must be a template containing {{slug}}"),
        }
    }
}
