use teryt_core::settings;

use super::{die, read_file, CommandError};

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(read_file(file), "Error: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: search.min_query_chars={}, search.max_results={}, search.load_wait_ms={}, contact.strip_prefixes={}",
        s.search.min_query_chars,
        s.search.max_results,
        s.search.load_wait_ms,
        s.contact.strip_prefixes.len()
    );
}

/// Install a custom settings file before anything reads the global settings.
pub fn apply_settings_file(file: &str) -> Result<(), CommandError> {
    let content = read_file(file)?;
    settings::init_custom(&content)?;
    Ok(())
}
