pub mod config_ops;
pub mod search_ops;

use std::io;

use teryt_core::settings::SettingsError;
use teryt_core::UnitType;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown unit type {0:?} (expected wojewodztwo, powiat, gmina or miasto)")]
    UnknownType(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// clap value parser for `--type`.
pub fn parse_unit_type(s: &str) -> Result<UnitType, CommandError> {
    UnitType::from_source_code(s).ok_or_else(|| CommandError::UnknownType(s.to_string()))
}

pub(crate) fn read_file(path: &str) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|e| CommandError::Io {
        path: path.to_string(),
        source: e,
    })
}

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}
pub(crate) use die;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_type() {
        assert_eq!(parse_unit_type("powiat").unwrap(), UnitType::County);
        assert_eq!(parse_unit_type("MNP").unwrap(), UnitType::City);
        let err = parse_unit_type("dzielnica").unwrap_err();
        assert!(err.to_string().contains("dzielnica"));
    }
}
