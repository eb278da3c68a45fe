use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::LoadError;
use crate::unit::RawUnitRecord;

/// A pluggable origin of the reference dataset.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Read and parse the whole dataset.
    async fn fetch(&self) -> Result<Vec<RawUnitRecord>, LoadError>;

    /// Short human-readable description for diagnostics.
    fn describe(&self) -> String;
}

/// Parse the dataset JSON: a top-level array of unit records.
pub fn parse_records(json: &[u8]) -> Result<Vec<RawUnitRecord>, LoadError> {
    Ok(serde_json::from_slice(json)?)
}

/// The pre-generated static dataset file.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<RawUnitRecord>, LoadError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| LoadError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        parse_records(&bytes)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Dataset JSON held in memory, e.g. embedded with `include_str!`.
pub struct JsonSource {
    json: String,
}

impl JsonSource {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

#[async_trait]
impl DatasetSource for JsonSource {
    async fn fetch(&self) -> Result<Vec<RawUnitRecord>, LoadError> {
        parse_records(self.json.as_bytes())
    }

    fn describe(&self) -> String {
        format!("in-memory JSON ({} bytes)", self.json.len())
    }
}
