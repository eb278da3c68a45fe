//! Report-submission seam.
//!
//! The lookup core only fills the municipality block of a found-item report.
//! The rest of the form travels as opaque fields, and whatever the submitter
//! reports back is passed through without interpretation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use teryt_core::{TerritorialUnit, UnitType};

/// The municipality block of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub contact_email: String,
}

impl MunicipalityInfo {
    pub fn from_unit(unit: &TerritorialUnit, contact_email: impl Into<String>) -> Self {
        Self {
            name: unit.name.clone(),
            unit_type: unit.unit_type,
            contact_email: contact_email.into(),
        }
    }

    /// Replace the derived address with one typed by the operator.
    pub fn with_contact_email(mut self, contact_email: impl Into<String>) -> Self {
        self.contact_email = contact_email.into();
        self
    }
}

/// A fully assembled report, ready for submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundItemReport {
    pub municipality: MunicipalityInfo,
    /// Item, pickup and any other form sections, passed through as-is.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl FoundItemReport {
    pub fn new(municipality: MunicipalityInfo) -> Self {
        Self {
            municipality,
            fields: Map::new(),
        }
    }

    /// Add a form section. A `municipality` key is ignored.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if key != "municipality" {
            self.fields.insert(key, value);
        }
        self
    }
}

/// What the store returns for an accepted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),
    #[error("report rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Sends reports to whatever stores them.
#[async_trait]
pub trait ReportSubmitter: Send + Sync {
    async fn submit(&self, report: &FoundItemReport) -> Result<StoredReport, SubmitError>;
}
