//! Territorial-unit lookup for found-item reports.
//!
//! Wraps the lookup core in a [`TerytService`] and defines the seam to the
//! report store ([`ReportSubmitter`]).

mod service;
pub mod submission;
pub mod trace_init;

pub use service::TerytService;
pub use submission::{
    FoundItemReport, MunicipalityInfo, ReportSubmitter, StoredReport, SubmitError,
};
pub use teryt_core::{
    collation, contact, loader, matcher, settings, unicode, unit, DatasetOrigin, LoadState,
    LoadStats, ReferenceLoader, TerritorialUnit, UnitMatcher, UnitType,
};
