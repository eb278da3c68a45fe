//! Reference Loader: builds the in-memory unit collection exactly once.
//!
//! State machine: `Idle → Loading → Loaded`. The primary dataset comes from a
//! [`DatasetSource`]; if it cannot be read or parsed, or yields no usable
//! units, the collection is built from the hardcoded fallback list instead.
//! Both paths end in `Loaded`; callers never see a load error.
//!
//! The collection is written once into a `OnceLock` before the state flips
//! to `Loaded`, so readers that observe `Loaded` always see a complete
//! collection without further locking.

mod fallback;
mod source;

pub use fallback::fallback_units;
pub use source::{parse_records, DatasetSource, JsonFileSource, JsonSource};

use std::io;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::unicode::normalize;
use crate::unit::{TerritorialUnit, UnitType};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset has no usable units ({skipped} records skipped)")]
    Empty { skipped: usize },

    #[error("dataset source error: {0}")]
    Source(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetOrigin {
    Primary,
    Fallback,
}

/// Pre-normalized text of one unit.
#[derive(Debug, Clone)]
pub(crate) struct SearchKey {
    pub name: String,
    pub full_name: String,
}

/// The loaded units with their search keys.
#[derive(Debug)]
pub struct UnitCollection {
    units: Vec<TerritorialUnit>,
    keys: Vec<SearchKey>,
    origin: DatasetOrigin,
    skipped: usize,
}

impl UnitCollection {
    pub fn new(units: Vec<TerritorialUnit>, origin: DatasetOrigin, skipped: usize) -> Self {
        let keys = units
            .iter()
            .map(|u| SearchKey {
                name: normalize(&u.name),
                full_name: normalize(&u.full_name),
            })
            .collect();
        Self {
            units,
            keys,
            origin,
            skipped,
        }
    }

    pub fn units(&self) -> &[TerritorialUnit] {
        &self.units
    }

    pub fn origin(&self) -> DatasetOrigin {
        self.origin
    }

    pub(crate) fn indexed(&self) -> impl Iterator<Item = (&TerritorialUnit, &SearchKey)> {
        self.units.iter().zip(&self.keys)
    }

    pub fn stats(&self) -> LoadStats {
        let count = |t: UnitType| self.units.iter().filter(|u| u.unit_type == t).count();
        LoadStats {
            origin: self.origin,
            total: self.units.len(),
            regions: count(UnitType::Region),
            counties: count(UnitType::County),
            municipalities: count(UnitType::Municipality),
            cities: count(UnitType::City),
            skipped: self.skipped,
        }
    }
}

/// Summary of a finished load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub origin: DatasetOrigin,
    pub total: usize,
    pub regions: usize,
    pub counties: usize,
    pub municipalities: usize,
    pub cities: usize,
    /// Primary-dataset records without a known type or a name.
    pub skipped: usize,
}

pub struct ReferenceLoader {
    source: Box<dyn DatasetSource>,
    context_label: String,
    state: watch::Sender<LoadState>,
    collection: OnceLock<UnitCollection>,
}

/// Puts the state back to `Idle` if a load is abandoned halfway, so a later
/// trigger can start over instead of waiting on a load that never finishes.
struct ResetOnDrop<'a> {
    state: &'a watch::Sender<LoadState>,
    armed: bool,
}

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_replace(LoadState::Idle);
        }
    }
}

impl ReferenceLoader {
    /// Loader using the configured context label for display names.
    pub fn new(source: impl DatasetSource + 'static) -> Self {
        Self::with_context_label(source, &crate::settings::settings().dataset.context_label)
    }

    pub fn with_context_label(source: impl DatasetSource + 'static, context_label: &str) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            source: Box::new(source),
            context_label: context_label.to_string(),
            state,
            collection: OnceLock::new(),
        }
    }

    pub fn state(&self) -> LoadState {
        *self.state.borrow()
    }

    pub fn is_loaded(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// The loaded collection, or `None` before the load finishes.
    pub fn collection(&self) -> Option<&UnitCollection> {
        if self.is_loaded() {
            self.collection.get()
        } else {
            None
        }
    }

    /// Loaded units; empty before the load finishes.
    pub fn units(&self) -> &[TerritorialUnit] {
        self.collection().map(|c| c.units()).unwrap_or(&[])
    }

    pub fn stats(&self) -> Option<LoadStats> {
        self.collection().map(UnitCollection::stats)
    }

    /// Load the dataset, or wait for the load already in progress.
    ///
    /// Only the first effective call reads the source; every later or
    /// concurrent call returns once the collection is in place.
    pub async fn load(&self) {
        loop {
            if self.try_begin() {
                self.run_load().await;
                return;
            }
            let mut rx = self.state.subscribe();
            let _ = rx.wait_for(|s| *s != LoadState::Loading).await;
            if self.is_loaded() {
                return;
            }
            // The loading call was dropped before finishing; take over.
        }
    }

    /// Start `load` on a background task if nothing has triggered it yet.
    ///
    /// Returns `true` if this call started a task. Must be called from
    /// within a tokio runtime.
    pub fn spawn_load(self: &Arc<Self>) -> bool {
        // Claim the load before spawning so a second call sees `Loading`.
        if !self.try_begin() {
            return false;
        }
        let this = Arc::clone(self);
        tokio::spawn(async move { this.run_load().await });
        true
    }

    /// Wait until the collection is loaded, at most `limit`.
    ///
    /// Returns whether loading finished in time. Does not trigger a load.
    pub async fn wait_loaded(&self, limit: Duration) -> bool {
        let mut rx = self.state.subscribe();
        let finished = tokio::time::timeout(limit, rx.wait_for(|s| *s == LoadState::Loaded)).await;
        matches!(finished, Ok(Ok(_)))
    }

    /// Atomically move `Idle → Loading`. Returns `false` if already started.
    fn try_begin(&self) -> bool {
        self.state.send_if_modified(|s| {
            if *s == LoadState::Idle {
                *s = LoadState::Loading;
                true
            } else {
                false
            }
        })
    }

    async fn run_load(&self) {
        let mut reset = ResetOnDrop {
            state: &self.state,
            armed: true,
        };
        debug!(source = %self.source.describe(), "loading reference dataset");

        let collection = match self.read_primary().await {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    source = %self.source.describe(),
                    error = %e,
                    "reference dataset unavailable, using fallback list"
                );
                UnitCollection::new(
                    fallback_units(&self.context_label),
                    DatasetOrigin::Fallback,
                    0,
                )
            }
        };
        let stats = collection.stats();

        // `try_begin` admits a single writer, so the cell is still empty here.
        let _ = self.collection.set(collection);
        reset.armed = false;
        self.state.send_replace(LoadState::Loaded);

        info!(
            origin = ?stats.origin,
            total = stats.total,
            regions = stats.regions,
            counties = stats.counties,
            cities = stats.cities,
            municipalities = stats.municipalities,
            skipped = stats.skipped,
            "territorial units loaded"
        );
    }

    async fn read_primary(&self) -> Result<UnitCollection, LoadError> {
        let records = self.source.fetch().await?;
        let total = records.len();

        let units: Vec<TerritorialUnit> = records
            .into_iter()
            .filter_map(
                |r| match TerritorialUnit::from_record(r, &self.context_label) {
                    Ok(u) => Some(u),
                    Err(reason) => {
                        debug!(%reason, "skipping dataset record");
                        None
                    }
                },
            )
            .collect();

        let skipped = total - units.len();
        if units.is_empty() {
            return Err(LoadError::Empty { skipped });
        }
        if skipped > 0 {
            warn!(skipped, total, "dataset records skipped");
        }
        Ok(UnitCollection::new(units, DatasetOrigin::Primary, skipped))
    }
}
