//! Unit Matcher: type-ahead search over the loaded units.
//!
//! A unit matches when the normalized query occurs in its normalized name or
//! display name. Results whose name starts with the query come first; each
//! group is then ordered by Polish collation on the name.


use std::sync::Arc;

use tracing::{debug, debug_span, warn};

use crate::collation;
use crate::contact;
use crate::loader::{LoadState, ReferenceLoader, UnitCollection};
use crate::settings::{settings, ContactSettings, SearchSettings};
use crate::unicode::normalize;
use crate::unit::{TerritorialUnit, UnitType};

pub struct UnitMatcher {
    loader: Arc<ReferenceLoader>,
    search: SearchSettings,
    contact: ContactSettings,
}

impl UnitMatcher {
    /// Matcher using the global settings.
    pub fn new(loader: Arc<ReferenceLoader>) -> Self {
        let s = settings();
        Self::with_settings(loader, s.search.clone(), s.contact.clone())
    }

    pub fn with_settings(
        loader: Arc<ReferenceLoader>,
        search: SearchSettings,
        contact: ContactSettings,
    ) -> Self {
        Self {
            loader,
            search,
            contact,
        }
    }

    pub fn loader(&self) -> &Arc<ReferenceLoader> {
        &self.loader
    }

    /// Ranked matches for `query`, at most `max_results` of them.
    ///
    /// Queries shorter than `min_query_chars` return nothing without touching
    /// the loader. Otherwise a load is started if none has been, and the call
    /// waits for it up to `load_wait_ms`; after that it searches whatever is
    /// loaded, which may be nothing.
    pub async fn search(&self, query: &str, type_filter: Option<UnitType>) -> Vec<TerritorialUnit> {
        let needle = normalize(query);
        if needle.chars().count() < self.search.min_query_chars {
            return Vec::new();
        }

        self.ensure_loaded().await;

        match self.loader.collection() {
            Some(collection) => {
                rank_matches(collection, &needle, type_filter, self.search.max_results)
            }
            None => Vec::new(),
        }
    }

    /// Every loaded unit of `unit_type`, in collection order.
    ///
    /// Does not wait; before the load finishes the result is empty.
    pub fn get_by_type(&self, unit_type: UnitType) -> Vec<TerritorialUnit> {
        self.loader
            .units()
            .iter()
            .filter(|u| u.unit_type == unit_type)
            .cloned()
            .collect()
    }

    pub fn derive_contact_address(&self, unit: &TerritorialUnit) -> String {
        contact::derive_with(&self.contact, unit)
    }

    pub fn suggest_address(&self, name: &str, unit_type: Option<UnitType>) -> String {
        contact::suggest_address_with(&self.contact, name, unit_type)
    }

    async fn ensure_loaded(&self) {
        if self.loader.state() == LoadState::Loaded {
            return;
        }
        self.loader.spawn_load();
        let limit = self.search.load_wait();
        if !self.loader.wait_loaded(limit).await {
            warn!(
                wait_ms = self.search.load_wait_ms,
                "reference dataset still loading, searching what is available"
            );
        }
    }
}

/// Filter and rank one collection. `needle` must already be normalized.
pub fn rank_matches(
    collection: &UnitCollection,
    needle: &str,
    type_filter: Option<UnitType>,
    max_results: usize,
) -> Vec<TerritorialUnit> {
    let _span = debug_span!("rank_matches", needle, ?type_filter, max_results).entered();

    let mut hits: Vec<(bool, &TerritorialUnit)> = collection
        .indexed()
        .filter(|(u, _)| type_filter.map_or(true, |t| u.unit_type == t))
        .filter(|(_, key)| key.name.contains(needle) || key.full_name.contains(needle))
        .map(|(u, key)| (key.name.starts_with(needle), u))
        .collect();

    // Prefix matches first (`true` before `false`), then Polish name order.
    hits.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| collation::compare(&a.1.name, &b.1.name))
    });
    debug!(matched = hits.len(), "search matched");

    hits.into_iter()
        .take(max_results)
        .map(|(_, u)| u.clone())
        .collect()
}
