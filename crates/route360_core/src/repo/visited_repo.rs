//! Per-user visited-country list persistence.
//!
//! # Invariants
//! - The list is stored whole under `StorageScope::visited_countries_key`.
//! - Malformed stored data loads as an empty list; elements without a
//!   readable name are skipped and not written back.

use super::RepoResult;
use crate::model::visited::VisitedCountryEntry;
use crate::storage::{read_json_list, write_json_list, KeyValueStore, StorageScope};

pub trait VisitedCountryRepository {
    fn load_visited(&self) -> RepoResult<Vec<VisitedCountryEntry>>;
    fn save_visited(&self, entries: &[VisitedCountryEntry]) -> RepoResult<()>;
}

/// Visited-country list kept in a key-value store.
pub struct KvVisitedCountryRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvVisitedCountryRepository<S> {
    pub fn new(store: S, scope: &StorageScope) -> Self {
        Self {
            store,
            key: scope.visited_countries_key(),
        }
    }
}

impl<S: KeyValueStore> VisitedCountryRepository for KvVisitedCountryRepository<S> {
    fn load_visited(&self) -> RepoResult<Vec<VisitedCountryEntry>> {
        Ok(read_json_list(&self.store, &self.key)?)
    }

    fn save_visited(&self, entries: &[VisitedCountryEntry]) -> RepoResult<()> {
        Ok(write_json_list(&self.store, &self.key, entries)?)
    }
}
