//! Per-user trip list persistence.
//!
//! # Responsibility
//! - CRUD over the JSON trip array stored under `StorageScope::trips_key`.
//!
//! # Invariants
//! - Writes call `Trip::validate()` first.
//! - New trips go to the front of the list (newest first).
//! - Every write rewrites the whole list; concurrent writers race.
//! - Stored trips that no longer decode are carried through writes as-is.

use super::{RepoError, RepoResult};
use crate::model::trip::Trip;
use crate::storage::{
    load_json_list, read_json_list, write_stored_list, KeyValueStore, StorageScope, StoredList,
};

pub trait TripRepository {
    fn list_trips(&self) -> RepoResult<Vec<Trip>>;
    fn get_trip(&self, id: &str) -> RepoResult<Option<Trip>>;
    fn create_trip(&self, trip: &Trip) -> RepoResult<String>;
    fn update_trip(&self, trip: &Trip) -> RepoResult<()>;
    fn delete_trip(&self, id: &str) -> RepoResult<()>;
}

pub struct KvTripRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvTripRepository<S> {
    pub fn new(store: S, scope: &StorageScope) -> Self {
        Self {
            store,
            key: scope.trips_key(),
        }
    }

    fn load(&self) -> RepoResult<StoredList<Trip>> {
        Ok(load_json_list(&self.store, &self.key)?)
    }

    fn save(&self, trips: &StoredList<Trip>) -> RepoResult<()> {
        Ok(write_stored_list(&self.store, &self.key, trips)?)
    }
}

impl<S: KeyValueStore> TripRepository for KvTripRepository<S> {
    fn list_trips(&self) -> RepoResult<Vec<Trip>> {
        Ok(read_json_list(&self.store, &self.key)?)
    }

    fn get_trip(&self, id: &str) -> RepoResult<Option<Trip>> {
        Ok(self.list_trips()?.into_iter().find(|trip| trip.id == id))
    }

    fn create_trip(&self, trip: &Trip) -> RepoResult<String> {
        trip.validate()?;
        let mut trips = self.load()?;
        trips.items.insert(0, trip.clone());
        self.save(&trips)?;
        Ok(trip.id.clone())
    }

    fn update_trip(&self, trip: &Trip) -> RepoResult<()> {
        trip.validate()?;
        let mut trips = self.load()?;
        let slot = trips
            .items
            .iter_mut()
            .find(|stored| stored.id == trip.id)
            .ok_or_else(|| RepoError::NotFound("trip", trip.id.clone()))?;
        *slot = trip.clone();
        self.save(&trips)
    }

    fn delete_trip(&self, id: &str) -> RepoResult<()> {
        let mut trips = self.load()?;
        let before = trips.items.len();
        trips.items.retain(|trip| trip.id != id);
        if trips.items.len() == before {
            return Err(RepoError::NotFound("trip", id.to_string()));
        }
        self.save(&trips)
    }
}
