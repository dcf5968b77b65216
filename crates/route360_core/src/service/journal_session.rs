//! Signed-in journal session tying trip edits to globe reconciliation.

use super::globe_service::GlobeSession;
use super::trip_service::{TripDraft, TripService, TripServiceResult};
use crate::model::trip::Trip;
use crate::repo::{KvTripRepository, KvVisitedCountryRepository, RepoResult};
use crate::storage::{KeyValueStore, StorageScope};

pub type StoreGlobeSession<'s, S> =
    GlobeSession<KvVisitedCountryRepository<&'s S>, KvTripRepository<&'s S>>;

/// One user's journal over a shared store.
///
/// Trip create/edit/delete re-run reconciliation so trip-derived countries
/// always reflect current titles.
pub struct JournalSession<'s, S: KeyValueStore> {
    trips: TripService<KvTripRepository<&'s S>>,
    globe: StoreGlobeSession<'s, S>,
}

impl<'s, S: KeyValueStore> JournalSession<'s, S> {
    /// Opens the session and mounts the globe state for `scope`.
    pub fn open(store: &'s S, scope: &StorageScope) -> RepoResult<Self> {
        let globe = GlobeSession::mount(
            KvVisitedCountryRepository::new(store, scope),
            KvTripRepository::new(store, scope),
        )?;
        Ok(Self {
            trips: TripService::new(KvTripRepository::new(store, scope)),
            globe,
        })
    }

    pub fn trips(&self) -> &TripService<KvTripRepository<&'s S>> {
        &self.trips
    }

    pub fn globe(&self) -> &StoreGlobeSession<'s, S> {
        &self.globe
    }

    pub fn globe_mut(&mut self) -> &mut StoreGlobeSession<'s, S> {
        &mut self.globe
    }

    pub fn create_trip(&mut self, draft: TripDraft) -> TripServiceResult<Trip> {
        let trip = self.trips.create_trip(draft)?;
        self.globe.sync_with_trips()?;
        Ok(trip)
    }

    pub fn update_trip(&mut self, id: &str, draft: TripDraft) -> TripServiceResult<Trip> {
        let trip = self.trips.update_trip(id, draft)?;
        self.globe.sync_with_trips()?;
        Ok(trip)
    }

    pub fn delete_trip(&mut self, id: &str) -> TripServiceResult<()> {
        self.trips.delete_trip(id)?;
        self.globe.sync_with_trips()?;
        Ok(())
    }
}
