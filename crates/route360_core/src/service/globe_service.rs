//! Globe view session.
//!
//! # Responsibility
//! - Own the visited-country view state for one mounted globe view.
//! - Run detect -> reconcile -> persist on mount and after every mutation.
//! - Resolve markers against whatever centroid data is available.
//!
//! # Invariants
//! - Mutations read the stored list fresh, change it, and write it back
//!   whole (last writer wins across sessions).
//! - Before the centroid load settles, markers come from the static table.
//! - Nothing here fails on bad stored data or missing centroids; only store
//!   transport errors are returned.

use crate::geo::{marker_label, CentroidLoadError, CentroidSource, CentroidState};
use crate::globe::{
    add_manual_country, detect_trip_countries, remove_country, MarkerResolver, ReconcileOutcome,
};
use crate::model::geo::{GeocodedCentroid, MarkerPoint};
use crate::model::visited::VisitedCountryEntry;
use crate::repo::{RepoResult, TripRepository, VisitedCountryRepository};
use log::{debug, info};

/// Rendering sink for globe markers (the 3D globe widget).
pub trait MarkerSink {
    fn render(&mut self, markers: &[MarkerPoint], label: &dyn Fn(&str) -> String);
}

/// Mounted globe view: created on view load, dropped on unmount.
pub struct GlobeSession<V: VisitedCountryRepository, T: TripRepository> {
    visited_repo: V,
    trips: T,
    visited: Vec<VisitedCountryEntry>,
    centroids: CentroidState,
    resolver: MarkerResolver,
}

impl<V: VisitedCountryRepository, T: TripRepository> GlobeSession<V, T> {
    /// Mounts the view and reconciles stored countries with current trips.
    pub fn mount(visited_repo: V, trips: T) -> RepoResult<Self> {
        Self::mount_with_resolver(visited_repo, trips, MarkerResolver::standard())
    }

    pub fn mount_with_resolver(
        visited_repo: V,
        trips: T,
        resolver: MarkerResolver,
    ) -> RepoResult<Self> {
        let mut session = Self {
            visited_repo,
            trips,
            visited: Vec::new(),
            centroids: CentroidState::NotLoaded,
            resolver,
        };
        session.sync_with_trips()?;
        Ok(session)
    }

    /// Current reconciled list, manual entries first.
    pub fn visited(&self) -> &[VisitedCountryEntry] {
        &self.visited
    }

    pub fn centroid_state(&self) -> &CentroidState {
        &self.centroids
    }

    /// Re-detects trip countries, merges them into the stored list and
    /// persists the result.
    pub fn sync_with_trips(&mut self) -> RepoResult<&[VisitedCountryEntry]> {
        let trips = self.trips.list_trips()?;
        let detected = detect_trip_countries(&trips);
        let stored = self.visited_repo.load_visited()?;

        let outcome = ReconcileOutcome::compute(&stored, &detected);
        self.visited_repo.save_visited(&outcome.entries)?;
        info!(
            "event=visited_reconcile module=globe status=ok trips={} manual={} trip_added={} trip_dropped={}",
            trips.len(),
            outcome.manual_kept,
            outcome.trip_added,
            outcome.trip_dropped
        );

        self.visited = outcome.entries;
        Ok(&self.visited)
    }

    /// Adds a manual country. Blank or already-present names are no-ops.
    ///
    /// Returns whether the country was added.
    pub fn add_country(&mut self, name: &str) -> RepoResult<bool> {
        let mut stored = self.visited_repo.load_visited()?;
        if !add_manual_country(&mut stored, name) {
            debug!("event=visited_add module=globe status=skipped reason=blank_or_duplicate");
            return Ok(false);
        }
        self.visited_repo.save_visited(&stored)?;
        self.sync_with_trips()?;
        Ok(true)
    }

    /// Removes a country by normalized name, whatever its source.
    ///
    /// A trip-derived country still mentioned by a trip comes back on the
    /// resync that follows. Returns how many stored entries were removed.
    pub fn remove_country(&mut self, name: &str) -> RepoResult<usize> {
        let mut stored = self.visited_repo.load_visited()?;
        let removed = remove_country(&mut stored, name);
        self.visited_repo.save_visited(&stored)?;
        self.sync_with_trips()?;
        Ok(removed)
    }

    /// Loads live centroids once. Failures leave the static fallback in
    /// charge. Returns whether the state changed.
    pub fn load_centroids(&mut self, source: &dyn CentroidSource) -> bool {
        self.centroids.load_from(source)
    }

    /// Hands in the outcome of a fetch run elsewhere.
    pub fn settle_centroids(
        &mut self,
        outcome: Result<Vec<GeocodedCentroid>, CentroidLoadError>,
    ) -> bool {
        self.centroids.settle(outcome)
    }

    /// Markers for the current list and centroid state.
    pub fn markers(&self) -> Vec<MarkerPoint> {
        self.resolver
            .resolve(&self.visited, self.centroids.centroids())
    }

    /// Pushes the current markers to `sink` with flag-prefixed labels.
    pub fn render_to(&self, sink: &mut dyn MarkerSink) {
        let markers = self.markers();
        debug!(
            "event=globe_render module=globe status=ok visited={} markers={}",
            self.visited.len(),
            markers.len()
        );
        sink.render(&markers, &marker_label);
    }
}
