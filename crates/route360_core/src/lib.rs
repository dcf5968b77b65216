//! Core logic for the Route 360 travel journal.
//!
//! Owns the visited-country engine (trip title detection, provenance-aware
//! reconciliation, marker resolution) plus the local trip, account and
//! storage layers it runs on.

pub mod db;
pub mod geo;
pub mod globe;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use geo::{flag_for, marker_label, normalize, resolve_alias};
pub use globe::{detect_trip_countries, reconcile, resolve_markers, MarkerResolver};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::geo::{GeocodedCentroid, MapPoint, MarkerPoint};
pub use model::trip::{ItineraryItem, Trip, TripLocation, TripValidationError};
pub use model::user::User;
pub use model::visited::{CountrySource, VisitedCountryEntry};
pub use repo::{RepoError, RepoResult};
pub use service::account_service::{AccountError, AccountService, Registration};
pub use service::globe_service::{GlobeSession, MarkerSink};
pub use service::journal_session::JournalSession;
pub use service::trip_service::{
    map_points, ItineraryDraft, PlaceSelection, TripDraft, TripService, TripServiceError,
    TripSummary,
};
pub use storage::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageScope};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
