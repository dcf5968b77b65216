//! Domain records for the travel journal.
//!
//! # Responsibility
//! - Define the stored shapes (visited countries, trips, users) and the
//!   derived geographic shapes (centroids, markers, map points).
//! - Keep JSON record shapes and field names compatible with data written
//!   by the browser app (storage key names differ, see `storage::StorageScope`).
//!
//! # Invariants
//! - Stored records tolerate missing optional fields on read.
//! - Derived records (`MarkerPoint`, `MapPoint`) are never persisted.

pub mod geo;
pub mod trip;
pub mod user;
pub mod visited;
