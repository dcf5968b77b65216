//! Visited-country engine behind the globe view.
//!
//! # Responsibility
//! - Detect countries mentioned by trips.
//! - Merge detections with the user's stored list, keeping provenance.
//! - Turn the merged list into renderable globe markers.
//!
//! # Invariants
//! - Identity of a country entry is its `geo::normalize`d name.
//! - Every function here is pure; persistence lives in `repo`/`service`.

pub mod detect;
pub mod markers;
pub mod reconcile;

pub use detect::{detect_trip_countries, detect_with_catalog};
pub use markers::{
    resolve_markers, ContainedCentroidMatch, ExactCentroidMatch, MarkerResolver, MarkerStrategy,
    StaticReferenceFallback,
};
pub use reconcile::{add_manual_country, reconcile, remove_country, ReconcileOutcome};
