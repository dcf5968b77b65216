//! Country reference data, name normalization and live centroid loading.
//!
//! # Responsibility
//! - Hold the immutable country tables (centroids, aliases, flags, catalog).
//! - Fold free-text country names into lookup keys.
//! - Load the live centroid dataset once and degrade to "no data" on failure.

pub mod centroids;
pub mod normalize;
pub mod reference;

pub use centroids::{
    join_country_names, parse_centroid_payload, parse_identified_payload, CentroidLoadError,
    CentroidSource, CentroidState, FileCentroidSource, IdentifiedCentroid,
};
pub use normalize::{canonical_key, normalize, resolve_alias};
pub use reference::{
    alias_target, detection_catalog, flag_for, marker_label, reference_record, reference_records,
    UNKNOWN_FLAG,
};
