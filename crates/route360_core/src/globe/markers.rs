//! Marker resolution for the globe.
//!
//! A visited entry is folded to its canonical name and handed to an ordered
//! list of strategies; the first one that yields a coordinate wins. Entries
//! no strategy can place are left out of the output without error.

use crate::geo::{normalize, reference_record, resolve_alias};
use crate::model::geo::{Coordinate, GeocodedCentroid, MarkerPoint};
use crate::model::visited::VisitedCountryEntry;

/// One tier of the coordinate lookup chain.
pub trait MarkerStrategy {
    /// Short tier name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Locates `canonical_name` (normalized, alias-resolved, non-empty).
    fn locate(&self, canonical_name: &str, centroids: &[GeocodedCentroid]) -> Option<Coordinate>;
}

/// Live centroid whose normalized name equals the wanted name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactCentroidMatch;

impl MarkerStrategy for ExactCentroidMatch {
    fn name(&self) -> &'static str {
        "exact_centroid"
    }

    fn locate(&self, canonical_name: &str, centroids: &[GeocodedCentroid]) -> Option<Coordinate> {
        centroids
            .iter()
            .find(|centroid| normalize(centroid.name.as_str()) == canonical_name)
            .map(centroid_coordinate)
    }
}

/// Live centroid whose normalized name contains the wanted name, for
/// datasets that decorate country names ("Dem. Rep. Congo" for "congo").
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainedCentroidMatch;

impl MarkerStrategy for ContainedCentroidMatch {
    fn name(&self) -> &'static str {
        "contained_centroid"
    }

    fn locate(&self, canonical_name: &str, centroids: &[GeocodedCentroid]) -> Option<Coordinate> {
        centroids
            .iter()
            .find(|centroid| normalize(centroid.name.as_str()).contains(canonical_name))
            .map(centroid_coordinate)
    }
}

/// Built-in reference table, used when the live dataset has no match or has
/// not loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticReferenceFallback;

impl MarkerStrategy for StaticReferenceFallback {
    fn name(&self) -> &'static str {
        "static_reference"
    }

    fn locate(&self, canonical_name: &str, _centroids: &[GeocodedCentroid]) -> Option<Coordinate> {
        reference_record(canonical_name).map(|record| Coordinate {
            lat: record.lat,
            lng: record.lng,
        })
    }
}

fn centroid_coordinate(centroid: &GeocodedCentroid) -> Coordinate {
    Coordinate {
        lat: centroid.lat,
        lng: centroid.lng,
    }
}

/// Prioritized strategy chain. Stateless between calls.
pub struct MarkerResolver {
    strategies: Vec<Box<dyn MarkerStrategy>>,
}

impl Default for MarkerResolver {
    fn default() -> Self {
        Self::standard()
    }
}

impl MarkerResolver {
    /// Resolver with no tiers; every lookup misses until tiers are pushed.
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Exact live match, then contained live match, then static table.
    pub fn standard() -> Self {
        Self::empty()
            .with(ExactCentroidMatch)
            .with(ContainedCentroidMatch)
            .with(StaticReferenceFallback)
    }

    /// Appends a lowest-priority tier.
    pub fn with(mut self, strategy: impl MarkerStrategy + 'static) -> Self {
        self.push(strategy);
        self
    }

    pub fn push(&mut self, strategy: impl MarkerStrategy + 'static) {
        self.strategies.push(Box::new(strategy));
    }

    /// Tier names in priority order.
    pub fn tier_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    /// Locates one display name, returning the winning tier as well.
    pub fn locate(
        &self,
        name: &str,
        centroids: &[GeocodedCentroid],
    ) -> Option<(Coordinate, &'static str)> {
        let folded = normalize(name);
        let wanted = resolve_alias(&folded);
        if wanted.is_empty() {
            return None;
        }
        self.strategies.iter().find_map(|strategy| {
            strategy
                .locate(wanted, centroids)
                .map(|at| (at, strategy.name()))
        })
    }

    /// One marker per resolvable entry, in `visited` order.
    pub fn resolve(
        &self,
        visited: &[VisitedCountryEntry],
        centroids: &[GeocodedCentroid],
    ) -> Vec<MarkerPoint> {
        visited
            .iter()
            .filter_map(|entry| {
                self.locate(&entry.name, centroids)
                    .map(|(at, _)| MarkerPoint::new(entry.name.clone(), at))
            })
            .collect()
    }
}

/// Resolves markers with the standard strategy chain.
pub fn resolve_markers(
    visited: &[VisitedCountryEntry],
    centroids: &[GeocodedCentroid],
) -> Vec<MarkerPoint> {
    MarkerResolver::standard().resolve(visited, centroids)
}
