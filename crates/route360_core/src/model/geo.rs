//! Geographic records: reference centroids, live centroids and render points.

use serde::{Deserialize, Serialize};

/// Marker radius handed to the globe sink for every visited country.
pub const MARKER_SIZE: f64 = 1.2;

/// Static approximate centroid for one country, keyed by canonical name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryReferenceRecord {
    pub canonical_name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// Country centroid computed from a live geographic dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedCentroid {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Renderable globe point. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPoint {
    /// Display name of the visited entry, not its canonical form.
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub size: f64,
}

impl MarkerPoint {
    pub fn new(name: impl Into<String>, at: Coordinate) -> Self {
        Self {
            name: name.into(),
            lat: at.lat,
            lng: at.lng,
            size: MARKER_SIZE,
        }
    }
}

/// Pin on a trip's 2D map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    /// Itinerary item or location id the pin belongs to.
    pub id: String,
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}
