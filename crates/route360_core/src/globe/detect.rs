//! Trip title country detection.
//!
//! Matching is naive substring containment on normalized text, so a title
//! like "indonesian food night" yields "Indonesia" and "Ukraine" also yields
//! "UK". Such false positives are accepted in exchange for never missing a
//! country the user typed. Cost is O(trips x catalog) substring scans.

use crate::geo::{detection_catalog, normalize};
use crate::model::trip::Trip;
use crate::model::visited::VisitedCountryEntry;
use std::collections::HashSet;

/// Detects countries across `trips` using the built-in catalog.
pub fn detect_trip_countries(trips: &[Trip]) -> Vec<VisitedCountryEntry> {
    detect_with_catalog(trips, detection_catalog())
}

/// Detects countries across `trips` using `catalog` display names.
///
/// Output entries are tagged as trip-derived, unique by normalized name, and
/// in first-seen order. Catalog matches keep the catalog's casing; an
/// explicit trip `country` is kept verbatim.
pub fn detect_with_catalog(trips: &[Trip], catalog: &[&str]) -> Vec<VisitedCountryEntry> {
    let folded_catalog: Vec<(&str, String)> = catalog
        .iter()
        .map(|name| (*name, normalize(*name)))
        .filter(|(_, folded)| !folded.is_empty())
        .collect();

    let mut seen = HashSet::new();
    let mut found = Vec::new();
    let mut record = |name: &str| {
        let key = normalize(name);
        if !key.is_empty() && seen.insert(key) {
            found.push(VisitedCountryEntry::from_trip(name));
        }
    };

    for trip in trips {
        let title = normalize(trip.title.as_str());
        for (display, folded) in &folded_catalog {
            if title.contains(folded.as_str()) {
                record(*display);
            }
        }
        if let Some(country) = trip.country.as_deref() {
            record(country);
        }
    }

    found
}
