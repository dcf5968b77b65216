//! Visited-country reconciliation.
//!
//! # Invariants
//! - Manual entries survive every reconciliation; only `remove_country`
//!   deletes them.
//! - Trip-derived entries mirror the latest detection and are never sticky.
//! - Output holds at most one entry per normalized name, manual entries
//!   first, then detections in detection order.
//! - `reconcile(reconcile(s, d), d) == reconcile(s, d)`.

use crate::geo::normalize;
use crate::model::visited::VisitedCountryEntry;
use std::collections::HashSet;

/// Merged list plus counts for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub entries: Vec<VisitedCountryEntry>,
    pub manual_kept: usize,
    pub trip_added: usize,
    /// Stored trip-derived entries that are no longer detected.
    pub trip_dropped: usize,
}

impl ReconcileOutcome {
    /// Merges `stored` with a fresh `detected` set.
    ///
    /// Detected entries are always re-tagged as trip-derived. Duplicate
    /// manual entries in `stored` collapse to the first occurrence.
    pub fn compute(stored: &[VisitedCountryEntry], detected: &[VisitedCountryEntry]) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(stored.len() + detected.len());

        for entry in stored.iter().filter(|entry| entry.is_manual()) {
            if seen.insert(normalize(entry.name.as_str())) {
                entries.push(entry.clone());
            }
        }
        let manual_kept = entries.len();

        for entry in detected {
            let key = normalize(entry.name.as_str());
            if !key.is_empty() && seen.insert(key) {
                entries.push(VisitedCountryEntry::from_trip(entry.name.clone()));
            }
        }
        let trip_added = entries.len() - manual_kept;

        let still_detected: HashSet<String> = entries
            .iter()
            .map(|entry| normalize(entry.name.as_str()))
            .collect();
        let trip_dropped = stored
            .iter()
            .filter(|entry| !entry.is_manual())
            .filter(|entry| !still_detected.contains(&normalize(entry.name.as_str())))
            .count();

        Self {
            entries,
            manual_kept,
            trip_added,
            trip_dropped,
        }
    }
}

/// Merges stored entries with detected ones. Never fails.
pub fn reconcile(
    stored: &[VisitedCountryEntry],
    detected: &[VisitedCountryEntry],
) -> Vec<VisitedCountryEntry> {
    ReconcileOutcome::compute(stored, detected).entries
}

/// Appends a manual entry for `raw_name`.
///
/// The name is trimmed. Blank names and names colliding (after
/// normalization) with any existing entry are silent no-ops.
/// Returns whether an entry was added.
pub fn add_manual_country(entries: &mut Vec<VisitedCountryEntry>, raw_name: &str) -> bool {
    let name = raw_name.trim();
    let key = normalize(name);
    if key.is_empty()
        || entries
            .iter()
            .any(|entry| normalize(entry.name.as_str()) == key)
    {
        return false;
    }
    entries.push(VisitedCountryEntry::manual(name));
    true
}

/// Deletes every entry matching `name` by normalized name, whatever its
/// source. Returns how many entries were removed.
pub fn remove_country(entries: &mut Vec<VisitedCountryEntry>, name: &str) -> usize {
    let key = normalize(name);
    let before = entries.len();
    entries.retain(|entry| normalize(entry.name.as_str()) != key);
    before - entries.len()
}

#[cfg(test)]
mod tests {
    use super::{add_manual_country, reconcile, remove_country, ReconcileOutcome};
    use crate::model::visited::{CountrySource, VisitedCountryEntry};

    fn manual(name: &str) -> VisitedCountryEntry {
        VisitedCountryEntry::manual(name)
    }

    fn trip(name: &str) -> VisitedCountryEntry {
        VisitedCountryEntry::from_trip(name)
    }

    #[test]
    fn manual_first_then_new_detections() {
        let merged = reconcile(&[manual("France")], &[trip("Japan")]);
        assert_eq!(merged, vec![manual("France"), trip("Japan")]);
    }

    #[test]
    fn manual_entry_wins_over_detection_of_same_country() {
        let merged = reconcile(&[manual("japan")], &[trip("Japan")]);
        assert_eq!(merged, vec![manual("japan")]);
    }

    #[test]
    fn reconciling_twice_changes_nothing() {
        let stored = vec![manual("France"), trip("Italy"), manual("france")];
        let detected = vec![trip("Japan"), trip("FRANCE"), trip("japan ")];

        let once = reconcile(&stored, &detected);
        let twice = reconcile(&once, &detected);

        assert_eq!(once, vec![manual("France"), trip("Japan")]);
        assert_eq!(twice, once);
    }

    #[test]
    fn stale_trip_entries_are_dropped() {
        let outcome = ReconcileOutcome::compute(&[manual("France"), trip("Japan")], &[]);
        assert_eq!(outcome.entries, vec![manual("France")]);
        assert_eq!(outcome.trip_dropped, 1);
        assert_eq!(outcome.manual_kept, 1);
        assert_eq!(outcome.trip_added, 0);
    }

    #[test]
    fn still_detected_trip_entry_is_not_counted_as_dropped() {
        let outcome = ReconcileOutcome::compute(&[trip("Japan")], &[trip("Japan")]);
        assert_eq!(outcome.entries, vec![trip("Japan")]);
        assert_eq!(outcome.trip_dropped, 0);
    }

    #[test]
    fn detected_entries_are_retagged_as_trip() {
        let merged = reconcile(&[], &[manual("Peru")]);
        assert_eq!(merged[0].source, CountrySource::TripDerived);
    }

    #[test]
    fn duplicate_manual_entries_collapse() {
        let merged = reconcile(&[manual("Chile"), manual(" chile ")], &[]);
        assert_eq!(merged, vec![manual("Chile")]);
    }

    #[test]
    fn add_manual_country_trims_and_ignores_collisions() {
        let mut entries = vec![trip("Japan")];
        assert!(add_manual_country(&mut entries, "  Peru "));
        assert!(!add_manual_country(&mut entries, "JAPAN"));
        assert!(!add_manual_country(&mut entries, "   "));
        assert_eq!(entries, vec![trip("Japan"), manual("Peru")]);
    }

    #[test]
    fn remove_country_ignores_source_and_casing() {
        let mut entries = vec![manual("France"), trip("Japan")];
        assert_eq!(remove_country(&mut entries, "japan "), 1);
        assert_eq!(remove_country(&mut entries, "Atlantis"), 0);
        assert_eq!(entries, vec![manual("France")]);
    }
}
