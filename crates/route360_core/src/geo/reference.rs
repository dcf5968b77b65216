//! Static country tables.
//!
//! # Invariants
//! - Canonical names are already normalized (trimmed, lowercase).
//! - Every alias target is a canonical name present in `COUNTRIES`.
//! - Tables are immutable for the process lifetime.

use super::normalize::{normalize, resolve_alias};
use crate::model::geo::{CountryReferenceRecord, Coordinate};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Flag shown for names with no known country.
pub const UNKNOWN_FLAG: &str = "\u{1F3F3}\u{FE0F}";

struct Country {
    canonical: &'static str,
    display: &'static str,
    /// ISO 3166-1 alpha-2 code, used to build the flag glyph.
    iso2: &'static str,
    at: Coordinate,
}

const fn country(
    canonical: &'static str,
    display: &'static str,
    iso2: &'static str,
    lat: f64,
    lng: f64,
) -> Country {
    Country {
        canonical,
        display,
        iso2,
        at: Coordinate { lat, lng },
    }
}

const COUNTRIES: &[Country] = &[
    country("japan", "Japan", "JP", 36.2, 138.3),
    country("italy", "Italy", "IT", 41.9, 12.6),
    country("france", "France", "FR", 46.2, 2.2),
    country("spain", "Spain", "ES", 40.4, -3.7),
    country("germany", "Germany", "DE", 51.2, 10.4),
    country("egypt", "Egypt", "EG", 26.8, 30.8),
    country("china", "China", "CN", 35.9, 104.2),
    country("canada", "Canada", "CA", 56.1, -106.3),
    country("brazil", "Brazil", "BR", -10.3, -53.2),
    country("mexico", "Mexico", "MX", 23.6, -102.5),
    country("greece", "Greece", "GR", 39.1, 21.8),
    country("turkey", "Turkey", "TR", 39.0, 35.2),
    country("united states of america", "United States of America", "US", 39.8, -98.6),
    country("united kingdom", "United Kingdom", "GB", 55.3, -3.4),
    country("united arab emirates", "United Arab Emirates", "AE", 23.4, 53.8),
    country("saudi arabia", "Saudi Arabia", "SA", 23.9, 45.1),
    country("qatar", "Qatar", "QA", 25.3, 51.2),
    country("india", "India", "IN", 20.6, 78.9),
    country("morocco", "Morocco", "MA", 31.8, -7.1),
    country("australia", "Australia", "AU", -25.3, 133.8),
    country("monaco", "Monaco", "MC", 43.7384, 7.4246),
    country("portugal", "Portugal", "PT", 39.4, -8.2),
    country("netherlands", "Netherlands", "NL", 52.1, 5.3),
    country("belgium", "Belgium", "BE", 50.8, 4.5),
    country("switzerland", "Switzerland", "CH", 46.8, 8.2),
    country("austria", "Austria", "AT", 47.5, 14.5),
    country("sweden", "Sweden", "SE", 60.1, 18.6),
    country("norway", "Norway", "NO", 60.5, 8.5),
    country("denmark", "Denmark", "DK", 56.2, 9.5),
    country("finland", "Finland", "FI", 64.0, 26.0),
    country("ireland", "Ireland", "IE", 53.4, -8.2),
    country("south africa", "South Africa", "ZA", -30.6, 22.9),
    country("kenya", "Kenya", "KE", 0.02, 37.9),
    country("tanzania", "Tanzania", "TZ", -6.4, 35.0),
    country("thailand", "Thailand", "TH", 15.8, 100.9),
    country("indonesia", "Indonesia", "ID", -2.5, 118.0),
    country("malaysia", "Malaysia", "MY", 4.2, 102.0),
    country("singapore", "Singapore", "SG", 1.35, 103.8),
    country("south korea", "South Korea", "KR", 36.5, 127.9),
    country("vietnam", "Vietnam", "VN", 14.1, 108.3),
    country("philippines", "Philippines", "PH", 12.9, 121.8),
    country("argentina", "Argentina", "AR", -38.4, -63.6),
    country("chile", "Chile", "CL", -35.7, -71.5),
    country("peru", "Peru", "PE", -9.2, -75.0),
    country("colombia", "Colombia", "CO", 4.6, -74.1),
    country("russia", "Russia", "RU", 61.5, 105.3),
    country("ukraine", "Ukraine", "UA", 48.3, 31.2),
    country("poland", "Poland", "PL", 52.1, 19.1),
    country("czech republic", "Czech Republic", "CZ", 49.8, 15.5),
    country("hungary", "Hungary", "HU", 47.1, 19.5),
    country("croatia", "Croatia", "HR", 45.1, 15.2),
    country("serbia", "Serbia", "RS", 44.0, 20.9),
    country("romania", "Romania", "RO", 45.9, 24.9),
    country("bulgaria", "Bulgaria", "BG", 42.7, 25.5),
    country("new zealand", "New Zealand", "NZ", -40.9, 174.9),
    country("iceland", "Iceland", "IS", 64.9, -19.0),
    country("jordan", "Jordan", "JO", 31.2, 36.0),
    country("lebanon", "Lebanon", "LB", 33.9, 35.9),
    country("oman", "Oman", "OM", 21.5, 55.9),
    country("bahrain", "Bahrain", "BH", 26.1, 50.5),
    country("kuwait", "Kuwait", "KW", 29.3, 47.5),
    country("tunisia", "Tunisia", "TN", 34.0, 9.5),
    country("algeria", "Algeria", "DZ", 28.0, 1.7),
    country("nigeria", "Nigeria", "NG", 9.1, 8.7),
    country("ghana", "Ghana", "GH", 7.9, -1.0),
    country("ethiopia", "Ethiopia", "ET", 9.1, 40.5),
];

/// `(normalized alias, canonical name, display spelling)`.
const ALIASES: &[(&str, &str, &str)] = &[
    ("usa", "united states of america", "USA"),
    ("united states", "united states of america", "United States"),
    ("uk", "united kingdom", "UK"),
    ("uae", "united arab emirates", "UAE"),
    ("dubai", "united arab emirates", "Dubai"),
];

static BY_CANONICAL: Lazy<HashMap<&'static str, &'static Country>> = Lazy::new(|| {
    COUNTRIES
        .iter()
        .map(|country| (country.canonical, country))
        .collect()
});

static CATALOG: Lazy<Vec<&'static str>> = Lazy::new(|| {
    COUNTRIES
        .iter()
        .map(|country| country.display)
        .chain(ALIASES.iter().map(|(_, _, display)| *display))
        .collect()
});

/// Canonical target of a normalized alias.
pub fn alias_target(normalized_name: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _, _)| *alias == normalized_name)
        .map(|(_, canonical, _)| *canonical)
}

/// Static centroid for a canonical (normalized, alias-resolved) name.
pub fn reference_record(canonical_name: &str) -> Option<CountryReferenceRecord> {
    BY_CANONICAL
        .get(canonical_name)
        .map(|country| CountryReferenceRecord {
            canonical_name: country.canonical,
            lat: country.at.lat,
            lng: country.at.lng,
        })
}

/// Every static centroid, in table order.
pub fn reference_records() -> impl Iterator<Item = CountryReferenceRecord> {
    COUNTRIES.iter().map(|country| CountryReferenceRecord {
        canonical_name: country.canonical,
        lat: country.at.lat,
        lng: country.at.lng,
    })
}

/// Display names the trip detector searches for: every reference country
/// plus every alias spelling.
pub fn detection_catalog() -> &'static [&'static str] {
    CATALOG.as_slice()
}

/// Flag glyph for a country name or alias, in any casing.
pub fn flag_for(name: &str) -> String {
    let folded = normalize(name);
    BY_CANONICAL
        .get(resolve_alias(&folded))
        .and_then(|country| flag_from_iso2(country.iso2))
        .unwrap_or_else(|| UNKNOWN_FLAG.to_string())
}

/// Default label formatter for the rendering sink: `"<flag> <name>"`.
pub fn marker_label(name: &str) -> String {
    format!("{} {name}", flag_for(name))
}

fn flag_from_iso2(code: &str) -> Option<String> {
    const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;
    code.chars()
        .map(|letter| {
            if !letter.is_ascii_uppercase() {
                return None;
            }
            char::from_u32(REGIONAL_INDICATOR_A + (letter as u32 - 'A' as u32))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        alias_target, detection_catalog, flag_for, marker_label, reference_record,
        reference_records, ALIASES, UNKNOWN_FLAG,
    };
    use std::collections::HashSet;

    #[test]
    fn czech_republic_has_static_centroid() {
        let record = reference_record("czech republic").expect("czech republic is known");
        assert_eq!((record.lat, record.lng), (49.8, 15.5));
    }

    #[test]
    fn every_alias_targets_a_reference_country() {
        for (alias, canonical, _) in ALIASES {
            assert!(reference_record(canonical).is_some(), "{alias} -> {canonical}");
        }
        assert_eq!(alias_target("usa"), Some("united states of america"));
        assert_eq!(alias_target("japan"), None);
    }

    #[test]
    fn canonical_names_are_unique_and_normalized() {
        let mut seen = HashSet::new();
        for record in reference_records() {
            assert_eq!(record.canonical_name, record.canonical_name.trim().to_lowercase());
            assert!(seen.insert(record.canonical_name), "{}", record.canonical_name);
        }
        assert_eq!(seen.len(), 66);
    }

    #[test]
    fn catalog_holds_countries_and_alias_spellings() {
        let catalog = detection_catalog();
        assert!(catalog.contains(&"Japan"));
        assert!(catalog.contains(&"United States"));
        assert!(catalog.contains(&"USA"));
        assert!(catalog.contains(&"Dubai"));
        assert_eq!(catalog.len(), 66 + ALIASES.len());
    }

    #[test]
    fn flags_resolve_through_aliases_and_casing() {
        assert_eq!(flag_for("Japan"), "\u{1F1EF}\u{1F1F5}");
        assert_eq!(flag_for(" usa "), "\u{1F1FA}\u{1F1F8}");
        assert_eq!(flag_for("UK"), "\u{1F1EC}\u{1F1E7}");
        assert_eq!(flag_for("Atlantis"), UNKNOWN_FLAG);
    }

    #[test]
    fn marker_label_prefixes_flag() {
        assert_eq!(marker_label("Peru"), "\u{1F1F5}\u{1F1EA} Peru");
    }
}
