//! Visited-country entries and their provenance.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Where a visited-country entry came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountrySource {
    /// Added explicitly by the user. Survives every reconciliation.
    #[default]
    #[serde(rename = "manual")]
    Manual,
    /// Inferred from a trip title or trip country field. Rebuilt on every
    /// reconciliation.
    #[serde(rename = "trip")]
    TripDerived,
}

/// One row of a user's visited-country list.
///
/// `name` keeps the casing the user typed or the detector matched; identity
/// comparisons always go through `geo::normalize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitedCountryEntry {
    pub name: String,
    /// Entries written before provenance existed carry no tag (or `null`)
    /// and read back as `Manual`, as does any tag other than `"trip"`, so a
    /// reconciliation can never sweep them away.
    #[serde(default, deserialize_with = "source_or_manual")]
    pub source: CountrySource,
}

impl VisitedCountryEntry {
    pub fn manual(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: CountrySource::Manual,
        }
    }

    pub fn from_trip(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: CountrySource::TripDerived,
        }
    }

    pub fn is_manual(&self) -> bool {
        self.source == CountrySource::Manual
    }
}

fn source_or_manual<'de, D>(deserializer: D) -> Result<CountrySource, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<Value>::deserialize(deserializer)?;
    Ok(match tag.as_ref().and_then(Value::as_str) {
        Some("trip") => CountrySource::TripDerived,
        _ => CountrySource::Manual,
    })
}

#[cfg(test)]
mod tests {
    use super::{CountrySource, VisitedCountryEntry};

    #[test]
    fn untagged_and_null_sources_read_as_manual() {
        let entries: Vec<VisitedCountryEntry> =
            serde_json::from_str(r#"[{"name":"Peru"},{"name":"Chile","source":null}]"#).unwrap();
        assert!(entries.iter().all(|entry| entry.source == CountrySource::Manual));
    }

    #[test]
    fn unknown_source_tags_read_as_manual() {
        let entries: Vec<VisitedCountryEntry> = serde_json::from_str(
            r#"[{"name":"Peru","source":"wishlist"},{"name":"Chile","source":3},{"name":"Japan","source":"trip"}]"#,
        )
        .unwrap();
        let sources: Vec<CountrySource> = entries.iter().map(|entry| entry.source).collect();
        assert_eq!(
            sources,
            vec![
                CountrySource::Manual,
                CountrySource::Manual,
                CountrySource::TripDerived
            ]
        );
    }

    #[test]
    fn source_tags_use_browser_spelling() {
        let json = serde_json::to_string(&[
            VisitedCountryEntry::manual("France"),
            VisitedCountryEntry::from_trip("Japan"),
        ])
        .unwrap();
        assert_eq!(
            json,
            r#"[{"name":"France","source":"manual"},{"name":"Japan","source":"trip"}]"#
        );
    }
}
