//! Trip journal record.
//!
//! # Responsibility
//! - Define the stored trip shape with its itinerary and places.
//! - Provide validation and the day-number derivation for itinerary items.
//!
//! # Invariants
//! - `id` is stable for the trip's lifetime.
//! - `end` is never earlier than `start` when both are set.
//! - Dates are stored as `YYYY-MM-DD`, with `""` meaning "not set".

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Title used when a trip is saved without one.
pub const UNTITLED_TRIP: &str = "Untitled trip";
/// Title used when an itinerary item is saved without one.
pub const DEFAULT_ACTIVITY_TITLE: &str = "Activity";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One trip, as stored in the per-user trip list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, with = "date_field")]
    pub start: Option<NaiveDate>,
    #[serde(default, with = "date_field")]
    pub end: Option<NaiveDate>,
    /// Cover image as a data URL or plain URL.
    #[serde(default, rename = "coverDataUrl")]
    pub cover_image: String,
    /// Explicit country, counted as visited in addition to title matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, alias = "itineraries")]
    pub itinerary: Vec<ItineraryItem>,
    #[serde(default)]
    pub locations: Vec<TripLocation>,
}

/// One planned activity inside a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, with = "date_field")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub note: String,
    /// 1-based day relative to the trip start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub lat: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub lng: Option<f64>,
}

/// A geocoded place pinned to a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripLocation {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Full label returned by the geocoder.
    #[serde(default)]
    pub location: String,
    /// Unset when the stored value is missing or not a number; such places
    /// stay in the list but are not mappable.
    #[serde(
        default,
        deserialize_with = "lenient_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub lat: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub lng: Option<f64>,
}

/// Trip field validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripValidationError {
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    InvalidDate(String),
    InvalidCoordinate { lat: String, lng: String },
}

impl Display for TripValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndBeforeStart { start, end } => {
                write!(f, "trip end {end} is earlier than start {start}")
            }
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidCoordinate { lat, lng } => {
                write!(f, "invalid coordinate ({lat}, {lng})")
            }
        }
    }
}

impl Error for TripValidationError {}

impl Trip {
    /// Creates an empty trip with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            desc: String::new(),
            start: None,
            end: None,
            cover_image: String::new(),
            country: None,
            itinerary: Vec::new(),
            locations: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), TripValidationError> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err(TripValidationError::EndBeforeStart { start, end });
            }
        }
        for location in &self.locations {
            if let (Some(lat), Some(lng)) = (location.lat, location.lng) {
                check_coordinate(lat, lng)?;
            }
        }
        for item in &self.itinerary {
            if let (Some(lat), Some(lng)) = (item.lat, item.lng) {
                check_coordinate(lat, lng)?;
            }
        }
        Ok(())
    }

    /// Day number of `date` within this trip: `date - start + 1`.
    ///
    /// `None` when either date is missing, and for the day before the start
    /// (day zero), so callers fall back to the previous or positional day.
    /// Earlier dates yield negative numbers.
    pub fn day_number(&self, date: Option<NaiveDate>) -> Option<i64> {
        let start = self.start?;
        let date = date?;
        Some((date - start).num_days() + 1).filter(|day| *day != 0)
    }

    /// Whether the trip has not ended yet as of `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.end.is_some_and(|end| end >= today)
    }

    pub fn find_item_mut(&mut self, item_id: &str) -> Option<&mut ItineraryItem> {
        self.itinerary.iter_mut().find(|item| item.id == item_id)
    }

    pub fn find_location_mut(&mut self, location_id: &str) -> Option<&mut TripLocation> {
        self.locations
            .iter_mut()
            .find(|location| location.id == location_id)
    }
}

/// Parses an optional `YYYY-MM-DD` input; blank means "not set".
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, TripValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| TripValidationError::InvalidDate(trimmed.to_string()))
}

/// Reads a coordinate that older data may hold as `null`, a string or
/// nothing; anything but a JSON number reads as unset.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| value.as_f64()))
}

fn check_coordinate(lat: f64, lng: f64) -> Result<(), TripValidationError> {
    let valid = lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng);
    if valid {
        Ok(())
    } else {
        Err(TripValidationError::InvalidCoordinate {
            lat: lat.to_string(),
            lng: lng.to_string(),
        })
    }
}

/// `Option<NaiveDate>` stored as `"YYYY-MM-DD"` or `""`.
///
/// Unreadable stored dates load as `None` so one bad field cannot hide the
/// whole trip list.
mod date_field {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|value| NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()))
    }
}
