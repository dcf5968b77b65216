//! Trip journal use-cases.
//!
//! # Responsibility
//! - Create/edit/delete trips with the journal's defaulting rules.
//! - Manage itinerary items and geocoded places inside a trip.
//! - Derive map pins and the dashboard summary.
//!
//! # Invariants
//! - Every write goes through `TripRepository`, which validates first.
//! - Editing a trip never touches its itinerary or places.

use crate::model::geo::MapPoint;
use crate::model::trip::{
    ItineraryItem, Trip, TripLocation, TripValidationError, DEFAULT_ACTIVITY_TITLE, UNTITLED_TRIP,
};
use crate::repo::{RepoError, TripRepository};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Service error for trip use-cases.
#[derive(Debug)]
pub enum TripServiceError {
    TripNotFound(String),
    ItemNotFound(String),
    LocationNotFound(String),
    Validation(TripValidationError),
    Repo(RepoError),
}

impl Display for TripServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TripNotFound(id) => write!(f, "trip not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "itinerary item not found: {id}"),
            Self::LocationNotFound(id) => write!(f, "location not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TripServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TripServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_, id) => Self::TripNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<TripValidationError> for TripServiceError {
    fn from(value: TripValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type TripServiceResult<T> = Result<T, TripServiceError>;

/// Editable trip fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripDraft {
    pub title: String,
    pub desc: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub cover_image: String,
    pub country: Option<String>,
}

/// Editable itinerary item fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItineraryDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub note: String,
}

/// Place picked from the geocoding autocomplete.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSelection {
    pub label: String,
    pub lat: f64,
    pub lng: f64,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripSummary {
    pub total: usize,
    /// Trips whose end date is today or later.
    pub upcoming: usize,
}

pub struct TripService<R: TripRepository> {
    repo: R,
}

impl<R: TripRepository> TripService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All trips, newest first.
    pub fn list_trips(&self) -> TripServiceResult<Vec<Trip>> {
        Ok(self.repo.list_trips()?)
    }

    pub fn get_trip(&self, id: &str) -> TripServiceResult<Trip> {
        self.repo
            .get_trip(id)?
            .ok_or_else(|| TripServiceError::TripNotFound(id.to_string()))
    }

    /// Creates a trip; a blank title becomes "Untitled trip".
    pub fn create_trip(&self, draft: TripDraft) -> TripServiceResult<Trip> {
        let mut trip = Trip::new(String::new());
        apply_draft(&mut trip, draft);
        self.repo.create_trip(&trip)?;
        info!("event=trip_create module=trips status=ok trip_id={}", trip.id);
        Ok(trip)
    }

    /// Replaces the editable fields of an existing trip.
    pub fn update_trip(&self, id: &str, draft: TripDraft) -> TripServiceResult<Trip> {
        let mut trip = self.get_trip(id)?;
        apply_draft(&mut trip, draft);
        self.repo.update_trip(&trip)?;
        Ok(trip)
    }

    pub fn delete_trip(&self, id: &str) -> TripServiceResult<()> {
        self.repo.delete_trip(id)?;
        info!("event=trip_delete module=trips status=ok trip_id={id}");
        Ok(())
    }

    /// Appends an itinerary item; a blank title becomes "Activity".
    pub fn add_itinerary_item(
        &self,
        trip_id: &str,
        draft: ItineraryDraft,
    ) -> TripServiceResult<ItineraryItem> {
        let mut trip = self.get_trip(trip_id)?;
        let item = ItineraryItem {
            id: Uuid::new_v4().to_string(),
            title: title_or(&draft.title, DEFAULT_ACTIVITY_TITLE),
            date: draft.date,
            note: draft.note.trim().to_string(),
            day: trip.day_number(draft.date),
            location: None,
            lat: None,
            lng: None,
        };
        trip.itinerary.push(item.clone());
        self.repo.update_trip(&trip)?;
        Ok(item)
    }

    /// Edits an itinerary item in place.
    ///
    /// The day number is recomputed from the date; without one the previous
    /// day is kept, and failing that the item's 1-based position is used.
    pub fn update_itinerary_item(
        &self,
        trip_id: &str,
        item_id: &str,
        draft: ItineraryDraft,
    ) -> TripServiceResult<ItineraryItem> {
        let mut trip = self.get_trip(trip_id)?;
        let computed_day = trip.day_number(draft.date);
        let position = trip
            .itinerary
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| TripServiceError::ItemNotFound(item_id.to_string()))?;

        let item = &mut trip.itinerary[position];
        item.title = title_or(&draft.title, DEFAULT_ACTIVITY_TITLE);
        item.date = draft.date;
        item.note = draft.note.trim().to_string();
        item.day = computed_day.or(item.day).or(Some(position as i64 + 1));
        let updated = item.clone();

        self.repo.update_trip(&trip)?;
        Ok(updated)
    }

    pub fn remove_itinerary_item(&self, trip_id: &str, item_id: &str) -> TripServiceResult<()> {
        let mut trip = self.get_trip(trip_id)?;
        let before = trip.itinerary.len();
        trip.itinerary.retain(|item| item.id != item_id);
        if trip.itinerary.len() == before {
            return Err(TripServiceError::ItemNotFound(item_id.to_string()));
        }
        Ok(self.repo.update_trip(&trip)?)
    }

    /// Pins a geocoded place to the trip.
    pub fn add_location(
        &self,
        trip_id: &str,
        place: PlaceSelection,
    ) -> TripServiceResult<TripLocation> {
        let mut trip = self.get_trip(trip_id)?;
        let location = TripLocation {
            id: Uuid::new_v4().to_string(),
            title: place.label.clone(),
            location: place.label,
            lat: Some(place.lat),
            lng: Some(place.lng),
        };
        trip.locations.push(location.clone());
        self.repo.update_trip(&trip)?;
        Ok(location)
    }

    /// Sets an itinerary item's place and coordinates.
    pub fn attach_place_to_item(
        &self,
        trip_id: &str,
        item_id: &str,
        place: PlaceSelection,
    ) -> TripServiceResult<()> {
        let mut trip = self.get_trip(trip_id)?;
        let item = trip
            .find_item_mut(item_id)
            .ok_or_else(|| TripServiceError::ItemNotFound(item_id.to_string()))?;
        item.location = Some(place.label);
        item.lat = Some(place.lat);
        item.lng = Some(place.lng);
        Ok(self.repo.update_trip(&trip)?)
    }

    /// Renames a pinned place. A blank title keeps the old one.
    pub fn rename_location(
        &self,
        trip_id: &str,
        location_id: &str,
        title: &str,
    ) -> TripServiceResult<TripLocation> {
        let mut trip = self.get_trip(trip_id)?;
        let location = trip
            .find_location_mut(location_id)
            .ok_or_else(|| TripServiceError::LocationNotFound(location_id.to_string()))?;
        let trimmed = title.trim();
        if !trimmed.is_empty() {
            location.title = trimmed.to_string();
        }
        let renamed = location.clone();
        self.repo.update_trip(&trip)?;
        Ok(renamed)
    }

    pub fn remove_location(&self, trip_id: &str, location_id: &str) -> TripServiceResult<()> {
        let mut trip = self.get_trip(trip_id)?;
        let before = trip.locations.len();
        trip.locations.retain(|location| location.id != location_id);
        if trip.locations.len() == before {
            return Err(TripServiceError::LocationNotFound(location_id.to_string()));
        }
        Ok(self.repo.update_trip(&trip)?)
    }

    pub fn summary(&self, today: NaiveDate) -> TripServiceResult<TripSummary> {
        let trips = self.repo.list_trips()?;
        Ok(TripSummary {
            total: trips.len(),
            upcoming: trips.iter().filter(|trip| trip.is_upcoming(today)).count(),
        })
    }
}

/// Pins for a trip's 2D map: itinerary items with coordinates, then places.
pub fn map_points(trip: &Trip) -> Vec<MapPoint> {
    let items = trip.itinerary.iter().filter_map(|item| {
        Some(MapPoint {
            id: item.id.clone(),
            label: title_or(&item.title, item.location.as_deref().unwrap_or("Location")),
            lat: item.lat?,
            lng: item.lng?,
        })
    });
    let places = trip.locations.iter().filter_map(|location| {
        Some(MapPoint {
            id: location.id.clone(),
            label: title_or(&location.title, title_or(&location.location, "Place").as_str()),
            lat: location.lat?,
            lng: location.lng?,
        })
    });
    items.chain(places).collect()
}

fn apply_draft(trip: &mut Trip, draft: TripDraft) {
    trip.title = title_or(&draft.title, UNTITLED_TRIP);
    trip.desc = draft.desc.trim().to_string();
    trip.start = draft.start;
    trip.end = draft.end;
    trip.cover_image = draft.cover_image;
    trip.country = draft
        .country
        .map(|country| country.trim().to_string())
        .filter(|country| !country.is_empty());
}

fn title_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
