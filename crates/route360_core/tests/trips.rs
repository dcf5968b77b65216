use chrono::NaiveDate;
use route360_core::db::open_db_in_memory;
use route360_core::model::trip::{DEFAULT_ACTIVITY_TITLE, UNTITLED_TRIP};
use route360_core::repo::KvTripRepository;
use route360_core::{
    map_points, ItineraryDraft, KeyValueStore, MemoryKeyValueStore, PlaceSelection,
    SqliteKeyValueStore, StorageScope, TripDraft, TripService, TripServiceError,
    TripValidationError,
};

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn lisbon_draft() -> TripDraft {
    TripDraft {
        title: "  Portugal coast ".to_string(),
        start: Some(date("2024-05-10")),
        end: Some(date("2024-05-16")),
        ..TripDraft::default()
    }
}

#[test]
fn trips_are_listed_newest_first_and_persist_in_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let scope = StorageScope::for_user("u1");
    let service = TripService::new(KvTripRepository::new(&store, &scope));

    let first = service.create_trip(lisbon_draft()).unwrap();
    let second = service.create_trip(TripDraft::default()).unwrap();

    let trips = service.list_trips().unwrap();
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].id, second.id);
    assert_eq!(trips[0].title, UNTITLED_TRIP);
    assert_eq!(trips[1].title, "Portugal coast");
    assert_eq!(trips[1].id, first.id);

    let raw = store.get(&scope.trips_key()).unwrap().unwrap();
    assert!(raw.contains(r#""start":"2024-05-10""#));
    assert!(raw.contains(r#""coverDataUrl":"""#));
}

#[test]
fn end_before_start_is_rejected() {
    let store = MemoryKeyValueStore::new();
    let service = TripService::new(KvTripRepository::new(&store, &StorageScope::new("t_")));

    let err = service
        .create_trip(TripDraft {
            start: Some(date("2024-05-10")),
            end: Some(date("2024-05-01")),
            ..TripDraft::default()
        })
        .unwrap_err();

    assert!(matches!(
        err,
        TripServiceError::Validation(TripValidationError::EndBeforeStart { .. })
    ));
    assert!(service.list_trips().unwrap().is_empty());
}

#[test]
fn itinerary_items_get_day_numbers_and_default_titles() {
    let store = MemoryKeyValueStore::new();
    let service = TripService::new(KvTripRepository::new(&store, &StorageScope::new("t_")));
    let trip = service.create_trip(lisbon_draft()).unwrap();

    let dated = service
        .add_itinerary_item(
            &trip.id,
            ItineraryDraft {
                title: "Tram 28".to_string(),
                date: Some(date("2024-05-12")),
                note: String::new(),
            },
        )
        .unwrap();
    let undated = service
        .add_itinerary_item(&trip.id, ItineraryDraft::default())
        .unwrap();

    assert_eq!(dated.day, Some(3));
    assert_eq!(undated.title, DEFAULT_ACTIVITY_TITLE);
    assert_eq!(undated.day, None);

    let edited = service
        .update_itinerary_item(&trip.id, &undated.id, ItineraryDraft::default())
        .unwrap();
    assert_eq!(edited.day, Some(2));

    let eve = service
        .update_itinerary_item(
            &trip.id,
            &dated.id,
            ItineraryDraft {
                title: "Arrival dinner".to_string(),
                date: Some(date("2024-05-09")),
                note: String::new(),
            },
        )
        .unwrap();
    assert_eq!(eve.day, Some(3));
    let added_on_eve = service
        .add_itinerary_item(
            &trip.id,
            ItineraryDraft {
                date: Some(date("2024-05-09")),
                ..ItineraryDraft::default()
            },
        )
        .unwrap();
    assert_eq!(added_on_eve.day, None);
}

#[test]
fn places_feed_map_points() {
    let store = MemoryKeyValueStore::new();
    let service = TripService::new(KvTripRepository::new(&store, &StorageScope::new("t_")));
    let trip = service.create_trip(lisbon_draft()).unwrap();
    let item = service
        .add_itinerary_item(&trip.id, ItineraryDraft::default())
        .unwrap();

    service
        .attach_place_to_item(
            &trip.id,
            &item.id,
            PlaceSelection {
                label: "Belem Tower, Lisbon".to_string(),
                lat: 38.6916,
                lng: -9.2160,
            },
        )
        .unwrap();
    let location = service
        .add_location(
            &trip.id,
            PlaceSelection {
                label: "Porto, Portugal".to_string(),
                lat: 41.1579,
                lng: -8.6291,
            },
        )
        .unwrap();
    service
        .rename_location(&trip.id, &location.id, "Porto")
        .unwrap();

    let points = map_points(&service.get_trip(&trip.id).unwrap());
    let labels: Vec<&str> = points.iter().map(|point| point.label.as_str()).collect();
    assert_eq!(labels, vec![DEFAULT_ACTIVITY_TITLE, "Porto"]);
    assert_eq!(points[1].lat, 41.1579);
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let store = MemoryKeyValueStore::new();
    let service = TripService::new(KvTripRepository::new(&store, &StorageScope::new("t_")));
    let trip = service.create_trip(lisbon_draft()).unwrap();

    let err = service
        .add_location(
            &trip.id,
            PlaceSelection {
                label: "Nowhere".to_string(),
                lat: 123.0,
                lng: 0.0,
            },
        )
        .unwrap_err();

    assert!(matches!(
        err,
        TripServiceError::Validation(TripValidationError::InvalidCoordinate { .. })
    ));
    assert!(service.get_trip(&trip.id).unwrap().locations.is_empty());
}

#[test]
fn missing_ids_are_reported() {
    let store = MemoryKeyValueStore::new();
    let service = TripService::new(KvTripRepository::new(&store, &StorageScope::new("t_")));
    let trip = service.create_trip(lisbon_draft()).unwrap();

    assert!(matches!(
        service.delete_trip("nope"),
        Err(TripServiceError::TripNotFound(_))
    ));
    assert!(matches!(
        service.remove_itinerary_item(&trip.id, "nope"),
        Err(TripServiceError::ItemNotFound(_))
    ));
    assert!(matches!(
        service.remove_location(&trip.id, "nope"),
        Err(TripServiceError::LocationNotFound(_))
    ));
}

#[test]
fn summary_counts_upcoming_trips() {
    let store = MemoryKeyValueStore::new();
    let service = TripService::new(KvTripRepository::new(&store, &StorageScope::new("t_")));
    service.create_trip(lisbon_draft()).unwrap();
    service.create_trip(TripDraft::default()).unwrap();

    let summary = service.summary(date("2024-05-16")).unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.upcoming, 1);

    let later = service.summary(date("2024-05-17")).unwrap();
    assert_eq!(later.upcoming, 0);
}

#[test]
fn odd_stored_trip_survives_later_writes() {
    let store = MemoryKeyValueStore::new();
    let scope = StorageScope::new("t_");
    store
        .set(
            &scope.trips_key(),
            r#"[{"id":"t_1","title":"Japan Trip",
                 "locations":[{"id":"l_1","title":"Kyoto","location":"Kyoto","lat":null,"lng":135.76}]},
                {"title":"no id here"}]"#,
        )
        .unwrap();
    let service = TripService::new(KvTripRepository::new(&store, &scope));

    let listed = service.list_trips().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "t_1");
    assert!(map_points(&listed[0]).is_empty());

    let peru = service
        .create_trip(TripDraft {
            title: "Peru".to_string(),
            ..TripDraft::default()
        })
        .unwrap();

    let ids: Vec<String> = service
        .list_trips()
        .unwrap()
        .into_iter()
        .map(|trip| trip.id)
        .collect();
    assert_eq!(ids, vec![peru.id, "t_1".to_string()]);
    let raw = store.get(&scope.trips_key()).unwrap().unwrap();
    assert!(raw.contains("no id here"));
}
