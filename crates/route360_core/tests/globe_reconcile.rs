use route360_core::db::open_db_in_memory;
use route360_core::{
    CountrySource, JournalSession, KeyValueStore, SqliteKeyValueStore, StorageScope, TripDraft,
    VisitedCountryEntry,
};

fn scope() -> StorageScope {
    StorageScope::for_user("traveler")
}

fn draft(title: &str) -> TripDraft {
    TripDraft {
        title: title.to_string(),
        ..TripDraft::default()
    }
}

fn names(entries: &[VisitedCountryEntry]) -> Vec<(&str, CountrySource)> {
    entries
        .iter()
        .map(|entry| (entry.name.as_str(), entry.source))
        .collect()
}

#[test]
fn manual_and_detected_countries_merge_on_mount() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    store
        .set(
            &scope().visited_countries_key(),
            r#"[{"name":"France","source":"manual"}]"#,
        )
        .unwrap();
    store
        .set(
            &scope().trips_key(),
            r#"[{"id":"t1","title":"Japan Autumn Trip"}]"#,
        )
        .unwrap();

    let journal = JournalSession::open(&store, &scope()).unwrap();

    assert_eq!(
        names(journal.globe().visited()),
        vec![
            ("France", CountrySource::Manual),
            ("Japan", CountrySource::TripDerived)
        ]
    );
    let stored = store.get(&scope().visited_countries_key()).unwrap().unwrap();
    assert!(stored.contains(r#""source":"trip""#));
}

#[test]
fn reopening_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    {
        let mut journal = JournalSession::open(&store, &scope()).unwrap();
        journal.create_trip(draft("Trip to Italy")).unwrap();
        journal.globe_mut().add_country("Peru").unwrap();
    }
    let first = store.get(&scope().visited_countries_key()).unwrap();

    let journal = JournalSession::open(&store, &scope()).unwrap();
    let second = store.get(&scope().visited_countries_key()).unwrap();

    assert_eq!(first, second);
    assert_eq!(journal.globe().visited().len(), 2);
}

#[test]
fn renamed_trip_replaces_its_derived_country() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut journal = JournalSession::open(&store, &scope()).unwrap();

    let trip = journal.create_trip(draft("Trip to Italy")).unwrap();
    assert_eq!(
        names(journal.globe().visited()),
        vec![("Italy", CountrySource::TripDerived)]
    );

    journal.update_trip(&trip.id, draft("Trip to Greece")).unwrap();
    assert_eq!(
        names(journal.globe().visited()),
        vec![("Greece", CountrySource::TripDerived)]
    );

    journal.delete_trip(&trip.id).unwrap();
    assert!(journal.globe().visited().is_empty());
}

#[test]
fn manual_countries_outlive_trip_changes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut journal = JournalSession::open(&store, &scope()).unwrap();

    let trip = journal.create_trip(draft("Spain by train")).unwrap();
    assert!(!journal.globe_mut().add_country("Spain ").unwrap());
    assert!(journal.globe_mut().add_country("Peru").unwrap());
    journal.delete_trip(&trip.id).unwrap();

    assert_eq!(
        names(journal.globe().visited()),
        vec![("Peru", CountrySource::Manual)]
    );
}

#[test]
fn removing_a_detected_country_only_lasts_until_resync() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut journal = JournalSession::open(&store, &scope()).unwrap();
    journal.create_trip(draft("Kyoto in Japan")).unwrap();

    let removed = journal.globe_mut().remove_country("japan").unwrap();

    assert_eq!(removed, 1);
    assert_eq!(
        names(journal.globe().visited()),
        vec![("Japan", CountrySource::TripDerived)]
    );
}

#[test]
fn explicit_trip_country_counts_as_visited() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let mut journal = JournalSession::open(&store, &scope()).unwrap();

    journal
        .create_trip(TripDraft {
            title: "Honeymoon".to_string(),
            country: Some("Maldives".to_string()),
            ..TripDraft::default()
        })
        .unwrap();

    assert_eq!(
        names(journal.globe().visited()),
        vec![("Maldives", CountrySource::TripDerived)]
    );
}

#[test]
fn legacy_and_malformed_visited_data_is_tolerated() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store
        .set(
            &scope().visited_countries_key(),
            r#"[{"name":"France"},{"name":"Japan","source":null}]"#,
        )
        .unwrap();
    let journal = JournalSession::open(&store, &scope()).unwrap();
    assert_eq!(
        names(journal.globe().visited()),
        vec![("France", CountrySource::Manual), ("Japan", CountrySource::Manual)]
    );
    drop(journal);

    store
        .set(&scope().visited_countries_key(), "{not json")
        .unwrap();
    let journal = JournalSession::open(&store, &scope()).unwrap();
    assert!(journal.globe().visited().is_empty());
}

#[test]
fn users_do_not_see_each_other_countries() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let alice = StorageScope::for_user("alice");
    let bob = StorageScope::for_user("bob");

    let mut journal = JournalSession::open(&store, &alice).unwrap();
    journal.globe_mut().add_country("Chile").unwrap();
    drop(journal);

    let journal = JournalSession::open(&store, &bob).unwrap();
    assert!(journal.globe().visited().is_empty());
}

#[test]
fn one_bad_visited_element_does_not_erase_manual_countries() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    store
        .set(
            &scope().visited_countries_key(),
            r#"[{"name":"France","source":"manual"},null,{"name":"Peru","source":"wishlist"}]"#,
        )
        .unwrap();

    let journal = JournalSession::open(&store, &scope()).unwrap();

    assert_eq!(
        names(journal.globe().visited()),
        vec![("France", CountrySource::Manual), ("Peru", CountrySource::Manual)]
    );
    let stored = store.get(&scope().visited_countries_key()).unwrap().unwrap();
    assert!(stored.contains("France"));
    assert!(stored.contains("Peru"));
}
