//! Integration tests for comfreight-store
//!
//! These tests exercise the store through the `ShipmentStore` trait only.

use chrono::{TimeZone, Utc};
use comfreight_domain::traits::ShipmentStore;
use comfreight_domain::{
    AiAnalysis, ExceptionRecord, NewShipment, ShipmentStatus, TrackingId, CREATED_DETAILS,
};
use comfreight_store::{InMemoryStore, StoreError};

fn la_to_ny() -> NewShipment {
    NewShipment::new("LA", "NY", "X", "2024-08-01")
}

fn is_tracking_id(text: &str) -> bool {
    text.len() == 9 && text.starts_with("CFT-") && text[4..].bytes().all(|b| b.is_ascii_digit())
}

#[test]
fn test_seeded_store_has_four_shipments() {
    let store = InMemoryStore::seeded();
    assert_eq!(store.list().len(), 4);
}

#[test]
fn test_create_shape() {
    let mut store = InMemoryStore::new();

    let shipment = store.create(la_to_ny()).unwrap();

    assert_eq!(shipment.status, ShipmentStatus::Pending);
    assert_eq!(shipment.history.len(), 1);
    assert_eq!(shipment.exceptions.len(), 0);
    assert!(is_tracking_id(&shipment.id.to_string()), "bad id {}", shipment.id);
    assert_eq!(
        shipment.estimated_delivery,
        Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_list_is_newest_first() {
    let mut store = InMemoryStore::seeded();

    let mut created = Vec::new();
    for carrier in ["A", "B", "C"] {
        let shipment = store
            .create(NewShipment::new("LA", "NY", carrier, "2024-08-01"))
            .unwrap();
        created.push(shipment.id);
    }

    let listed: Vec<TrackingId> = store.list().iter().map(|s| s.id).collect();
    assert_eq!(listed.len(), 7);
    assert_eq!(&listed[..3], &[created[2], created[1], created[0]]);
    assert_eq!(listed[3].to_string(), "CFT-84620");
}

#[test]
fn test_list_is_idempotent() {
    let store = InMemoryStore::seeded();
    assert_eq!(store.list(), store.list());
}

#[test]
fn test_ids_are_unique() {
    let mut store = InMemoryStore::new();
    for _ in 0..200 {
        store.create(la_to_ny()).unwrap();
    }

    let mut ids: Vec<TrackingId> = store.list().iter().map(|s| s.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[test]
fn test_log_exception_effects() {
    let mut store = InMemoryStore::seeded();
    let target = store.list()[2].clone();
    assert_eq!(target.status, ShipmentStatus::Delivered);

    let ts = Utc.with_ymd_and_hms(2024, 7, 21, 8, 0, 0).unwrap();
    let exception = ExceptionRecord::new(ts, "Wrong pallet delivered").with_analysis(
        AiAnalysis::new("Other", vec!["Contact consignee".to_string()]),
    );

    let updated = store.log_exception(target.id, exception.clone()).unwrap();

    assert_eq!(updated.status, ShipmentStatus::Exception);
    assert_eq!(updated.exceptions.len(), target.exceptions.len() + 1);
    assert_eq!(updated.exceptions.last(), Some(&exception));
    assert_ne!(updated.last_update, target.last_update);

    assert_eq!(updated.id, target.id);
    assert_eq!(updated.origin, target.origin);
    assert_eq!(updated.destination, target.destination);
    assert_eq!(updated.carrier, target.carrier);
    assert_eq!(updated.created_date, target.created_date);
    assert_eq!(updated.estimated_delivery, target.estimated_delivery);
    assert_eq!(updated.history, target.history);

    assert_eq!(store.get(target.id), Some(updated));
}

#[test]
fn test_log_exception_unknown_id_changes_nothing() {
    let mut store = InMemoryStore::seeded();
    let before = store.list();
    let missing = TrackingId::from_number(12345).unwrap();

    let ts = Utc.with_ymd_and_hms(2024, 7, 21, 8, 0, 0).unwrap();
    let result = store.log_exception(missing, ExceptionRecord::new(ts, "Box crushed"));

    assert_eq!(result, Err(StoreError::NotFound(missing)));
    assert_eq!(store.list(), before);
}

#[test]
fn test_exception_invariant_holds_after_mutations() {
    let mut store = InMemoryStore::seeded();
    let created = store.create(la_to_ny()).unwrap();
    let ts = Utc.with_ymd_and_hms(2024, 7, 21, 8, 0, 0).unwrap();
    store
        .log_exception(created.id, ExceptionRecord::new(ts, "Late pickup"))
        .unwrap();

    for shipment in store.list() {
        if !shipment.exceptions.is_empty() {
            assert_eq!(shipment.status, ShipmentStatus::Exception);
        }
    }
}

#[test]
fn test_search_matches_id_origin_destination() {
    let store = InMemoryStore::seeded();

    let by_id: Vec<String> = store.search("cft-519").iter().map(|s| s.id.to_string()).collect();
    assert_eq!(by_id, vec!["CFT-51983"]);

    let by_origin = store.search("boston");
    assert_eq!(by_origin.len(), 1);
    assert_eq!(by_origin[0].origin, "Boston, MA");

    let by_destination = store.search("NY");
    assert_eq!(by_destination.len(), 1);
    assert_eq!(by_destination[0].destination, "New York, NY");

    // carrier is not searched
    assert!(store.search("FastLane").is_empty());
}

#[test]
fn test_search_keeps_list_order() {
    let store = InMemoryStore::seeded();
    let ids: Vec<String> = store.search(", ca").iter().map(|s| s.id.to_string()).collect();
    assert_eq!(ids, vec!["CFT-84620", "CFT-91125"]);
}

#[test]
fn test_end_to_end_create_then_log() {
    let mut store = InMemoryStore::new();
    store.create(la_to_ny()).unwrap();

    let first = &store.list()[0];
    assert_eq!(first.status, ShipmentStatus::Pending);
    assert_eq!(first.history[0].details, CREATED_DETAILS);

    let t = Utc.with_ymd_and_hms(2024, 7, 30, 10, 0, 0).unwrap();
    let id = first.id;
    store
        .log_exception(id, ExceptionRecord::new(t, "Box crushed"))
        .unwrap();

    let first = &store.list()[0];
    assert_eq!(first.status, ShipmentStatus::Exception);
    assert_eq!(first.exceptions, vec![ExceptionRecord::new(t, "Box crushed")]);
}
