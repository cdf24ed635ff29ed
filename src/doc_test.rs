#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn make_measurement(plane: u8, azimuth: u16) -> Measurement {
    Measurement {
        id: Uuid::new_v4(),
        start: Point::new(0.0, 0.0),
        end: Point::new(0.0, -50.0),
        plane,
        azimuth,
    }
}

// =============================================================
// Measurement
// =============================================================

#[test]
fn from_drag_computes_azimuth() {
    let m = Measurement::from_drag(Point::new(100.0, 100.0), Point::new(150.0, 100.0), 2, false);
    assert_eq!(m.azimuth, 90);
    assert_eq!(m.plane, 2);
    assert!(m.id.is_nil());
}

#[test]
fn from_drag_respects_snap() {
    let m = Measurement::from_drag(Point::new(100.0, 100.0), Point::new(110.0, 60.0), 1, true);
    assert_eq!(m.azimuth, 0);
}

#[test]
fn label_and_summary_line() {
    let m = make_measurement(3, 135);
    assert_eq!(m.cardinal(), Cardinal::SE);
    assert_eq!(m.label(), "135° SE");
    assert_eq!(m.summary_line(), "Plane 3: 135° SE");
}

#[test]
fn measurement_serde_roundtrip_keeps_fields() {
    let m = make_measurement(4, 270);
    let json = serde_json::to_string(&m).unwrap();
    let back: Measurement = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

// =============================================================
// MeasurementStore: add
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = MeasurementStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.get().is_empty());
}

#[test]
fn add_assigns_id_when_nil() {
    let mut store = MeasurementStore::new();
    let id = store.add(Measurement::from_drag(Point::new(0.0, 0.0), Point::new(0.0, -30.0), 1, false));
    assert!(!id.is_nil());
    assert_eq!(store.get()[0].id, id);
}

#[test]
fn add_keeps_supplied_id() {
    let mut store = MeasurementStore::new();
    let m = make_measurement(1, 0);
    let id = store.add(m);
    assert_eq!(id, m.id);
}

#[test]
fn add_never_reuses_ids() {
    let mut store = MeasurementStore::new();
    let draft = Measurement::from_drag(Point::new(0.0, 0.0), Point::new(0.0, -30.0), 1, false);
    let a = store.add(draft);
    let b = store.add(draft);
    assert_ne!(a, b);
}

#[test]
fn add_preserves_insertion_order() {
    let mut store = MeasurementStore::new();
    store.add(make_measurement(1, 10));
    store.add(make_measurement(2, 20));
    store.add(make_measurement(3, 30));
    let azimuths: Vec<u16> = store.get().iter().map(|m| m.azimuth).collect();
    assert_eq!(azimuths, [10, 20, 30]);
}

// =============================================================
// MeasurementStore: remove / clear / replace
// =============================================================

#[test]
fn remove_at_returns_removed() {
    let mut store = MeasurementStore::new();
    store.add(make_measurement(1, 10));
    store.add(make_measurement(2, 20));
    let removed = store.remove_at(0).unwrap();
    assert_eq!(removed.azimuth, 10);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get()[0].azimuth, 20);
}

#[test]
fn remove_at_out_of_range_is_none() {
    let mut store = MeasurementStore::new();
    store.add(make_measurement(1, 10));
    assert!(store.remove_at(5).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn clear_empties_store() {
    let mut store = MeasurementStore::new();
    store.add(make_measurement(1, 10));
    store.add(make_measurement(1, 20));
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn replace_all_swaps_collection() {
    let mut store = MeasurementStore::new();
    store.add(make_measurement(1, 10));
    let replacement = vec![make_measurement(5, 200), make_measurement(6, 300)];
    store.replace_all(replacement.clone());
    assert_eq!(store.get(), replacement.as_slice());
}

#[test]
fn snapshot_is_independent_of_later_mutation() {
    let mut store = MeasurementStore::new();
    store.add(make_measurement(1, 10));
    let snap = store.snapshot();
    store.clear();
    assert_eq!(snap.len(), 1);
    assert!(store.is_empty());
}

#[test]
fn planes_may_repeat() {
    let mut store = MeasurementStore::new();
    store.add(make_measurement(2, 10));
    store.add(make_measurement(2, 20));
    assert_eq!(store.len(), 2);
    assert!(store.get().iter().all(|m| m.plane == 2));
}

#[test]
fn get_index_bounds() {
    let mut store = MeasurementStore::new();
    store.add(make_measurement(1, 10));
    assert_eq!(store.get_index(0).map(|m| m.azimuth), Some(10));
    assert!(store.get_index(1).is_none());
}
