use uuid::Uuid;

use super::*;

fn segment(ax: f64, ay: f64, bx: f64, by: f64) -> Measurement {
    Measurement {
        id: Uuid::new_v4(),
        start: Point::new(ax, ay),
        end: Point::new(bx, by),
        plane: 1,
        azimuth: geometry::bearing(Point::new(ax, ay), Point::new(bx, by), false),
    }
}

// =============================================================
// hit_measurement
// =============================================================

#[test]
fn hit_on_segment_body() {
    let ms = [segment(0.0, 0.0, 100.0, 0.0)];
    assert_eq!(hit_measurement(Point::new(50.0, 3.0), &ms, 8.0), Some(0));
}

#[test]
fn miss_outside_tolerance() {
    let ms = [segment(0.0, 0.0, 100.0, 0.0)];
    assert_eq!(hit_measurement(Point::new(50.0, 9.0), &ms, 8.0), None);
}

#[test]
fn miss_past_endpoint() {
    let ms = [segment(0.0, 0.0, 100.0, 0.0)];
    assert_eq!(hit_measurement(Point::new(120.0, 0.0), &ms, 8.0), None);
}

#[test]
fn overlapping_prefers_topmost() {
    let ms = [segment(0.0, 0.0, 100.0, 0.0), segment(50.0, -50.0, 50.0, 50.0)];
    assert_eq!(hit_measurement(Point::new(50.0, 0.0), &ms, 8.0), Some(1));
}

#[test]
fn empty_collection_never_hits() {
    assert_eq!(hit_measurement(Point::new(0.0, 0.0), &[], 8.0), None);
}
