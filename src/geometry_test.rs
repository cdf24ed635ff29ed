#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// bearing
// =============================================================

#[test]
fn bearing_straight_up_is_north() {
    assert_eq!(bearing(pt(0.0, 0.0), pt(0.0, -10.0), false), 0);
}

#[test]
fn bearing_straight_right_is_east() {
    assert_eq!(bearing(pt(0.0, 0.0), pt(10.0, 0.0), false), 90);
}

#[test]
fn bearing_straight_down_is_south() {
    assert_eq!(bearing(pt(0.0, 0.0), pt(0.0, 10.0), false), 180);
}

#[test]
fn bearing_straight_left_is_west() {
    assert_eq!(bearing(pt(0.0, 0.0), pt(-10.0, 0.0), false), 270);
}

#[test]
fn bearing_diagonals() {
    assert_eq!(bearing(pt(0.0, 0.0), pt(10.0, -10.0), false), 45);
    assert_eq!(bearing(pt(0.0, 0.0), pt(10.0, 10.0), false), 135);
    assert_eq!(bearing(pt(0.0, 0.0), pt(-10.0, 10.0), false), 225);
    assert_eq!(bearing(pt(0.0, 0.0), pt(-10.0, -10.0), false), 315);
}

#[test]
fn bearing_rounds_to_whole_degrees() {
    // atan2(10, 40) ≈ 14.036°
    assert_eq!(bearing(pt(100.0, 100.0), pt(110.0, 60.0), false), 14);
}

#[test]
fn bearing_just_west_of_north_wraps_to_zero() {
    // ≈ 359.7° rounds to 360, reported as 0.
    assert_eq!(bearing(pt(0.0, 0.0), pt(-0.5, -100.0), false), 0);
}

#[test]
fn bearing_always_in_range() {
    let center = pt(50.0, 50.0);
    for i in 0..720 {
        let theta = f64::from(i) * 0.5_f64.to_radians();
        let end = pt(50.0 + 30.0 * theta.cos(), 50.0 + 30.0 * theta.sin());
        let b = bearing(center, end, false);
        assert!(b < 360, "bearing {b} out of range at step {i}");
    }
}

// =============================================================
// Snapping
// =============================================================

#[test]
fn bearing_snapped_is_multiple_of_45() {
    let center = pt(0.0, 0.0);
    for i in 0..360 {
        let theta = f64::from(i).to_radians();
        let end = pt(25.0 * theta.cos(), 25.0 * theta.sin());
        let b = bearing(center, end, true);
        assert_eq!(b % 45, 0, "snapped bearing {b} at step {i}");
        assert!(b < 360);
    }
}

#[test]
fn bearing_snap_pulls_small_angle_to_north() {
    assert_eq!(bearing(pt(100.0, 100.0), pt(110.0, 60.0), true), 0);
}

#[test]
fn bearing_snap_near_full_turn_is_north() {
    // ≈ 340° snaps to 360, which wraps to 0.
    assert_eq!(bearing(pt(0.0, 0.0), pt(-10.0, -30.0), true), 0);
}

#[test]
fn snap_to_45_rounds_to_nearest_step() {
    assert_eq!(snap_to_45(22.4), 0.0);
    assert_eq!(snap_to_45(22.6), 45.0);
    assert_eq!(snap_to_45(100.0), 90.0);
    assert_eq!(snap_to_45(350.0), 360.0);
}

// =============================================================
// Cardinal
// =============================================================

#[test]
fn cardinal_primary_directions() {
    assert_eq!(cardinal(0.0), Cardinal::N);
    assert_eq!(cardinal(90.0), Cardinal::E);
    assert_eq!(cardinal(180.0), Cardinal::S);
    assert_eq!(cardinal(270.0), Cardinal::W);
}

#[test]
fn cardinal_intercardinal_directions() {
    assert_eq!(cardinal(45.0), Cardinal::NE);
    assert_eq!(cardinal(135.0), Cardinal::SE);
    assert_eq!(cardinal(225.0), Cardinal::SW);
    assert_eq!(cardinal(315.0), Cardinal::NW);
}

#[test]
fn cardinal_wraps_near_full_turn() {
    assert_eq!(cardinal(359.0), Cardinal::N);
    assert_eq!(cardinal(338.0), Cardinal::N);
    assert_eq!(cardinal(337.0), Cardinal::NW);
}

#[test]
fn cardinal_display_matches_abbreviation() {
    assert_eq!(Cardinal::N.to_string(), "N");
    assert_eq!(Cardinal::SW.to_string(), "SW");
    assert_eq!(format!("{}", cardinal(90.0)), "E");
}

#[test]
fn cardinal_all_starts_at_north_clockwise() {
    let labels: Vec<&str> = Cardinal::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(labels, ["N", "NE", "E", "SE", "S", "SW", "W", "NW"]);
}

// =============================================================
// Distance
// =============================================================

#[test]
fn distance_is_euclidean() {
    assert_eq!(distance(pt(0.0, 0.0), pt(3.0, 4.0)), 5.0);
}

#[test]
fn distance_to_segment_perpendicular() {
    let d = distance_to_segment(pt(5.0, 3.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert!((d - 3.0).abs() < 1e-9);
}

#[test]
fn distance_to_segment_clamps_to_endpoints() {
    let d = distance_to_segment(pt(13.0, 4.0), pt(0.0, 0.0), pt(10.0, 0.0));
    assert!((d - 5.0).abs() < 1e-9);
}

#[test]
fn distance_to_degenerate_segment_is_point_distance() {
    let d = distance_to_segment(pt(3.0, 4.0), pt(0.0, 0.0), pt(0.0, 0.0));
    assert!((d - 5.0).abs() < 1e-9);
}

#[test]
fn point_midpoint() {
    assert_eq!(pt(0.0, 0.0).midpoint(pt(10.0, -4.0)), pt(5.0, -2.0));
}

#[test]
fn point_serde_shape() {
    let json = serde_json::to_value(pt(1.5, -2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}
