//! Hit-testing against drawn measurements.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::Measurement;
use crate::geometry::{self, Point};

/// Index of the measurement under `pt`, preferring the most recently drawn
/// (topmost) one when segments overlap.
#[must_use]
pub fn hit_measurement(pt: Point, measurements: &[Measurement], tolerance: f64) -> Option<usize> {
    measurements
        .iter()
        .enumerate()
        .rev()
        .find(|(_, m)| geometry::distance_to_segment(pt, m.start, m.end) <= tolerance)
        .map(|(idx, _)| idx)
}
