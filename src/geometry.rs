//! Geometry: points, compass bearings, and cardinal directions.
//!
//! Everything here is a pure function over drawing-surface coordinates. The
//! surface's y axis grows downward, while compass bearings grow clockwise
//! from "up", so bearings invert the vertical delta before calling `atan2`.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::SNAP_STEP_DEG;

/// A point in the drawing surface's local space, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// One of the eight compass points, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinal {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Cardinal {
    /// All eight directions, starting at north.
    pub const ALL: [Cardinal; 8] = [
        Cardinal::N,
        Cardinal::NE,
        Cardinal::E,
        Cardinal::SE,
        Cardinal::S,
        Cardinal::SW,
        Cardinal::W,
        Cardinal::NW,
    ];

    /// Short label, e.g. `"NE"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compass bearing of the segment `start -> end`, in whole degrees `[0, 360)`.
///
/// With `snap` set the raw angle is first rounded to the nearest multiple of
/// 45°. A bearing that rounds up to 360 is reported as 0.
///
/// Precondition: `start != end`. The bearing of a zero-length segment is
/// undefined; the gesture handler rejects drags shorter than
/// [`crate::consts::MIN_DRAG_PX`] before calling this.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bearing(start: Point, end: Point, snap: bool) -> u16 {
    let dx = end.x - start.x;
    let dy = start.y - end.y;
    let mut angle = dx.atan2(dy).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    if snap {
        angle = snap_to_45(angle);
    }
    // rem_euclid keeps the value in [0, 360) so the cast cannot wrap.
    angle.round().rem_euclid(360.0) as u16
}

/// Round an angle in degrees to the nearest multiple of 45.
#[must_use]
pub fn snap_to_45(degrees: f64) -> f64 {
    (degrees / SNAP_STEP_DEG).round() * SNAP_STEP_DEG
}

/// The compass point nearest to `degrees`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cardinal(degrees: f64) -> Cardinal {
    let sector = (degrees.rem_euclid(360.0) / SNAP_STEP_DEG).round() as usize % 8;
    Cardinal::ALL[sector]
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Shortest distance from `p` to the segment `a..b`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let len_sq = vx.mul_add(vx, vy * vy);
    if len_sq < f64::EPSILON {
        return distance(p, a);
    }
    let t = ((p.x - a.x).mul_add(vx, (p.y - a.y) * vy) / len_sq).clamp(0.0, 1.0);
    distance(p, Point::new(t.mul_add(vx, a.x), t.mul_add(vy, a.y)))
}
