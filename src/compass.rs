//! Precision compass overlay configuration.
//!
//! The compass is a measurement aid drawn over the imagery, not measurement
//! data: nothing here is pushed to history or persisted with a save. Its
//! position is an offset from the center of the view so the compass stays
//! centered across resizes until the user drags it.

#[cfg(test)]
#[path = "compass_test.rs"]
mod compass_test;

use serde::{Deserialize, Serialize};

use crate::consts::{COMPASS_DEFAULT_OPACITY, COMPASS_DEFAULT_SIZE, COMPASS_MAX_SIZE, COMPASS_MIN_SIZE};
use crate::geometry::{self, Point};

/// Ink color for the compass rings, ticks, and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompassColor {
    #[default]
    White,
    Black,
    Orange,
    Blue,
}

impl CompassColor {
    /// CSS color used for strokes and text.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::White => "#FFFFFF",
            Self::Black => "#000000",
            Self::Orange => "#F97316",
            Self::Blue => "#0000FF",
        }
    }
}

/// Compass overlay state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompassOverlay {
    /// Whether the compass is drawn at all. Off by default.
    pub visible: bool,
    /// Offset of the compass center from the view center, in CSS pixels.
    pub position: Point,
    /// Diameter in CSS pixels.
    pub size: f64,
    /// Global alpha applied to the whole compass, `[0, 1]`.
    pub opacity: f64,
    pub color: CompassColor,
}

impl Default for CompassOverlay {
    fn default() -> Self {
        Self {
            visible: false,
            position: Point::new(0.0, 0.0),
            size: COMPASS_DEFAULT_SIZE,
            opacity: COMPASS_DEFAULT_OPACITY,
            color: CompassColor::default(),
        }
    }
}

impl CompassOverlay {
    /// Move the compass; `offset` is relative to the view center.
    pub fn set_position(&mut self, offset: Point) {
        self.position = offset;
    }

    /// Set the diameter, clamped to the range the size control offers.
    pub fn set_size(&mut self, size: f64) {
        if size.is_finite() {
            self.size = size.clamp(COMPASS_MIN_SIZE, COMPASS_MAX_SIZE);
        }
    }

    /// Set the opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f64) {
        if opacity.is_finite() {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    pub fn set_color(&mut self, color: CompassColor) {
        self.color = color;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    /// Re-center and restore default size and opacity. Color and visibility
    /// are left as they are.
    pub fn reset(&mut self) {
        self.reset_to(COMPASS_DEFAULT_SIZE, COMPASS_DEFAULT_OPACITY);
    }

    /// Like [`Self::reset`] with explicit defaults (from the engine config).
    pub fn reset_to(&mut self, size: f64, opacity: f64) {
        self.position = Point::new(0.0, 0.0);
        self.size = size;
        self.opacity = opacity;
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.size * 0.5
    }

    /// Absolute center of the compass in a view of the given size.
    #[must_use]
    pub fn center(&self, viewport_w: f64, viewport_h: f64) -> Point {
        Point::new(viewport_w * 0.5 + self.position.x, viewport_h * 0.5 + self.position.y)
    }

    /// Whether `pt` falls strictly inside the outer ring.
    #[must_use]
    pub fn contains(&self, pt: Point, viewport_w: f64, viewport_h: f64) -> bool {
        geometry::distance(pt, self.center(viewport_w, viewport_h)) < self.radius()
    }
}
