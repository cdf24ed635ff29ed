//! Shared constants for the azimuth crate.

use std::f64::consts::PI;

// ── Gestures ────────────────────────────────────────────────────

/// Drags shorter than this (in CSS pixels) never become measurements.
pub const MIN_DRAG_PX: f64 = 20.0;

/// Screen-space slop in pixels when clicking on a drawn measurement.
pub const HIT_TOLERANCE_PX: f64 = 8.0;

/// Highest plane number the host can select.
pub const MAX_PLANES: u8 = 8;

// ── Cursors ─────────────────────────────────────────────────────

/// Cursor while the view is locked for drawing.
pub const CURSOR_DRAW: &str = "crosshair";

/// Cursor while the view is unlocked and the imagery can be panned.
pub const CURSOR_PAN: &str = "grab";

/// Cursor while the compass is being dragged.
pub const CURSOR_DRAG_COMPASS: &str = "grabbing";

// ── Bearings ────────────────────────────────────────────────────

/// Angular step used when snapping is enabled.
pub const SNAP_STEP_DEG: f64 = 45.0;

// ── Compass ─────────────────────────────────────────────────────

/// Compass diameter after a reset, in CSS pixels.
pub const COMPASS_DEFAULT_SIZE: f64 = 300.0;

/// Compass opacity after a reset.
pub const COMPASS_DEFAULT_OPACITY: f64 = 0.7;

/// Smallest compass diameter the size control allows.
pub const COMPASS_MIN_SIZE: f64 = 150.0;

/// Largest compass diameter the size control allows.
pub const COMPASS_MAX_SIZE: f64 = 600.0;

/// Gap between the outer and inner compass rings.
pub const COMPASS_RING_GAP: f64 = 10.0;

/// Inset of the N/E/S/W letters from the outer ring.
pub const COMPASS_CARDINAL_INSET: f64 = 30.0;

// ── Measurements ────────────────────────────────────────────────

/// Arrowhead length in CSS pixels.
pub const ARROW_LENGTH: f64 = 15.0;

/// Arrowhead half-angle in radians (30°).
pub const ARROW_ANGLE: f64 = PI / 6.0;

/// Radius of the filled disc marking a segment's start.
pub const START_MARKER_RADIUS: f64 = 6.0;

/// Distance of the azimuth label from the segment midpoint.
pub const LABEL_OFFSET_PX: f64 = 15.0;
