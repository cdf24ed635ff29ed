//! Rendering: draws the compass overlay and all measurements to a 2D surface.
//!
//! This module is the only place that issues drawing commands. It receives a
//! read-only [`Scene`] and produces pixels; it does not mutate any
//! application state, so it can be driven directly from tests with a
//! recording [`Surface`].
//!
//! All coordinates are CSS pixels. [`draw`] installs a uniform `dpr` scale
//! first, so the backing buffer (sized `display × dpr` by the host) stays
//! sharp on high-density displays.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::{FRAC_PI_2, PI};

use crate::compass::CompassOverlay;
use crate::config::EngineConfig;
use crate::consts::{
    ARROW_ANGLE, ARROW_LENGTH, COMPASS_CARDINAL_INSET, COMPASS_RING_GAP, START_MARKER_RADIUS,
};
use crate::doc::Measurement;
use crate::geometry::{self, Point};
use crate::input::{InputState, UiState};
use crate::surface::Surface;

const NORTH_ARROW_COLOR: &str = "#EF4444";
const LABEL_FILL: &str = "#1F2937";
const LABEL_OUTLINE: &str = "#FFFFFF";
const LABEL_OUTLINE_WIDTH: f64 = 4.0;

const LINE_WIDTH: f64 = 2.0;
const SELECTED_LINE_WIDTH: f64 = 4.0;
const PREVIEW_LINE_WIDTH: f64 = 3.0;
const PREVIEW_DASH: [f64; 2] = [5.0, 5.0];

/// Everything the renderer reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub measurements: &'a [Measurement],
    pub compass: &'a CompassOverlay,
    pub ui: &'a UiState,
    pub input: &'a InputState,
    pub config: &'a EngineConfig,
    /// Display width in CSS pixels.
    pub viewport_w: f64,
    /// Display height in CSS pixels.
    pub viewport_h: f64,
    /// Device pixel ratio.
    pub dpr: f64,
}

/// Draw the full overlay: clear, compass, measurements, in-progress segment.
///
/// # Errors
///
/// Returns `Err` if any surface call fails (e.g. invalid context state).
pub fn draw<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    // Layer 0: reset transform to the device scale and clear.
    surface.set_transform(scene.dpr, 0.0, 0.0, scene.dpr, 0.0, 0.0)?;
    surface.clear_rect(0.0, 0.0, scene.viewport_w, scene.viewport_h);
    draw_layers(surface, scene)
}

/// Draw the overlay layers without clearing, over whatever the surface holds.
///
/// Used when compositing the overlay onto base imagery. The caller is
/// responsible for the transform.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn draw_layers<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    // Layer 1: compass.
    if scene.compass.visible {
        let center = scene.compass.center(scene.viewport_w, scene.viewport_h);
        draw_compass(surface, scene.compass, center)?;
    }

    // Layer 2: committed measurements in insertion order.
    for (idx, m) in scene.measurements.iter().enumerate() {
        let style = if scene.ui.selected == Some(idx) {
            SegmentStyle::Selected
        } else {
            SegmentStyle::Normal
        };
        draw_measurement(surface, m, style, scene)?;
    }

    // Layer 3: in-progress drag preview.
    if let Some((start, current)) = scene.input.drawing_segment() {
        let preview = Measurement {
            id: uuid::Uuid::nil(),
            start,
            end: current,
            plane: scene.ui.plane,
            azimuth: geometry::bearing(start, current, scene.ui.snap_enabled),
        };
        draw_measurement(surface, &preview, SegmentStyle::Preview, scene)?;
    }

    Ok(())
}

// =============================================================
// Compass
// =============================================================

/// Tick tiers: (every N degrees, tick length, stroke width). Coarsest first.
const TICK_TIERS: [(u32, f64, f64); 4] = [(30, 25.0, 2.5), (10, 18.0, 1.5), (5, 12.0, 1.0), (1, 7.0, 0.5)];

fn draw_compass<S: Surface>(surface: &mut S, compass: &CompassOverlay, center: Point) -> Result<(), S::Error> {
    let radius = compass.radius();
    let ink = compass.color.css();

    surface.save();
    surface.set_global_alpha(compass.opacity);

    // Rings.
    surface.set_stroke_style(ink);
    surface.set_line_width(3.0);
    for r in [radius, radius - COMPASS_RING_GAP] {
        surface.begin_path();
        surface.arc(center.x, center.y, r.max(0.0), 0.0, 2.0 * PI)?;
        surface.stroke();
    }

    // Cardinal letters.
    surface.set_font(&format!("bold {}px Arial", (compass.size / 15.0).round()));
    surface.set_fill_style(ink);
    surface.set_text_align("center");
    surface.set_text_baseline("middle");
    for (letter, deg) in [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)] {
        let p = polar(center, radius - COMPASS_CARDINAL_INSET, deg);
        surface.fill_text(letter, p.x, p.y)?;
    }

    // Degree ticks, one per degree, sized by the coarsest tier that divides it.
    for deg in 0..360_u32 {
        let (_, len, width) = tick_tier(deg);
        let inner = polar(center, radius - len, f64::from(deg));
        let outer = polar(center, radius, f64::from(deg));
        surface.set_line_width(width);
        surface.begin_path();
        surface.move_to(inner.x, inner.y);
        surface.line_to(outer.x, outer.y);
        surface.stroke();
    }

    // Degree labels every 10°, larger on 30° multiples.
    for deg in (0..360_u32).step_by(10) {
        let major = deg % 30 == 0;
        let (font, inset) = if major {
            (format!("bold {}px Arial", (compass.size / 28.0).round()), 40.0)
        } else {
            (format!("{}px Arial", (compass.size / 35.0).round()), 32.0)
        };
        surface.set_font(&font);
        let p = polar(center, radius - inset, f64::from(deg));
        surface.fill_text(&deg.to_string(), p.x, p.y)?;
    }

    // North indicator.
    surface.set_fill_style(NORTH_ARROW_COLOR);
    surface.begin_path();
    surface.move_to(center.x, center.y - radius + 30.0);
    surface.line_to(center.x - 8.0, center.y - radius + 50.0);
    surface.line_to(center.x + 8.0, center.y - radius + 50.0);
    surface.close_path();
    surface.fill();

    surface.restore();
    Ok(())
}

/// Length and stroke width for the tick at `deg`.
fn tick_tier(deg: u32) -> (u32, f64, f64) {
    TICK_TIERS
        .iter()
        .copied()
        .find(|(every, _, _)| deg % every == 0)
        .unwrap_or(TICK_TIERS[3])
}

/// Point at `radius` from `center` along compass bearing `deg` (0 = up).
fn polar(center: Point, radius: f64, deg: f64) -> Point {
    let rad = deg.to_radians() - FRAC_PI_2;
    Point::new(radius.mul_add(rad.cos(), center.x), radius.mul_add(rad.sin(), center.y))
}

// =============================================================
// Measurements
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentStyle {
    Normal,
    Selected,
    Preview,
}

fn draw_measurement<S: Surface>(
    surface: &mut S,
    m: &Measurement,
    style: SegmentStyle,
    scene: &Scene<'_>,
) -> Result<(), S::Error> {
    let color = scene.config.plane_color(m.plane);
    let (start, end) = (m.start, m.end);

    surface.save();

    // Line.
    surface.set_stroke_style(color);
    surface.set_line_width(match style {
        SegmentStyle::Normal => LINE_WIDTH,
        SegmentStyle::Selected => SELECTED_LINE_WIDTH,
        SegmentStyle::Preview => PREVIEW_LINE_WIDTH,
    });
    if style == SegmentStyle::Preview {
        surface.set_line_dash(&PREVIEW_DASH)?;
    } else {
        surface.set_line_dash(&[])?;
    }
    surface.begin_path();
    surface.move_to(start.x, start.y);
    surface.line_to(end.x, end.y);
    surface.stroke();

    // Arrowhead at the end.
    let angle = (end.y - start.y).atan2(end.x - start.x);
    surface.set_fill_style(color);
    surface.begin_path();
    surface.move_to(end.x, end.y);
    surface.line_to(
        ARROW_LENGTH.mul_add(-(angle - ARROW_ANGLE).cos(), end.x),
        ARROW_LENGTH.mul_add(-(angle - ARROW_ANGLE).sin(), end.y),
    );
    surface.line_to(
        ARROW_LENGTH.mul_add(-(angle + ARROW_ANGLE).cos(), end.x),
        ARROW_LENGTH.mul_add(-(angle + ARROW_ANGLE).sin(), end.y),
    );
    surface.close_path();
    surface.fill();

    // Start marker.
    surface.begin_path();
    surface.arc(start.x, start.y, START_MARKER_RADIUS, 0.0, 2.0 * PI)?;
    surface.fill();

    // Label. The preview is unlabelled until it is committed.
    if scene.ui.show_labels && style != SegmentStyle::Preview {
        let text = m.label();
        let anchor = label_anchor(start, end, scene.config.label_offset_px);
        surface.set_line_dash(&[])?;
        surface.set_font(&scene.config.label_font);
        surface.set_text_align("center");
        surface.set_text_baseline("middle");
        surface.set_stroke_style(LABEL_OUTLINE);
        surface.set_line_width(LABEL_OUTLINE_WIDTH);
        surface.stroke_text(&text, anchor.x, anchor.y)?;
        surface.set_fill_style(LABEL_FILL);
        surface.fill_text(&text, anchor.x, anchor.y)?;
    }

    surface.restore();
    Ok(())
}

/// Label position: the segment midpoint pushed `offset` along the normal
/// that points up the screen (rightward for vertical segments).
fn label_anchor(start: Point, end: Point, offset: f64) -> Point {
    let mid = start.midpoint(end);
    let len = geometry::distance(start, end);
    if len <= f64::EPSILON {
        return Point::new(mid.x, mid.y - offset);
    }
    let mut nx = (end.y - start.y) / len;
    let mut ny = -(end.x - start.x) / len;
    if ny > 0.0 || (ny.abs() <= f64::EPSILON && nx < 0.0) {
        nx = -nx;
        ny = -ny;
    }
    Point::new(nx.mul_add(offset, mid.x), ny.mul_add(offset, mid.y))
}
