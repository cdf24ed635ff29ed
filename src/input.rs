//! Input model: modifier keys, mouse buttons, session toggles, and the
//! gesture state machine.
//!
//! `Modifiers`, `Button` and `Key` describe a raw DOM event after the host has
//! translated it into drawing-surface coordinates. `UiState` holds the
//! session toggles the host exposes (lock, snap, labels, plane, selection).
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up; it is ephemeral and never persisted.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Point;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held. Shift-dragging inside the compass moves it.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Case-insensitive match against a single-character key name.
    #[must_use]
    pub fn is_letter(&self, letter: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }
}

/// Session toggles visible to the renderer and the host.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct UiState {
    /// Drawing is only possible while the imagery view is locked.
    pub locked: bool,
    /// Snap new bearings to the nearest 45°.
    pub snap_enabled: bool,
    /// Draw `"{azimuth}° {cardinal}"` labels next to measurements.
    pub show_labels: bool,
    /// Plane assigned to the next measurement, 1-based.
    pub plane: u8,
    /// Index of the selected measurement in the store, if any.
    pub selected: Option<usize>,
}

impl Default for UiState {
    fn default() -> Self {
        Self { locked: false, snap_enabled: false, show_labels: true, plane: 1, selected: None }
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed to draw a preview
/// and to commit on pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging out a new measurement.
    Drawing {
        /// Where the drag started.
        start: Point,
        /// Latest pointer position; the preview segment ends here.
        current: Point,
    },
    /// The user is repositioning the compass overlay.
    DraggingCompass,
}

impl InputState {
    /// The in-progress segment, if a measurement is being drawn.
    #[must_use]
    pub fn drawing_segment(&self) -> Option<(Point, Point)> {
        match *self {
            Self::Drawing { start, current } => Some((start, current)),
            Self::Idle | Self::DraggingCompass => None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
