//! Editing session: measurement state, compass state, and input handlers.
//!
//! `EngineCore` holds every piece of state for one azimuth editing view and
//! exposes the handlers the host wires DOM events to. It never touches the
//! browser, so the whole interaction model is testable natively. Every
//! handler returns the [`Action`]s the host must react to; the core never
//! redraws on its own.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use time::OffsetDateTime;

use crate::capture::SaveSnapshot;
use crate::compass::{CompassColor, CompassOverlay};
use crate::config::{ConfigError, EngineConfig};
use crate::consts::{CURSOR_DRAG_COMPASS, CURSOR_DRAW, CURSOR_PAN, MAX_PLANES};
use crate::doc::{Measurement, MeasurementStore};
use crate::geometry::{self, Point};
use crate::hit;
use crate::history::History;
use crate::input::{Button, InputState, Key, Modifiers, UiState};
use crate::render::Scene;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Something visible changed; call `Engine::render`.
    RenderNeeded,
    /// The measurement collection changed (add, delete, clear, undo, redo, load).
    MeasurementsChanged,
    /// The lock state flipped. While locked the host must disable imagery pan/zoom.
    LockChanged(bool),
    SnapChanged(bool),
    SelectionChanged(Option<usize>),
    /// Text for the clipboard, one `"Plane N: D° C"` line per measurement.
    CopySummary(String),
    /// CSS cursor for the drawing surface.
    SetCursor(String),
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug)]
pub struct EngineCore {
    pub doc: MeasurementStore,
    pub history: History,
    pub compass: CompassOverlay,
    pub ui: UiState,
    pub input: InputState,
    pub config: EngineConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with custom settings. The compass starts at the
    /// configured default size and opacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`EngineConfig::validate`].
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let mut compass = CompassOverlay::default();
        compass.reset_to(config.compass_default_size, config.compass_default_opacity);
        Self {
            doc: MeasurementStore::new(),
            history: History::default(),
            compass,
            ui: UiState::default(),
            input: InputState::default(),
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Data inputs ---

    /// Seed the session with previously saved measurements.
    ///
    /// Replaces the store and restarts history with the loaded collection as
    /// entry 0, so undo cannot go back past it.
    pub fn load_measurements(&mut self, initial: Vec<Measurement>) -> Vec<Action> {
        self.doc.clear();
        for m in initial {
            self.doc.add(m);
        }
        self.history = History::new(self.doc.snapshot());
        self.ui.selected = None;
        self.input = InputState::Idle;
        log::debug!("loaded {} measurements", self.doc.len());
        vec![Action::MeasurementsChanged, Action::RenderNeeded]
    }

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    ///
    /// Resizing the canvas clears it, so a redraw is always requested.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport_width = width_css.max(0.0);
        self.viewport_height = height_css.max(0.0);
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        vec![Action::RenderNeeded]
    }

    // --- Session toggles ---

    /// Lock or unlock the view for drawing. Any gesture in progress is
    /// abandoned.
    pub fn set_locked(&mut self, locked: bool) -> Vec<Action> {
        if self.ui.locked == locked {
            return Vec::new();
        }
        self.ui.locked = locked;
        self.input = InputState::Idle;
        log::debug!("view {}", if locked { "locked" } else { "unlocked" });
        vec![Action::LockChanged(locked), Action::SetCursor(self.idle_cursor().to_owned()), Action::RenderNeeded]
    }

    pub fn toggle_lock(&mut self) -> Vec<Action> {
        self.set_locked(!self.ui.locked)
    }

    /// Enable or disable 45° snapping for measurements committed from now on.
    pub fn set_snap(&mut self, enabled: bool) -> Vec<Action> {
        if self.ui.snap_enabled == enabled {
            return Vec::new();
        }
        self.ui.snap_enabled = enabled;
        vec![Action::SnapChanged(enabled), Action::RenderNeeded]
    }

    pub fn toggle_snap(&mut self) -> Vec<Action> {
        self.set_snap(!self.ui.snap_enabled)
    }

    pub fn set_labels(&mut self, show: bool) -> Vec<Action> {
        if self.ui.show_labels == show {
            return Vec::new();
        }
        self.ui.show_labels = show;
        vec![Action::RenderNeeded]
    }

    /// Select the plane for new measurements. Values outside `1..=8` are ignored.
    pub fn set_plane(&mut self, plane: u8) -> Vec<Action> {
        if !(1..=MAX_PLANES).contains(&plane) {
            log::debug!("ignoring invalid plane {plane}");
            return Vec::new();
        }
        self.ui.plane = plane;
        vec![Action::RenderNeeded]
    }

    // --- Compass ---

    pub fn set_compass_visible(&mut self, visible: bool) -> Vec<Action> {
        self.compass.set_visible(visible);
        if !visible && self.input == InputState::DraggingCompass {
            self.input = InputState::Idle;
        }
        vec![Action::RenderNeeded]
    }

    pub fn toggle_compass(&mut self) -> Vec<Action> {
        self.set_compass_visible(!self.compass.visible)
    }

    pub fn set_compass_size(&mut self, size: f64) -> Vec<Action> {
        self.compass.set_size(size);
        vec![Action::RenderNeeded]
    }

    pub fn set_compass_opacity(&mut self, opacity: f64) -> Vec<Action> {
        self.compass.set_opacity(opacity);
        vec![Action::RenderNeeded]
    }

    pub fn set_compass_color(&mut self, color: CompassColor) -> Vec<Action> {
        self.compass.set_color(color);
        vec![Action::RenderNeeded]
    }

    /// Re-center the compass and restore the configured size and opacity.
    pub fn reset_compass(&mut self) -> Vec<Action> {
        self.compass.reset_to(self.config.compass_default_size, self.config.compass_default_opacity);
        vec![Action::RenderNeeded]
    }

    // --- Editing ---

    /// Select the measurement at `index`, or clear the selection.
    /// Out-of-range indices clear it.
    pub fn select(&mut self, index: Option<usize>) -> Vec<Action> {
        let index = index.filter(|&i| i < self.doc.len());
        self.set_selection(index)
    }

    pub fn undo(&mut self) -> Vec<Action> {
        if !self.history.can_undo() {
            return Vec::new();
        }
        let entry = self.history.undo().to_vec();
        log::debug!("undo to history entry {}", self.history.cursor());
        self.restore(entry)
    }

    pub fn redo(&mut self) -> Vec<Action> {
        if !self.history.can_redo() {
            return Vec::new();
        }
        let entry = self.history.redo().to_vec();
        log::debug!("redo to history entry {}", self.history.cursor());
        self.restore(entry)
    }

    /// Remove the selected measurement. No-op without a selection.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(index) = self.ui.selected else {
            return Vec::new();
        };
        let Some(removed) = self.doc.remove_at(index) else {
            return self.set_selection(None);
        };
        self.history.push(self.doc.snapshot());
        log::debug!("deleted measurement {} ({})", removed.id, removed.label());
        let mut actions = vec![Action::MeasurementsChanged];
        actions.extend(self.set_selection(None));
        with_render(actions)
    }

    /// Remove every measurement as one undoable step. No-op when already empty.
    pub fn clear_all(&mut self) -> Vec<Action> {
        if self.doc.is_empty() {
            return Vec::new();
        }
        self.doc.clear();
        self.history.push(self.doc.snapshot());
        log::debug!("cleared all measurements");
        let mut actions = vec![Action::MeasurementsChanged];
        actions.extend(self.set_selection(None));
        with_render(actions)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || !self.ui.locked {
            return Vec::new();
        }

        if modifiers.shift
            && self.compass.visible
            && self.compass.contains(screen_pt, self.viewport_width, self.viewport_height)
        {
            self.input = InputState::DraggingCompass;
            return vec![Action::SetCursor(CURSOR_DRAG_COMPASS.to_owned())];
        }

        self.input = InputState::Drawing { start: screen_pt, current: screen_pt };
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match self.input {
            InputState::Drawing { start, .. } => {
                self.input = InputState::Drawing { start, current: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::DraggingCompass => {
                let origin = Point::new(self.viewport_width * 0.5, self.viewport_height * 0.5);
                self.compass.set_position(Point::new(screen_pt.x - origin.x, screen_pt.y - origin.y));
                vec![Action::RenderNeeded]
            }
            InputState::Idle => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }

        let prev = std::mem::take(&mut self.input);
        match prev {
            InputState::Drawing { start, .. } => {
                let length = geometry::distance(start, screen_pt);
                // Zero-length segments have no bearing, whatever the threshold.
                if length > 0.0 && length >= self.config.min_drag_px {
                    self.commit_measurement(start, screen_pt)
                } else {
                    self.click_select(screen_pt)
                }
            }
            InputState::DraggingCompass => {
                vec![Action::SetCursor(self.idle_cursor().to_owned()), Action::RenderNeeded]
            }
            InputState::Idle => Vec::new(),
        }
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.command() {
            return self.on_command_key(&key, modifiers);
        }

        match key.0.as_str() {
            "Escape" => self.cancel(),
            "Delete" | "Backspace" => self.delete_selected(),
            _ if key.is_letter('l') => self.toggle_lock(),
            _ if key.is_letter('s') => self.toggle_snap(),
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    /// The committed measurements in display order.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        self.doc.get()
    }

    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        self.ui.selected
    }

    /// Clipboard text: one `"Plane N: D° C"` line per measurement.
    #[must_use]
    pub fn summary(&self) -> String {
        self.doc.get().iter().map(Measurement::summary_line).collect::<Vec<_>>().join("\n")
    }

    /// Borrowed view of everything the renderer needs for one frame.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            measurements: self.doc.get(),
            compass: &self.compass,
            ui: &self.ui,
            input: &self.input,
            config: &self.config,
            viewport_w: self.viewport_width,
            viewport_h: self.viewport_height,
            dpr: self.dpr,
        }
    }

    /// Owned copy of the state a save needs, detached from the live session.
    ///
    /// The selection highlight and any in-progress gesture are left out of
    /// the archived image.
    #[must_use]
    pub fn save_snapshot(&self) -> SaveSnapshot {
        SaveSnapshot {
            measurements: self.doc.snapshot(),
            compass: self.compass,
            ui: UiState { selected: None, ..self.ui.clone() },
            config: self.config.clone(),
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            dpr: self.dpr,
            address: None,
            captured_at: OffsetDateTime::now_utc(),
        }
    }

    // --- Internals ---

    fn commit_measurement(&mut self, start: Point, end: Point) -> Vec<Action> {
        let measurement = Measurement::from_drag(start, end, self.ui.plane, self.ui.snap_enabled);
        let id = self.doc.add(measurement);
        self.history.push(self.doc.snapshot());
        log::debug!("added measurement {id} ({}), plane {}", measurement.label(), measurement.plane);

        let mut actions = vec![Action::MeasurementsChanged];
        actions.extend(self.set_selection(None));
        with_render(actions)
    }

    fn click_select(&mut self, pt: Point) -> Vec<Action> {
        let hit = hit::hit_measurement(pt, self.doc.get(), self.config.hit_tolerance_px);
        // The preview segment has to disappear either way.
        with_render(self.set_selection(hit))
    }

    fn on_command_key(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is_letter('z') {
            if modifiers.shift { self.redo() } else { self.undo() }
        } else if key.is_letter('y') {
            self.redo()
        } else if key.is_letter('c') && !self.doc.is_empty() {
            vec![Action::CopySummary(self.summary())]
        } else {
            Vec::new()
        }
    }

    /// Abandon any gesture and clear the selection.
    fn cancel(&mut self) -> Vec<Action> {
        let was_active = !self.input.is_idle();
        self.input = InputState::Idle;
        let actions = self.set_selection(None);
        if was_active { with_render(actions) } else { actions }
    }

    /// Swap in a history entry. The selection is dropped since indices may
    /// no longer line up.
    fn restore(&mut self, entry: Vec<Measurement>) -> Vec<Action> {
        self.doc.replace_all(entry);
        self.input = InputState::Idle;
        let mut actions = vec![Action::MeasurementsChanged];
        actions.extend(self.set_selection(None));
        with_render(actions)
    }

    fn set_selection(&mut self, index: Option<usize>) -> Vec<Action> {
        if self.ui.selected == index {
            return Vec::new();
        }
        self.ui.selected = index;
        vec![Action::SelectionChanged(index), Action::RenderNeeded]
    }

    fn idle_cursor(&self) -> &'static str {
        if self.ui.locked { CURSOR_DRAW } else { CURSOR_PAN }
    }
}

/// Append `RenderNeeded` unless the list already asks for a redraw.
fn with_render(mut actions: Vec<Action>) -> Vec<Action> {
    if !actions.contains(&Action::RenderNeeded) {
        actions.push(Action::RenderNeeded);
    }
    actions
}
