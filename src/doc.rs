//! Document model: measurement records and the in-memory store.
//!
//! This module defines the measurement record (`Measurement`) and the runtime
//! store that owns the current collection (`MeasurementStore`). The store is
//! the single source of truth for what is drawn: the renderer reads it, the
//! history log snapshots it, and the capture adapter serializes it.
//!
//! Measurements are immutable once created. Every change to the store is an
//! append, a removal, or a wholesale replacement, so a plain clone of the
//! backing `Vec` is a complete, independent snapshot.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{self, Cardinal, Point};

/// Unique identifier for a measurement.
pub type MeasurementId = Uuid;

/// A single directional segment drawn by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Unique identifier. The nil UUID means "not yet assigned".
    pub id: MeasurementId,
    /// Where the drag started.
    pub start: Point,
    /// Where the drag ended; the arrowhead is drawn here.
    pub end: Point,
    /// Logical group (roof face), 1-based.
    pub plane: u8,
    /// Whole-degree bearing in `[0, 360)`, frozen at creation time.
    pub azimuth: u16,
}

impl Measurement {
    /// Build an unassigned measurement from a completed drag.
    ///
    /// The azimuth is computed once here with the snap setting in effect
    /// and never recomputed. The id is left nil; [`MeasurementStore::add`]
    /// assigns one.
    #[must_use]
    pub fn from_drag(start: Point, end: Point, plane: u8, snap: bool) -> Self {
        Self {
            id: Uuid::nil(),
            start,
            end,
            plane,
            azimuth: geometry::bearing(start, end, snap),
        }
    }

    /// Compass point nearest to this measurement's azimuth.
    #[must_use]
    pub fn cardinal(&self) -> Cardinal {
        geometry::cardinal(f64::from(self.azimuth))
    }

    /// Label drawn next to the segment, e.g. `"90° E"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}° {}", self.azimuth, self.cardinal())
    }

    /// One line of the clipboard summary, e.g. `"Plane 2: 90° E"`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!("Plane {}: {}", self.plane, self.label())
    }
}

/// Ordered, in-memory collection of measurements.
#[derive(Debug, Clone, Default)]
pub struct MeasurementStore {
    items: Vec<Measurement>,
}

impl MeasurementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a measurement, assigning a fresh id if it has none.
    /// Returns the id the measurement was stored under.
    pub fn add(&mut self, mut measurement: Measurement) -> MeasurementId {
        if measurement.id.is_nil() {
            measurement.id = Uuid::new_v4();
        }
        self.items.push(measurement);
        measurement.id
    }

    /// Remove the measurement at `index`, returning it if the index was valid.
    pub fn remove_at(&mut self, index: usize) -> Option<Measurement> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Remove every measurement.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the whole collection (used by undo/redo and initial loads).
    pub fn replace_all(&mut self, items: Vec<Measurement>) {
        self.items = items;
    }

    /// Read-only view of the collection in display order.
    #[must_use]
    pub fn get(&self) -> &[Measurement] {
        &self.items
    }

    /// The measurement at `index`, if any.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Measurement> {
        self.items.get(index)
    }

    /// Owned copy of the collection, suitable for a history entry.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Measurement> {
        self.items.clone()
    }

    /// Number of measurements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store contains no measurements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
