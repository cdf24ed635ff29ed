//! Linear undo/redo log of measurement collections.
//!
//! Each entry is a full snapshot of the store taken after a committed
//! mutation (add, delete, clear). The cursor points at the entry that matches
//! the store; entries past the cursor are the redo "future" and are dropped
//! on the next push. Entry 0 is the collection the session started with, so
//! undo always has a floor.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::doc::Measurement;

/// Snapshot log with a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Vec<Measurement>>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl History {
    /// Start a log whose floor is `initial`.
    #[must_use]
    pub fn new(initial: Vec<Measurement>) -> Self {
        Self { entries: vec![initial], cursor: 0 }
    }

    /// Record a committed collection, discarding any redo future.
    pub fn push(&mut self, collection: Vec<Measurement>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(collection);
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry. At the floor this is a no-op that returns the
    /// current entry.
    pub fn undo(&mut self) -> &[Measurement] {
        if self.can_undo() {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Step forward one entry. At the newest entry this is a no-op that
    /// returns the current entry.
    pub fn redo(&mut self) -> &[Measurement] {
        if self.can_redo() {
            self.cursor += 1;
        }
        self.current()
    }

    /// The entry under the cursor.
    #[must_use]
    pub fn current(&self) -> &[Measurement] {
        &self.entries[self.cursor]
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Index of the current entry.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries, including the floor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the floor entry is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
