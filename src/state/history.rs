//! Pointer-indexed undo/redo log of field list snapshots

use super::error::{EditorError, EditorResult};
use super::field::Field;
use super::observer::FieldObserver;

/// Linear undo history. `entries[pointer]` is always the state the
/// store is expected to hold; entries after it are redo-able.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<Vec<Field>>,
    pointer: usize,
    /// Skip recording the next notification (set while applying undo/redo)
    suppress_next: bool,
}

impl HistoryLog {
    /// Seed the log with the list as it is at session start
    pub fn new(initial: &[Field]) -> Self {
        Self {
            entries: vec![initial.to_vec()],
            pointer: 0,
            suppress_next: false,
        }
    }

    /// Record a snapshot. Returns false when it matched the current entry.
    pub fn record(&mut self, fields: &[Field]) -> bool {
        if self.entries[self.pointer].as_slice() == fields {
            return false;
        }
        self.entries.truncate(self.pointer + 1);
        self.entries.push(fields.to_vec());
        self.pointer = self.entries.len() - 1;
        tracing::debug!(pointer = self.pointer, len = self.entries.len(), "history recorded");
        true
    }

    pub fn undo(&mut self) -> EditorResult<Vec<Field>> {
        if !self.can_undo() {
            return Err(EditorError::NoHistory);
        }
        self.pointer -= 1;
        tracing::debug!(pointer = self.pointer, "history undo");
        Ok(self.entries[self.pointer].clone())
    }

    pub fn redo(&mut self) -> EditorResult<Vec<Field>> {
        if !self.can_redo() {
            return Err(EditorError::NoHistory);
        }
        self.pointer += 1;
        tracing::debug!(pointer = self.pointer, "history redo");
        Ok(self.entries[self.pointer].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    /// Snapshot the pointer currently refers to
    pub fn current(&self) -> &[Field] {
        &self.entries[self.pointer]
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Mark the next observed change as externally driven
    pub fn suppress_next(&mut self) {
        self.suppress_next = true;
    }

    /// Drop a pending suppression whose write never happened
    pub fn clear_suppression(&mut self) {
        self.suppress_next = false;
    }

    pub fn is_suppressing(&self) -> bool {
        self.suppress_next
    }

    /// Forget everything and start again from `initial`
    pub fn reset(&mut self, initial: &[Field]) {
        *self = Self::new(initial);
    }
}

impl FieldObserver for HistoryLog {
    fn fields_changed(&mut self, fields: &[Field]) {
        if std::mem::take(&mut self.suppress_next) {
            tracing::debug!("history skipped externally driven change");
            return;
        }
        self.record(fields);
    }
}
