//! # Undo/Redo History
//!
//! Linear history of document snapshots with a cursor.
//!
//! ## Design
//!
//! - Every successful mutation pushes the resulting document
//! - Undo/redo move the cursor and hand back the snapshot it lands on
//! - Pushing after an undo discards everything past the cursor (the redo
//!   branch is gone for good)
//! - At most `max_entries` snapshots are retained; the oldest go first
//!
//! ## Example
//!
//! ```rust
//! use blockmail_editor::{Document, HistoryStack};
//!
//! let mut history = HistoryStack::new();
//! history.push(Document::default(), None);
//! assert!(!history.can_undo());
//! ```

use std::collections::VecDeque;
use thiserror::Error;
use tracing::debug;

use crate::document::Document;

pub const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

/// One stored snapshot
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub document: Document,

    /// Description of the edit that produced this snapshot
    pub label: Option<String>,
}

/// Snapshot stack with a cursor
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: VecDeque<HistoryEntry>,

    /// Index of the current snapshot; `None` until the first push
    cursor: Option<usize>,

    /// Maximum number of retained snapshots (0 = unlimited)
    max_entries: usize,
}

impl HistoryStack {
    /// Create a history with the default cap (100)
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            max_entries,
        }
    }

    /// Record a snapshot, discarding the redo branch
    pub fn push(&mut self, document: Document, label: Option<String>) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        let discarded = self.entries.len() - keep;
        self.entries.truncate(keep);

        self.entries.push_back(HistoryEntry { document, label });

        if self.max_entries > 0 {
            while self.entries.len() > self.max_entries {
                self.entries.pop_front();
            }
        }

        self.cursor = Some(self.entries.len() - 1);
        debug!(
            entries = self.entries.len(),
            discarded_redo = discarded,
            "Pushed history snapshot"
        );
    }

    /// Step back one snapshot
    pub fn undo(&mut self) -> Result<&Document, HistoryError> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                Ok(&self.entries[cursor - 1].document)
            }
            _ => Err(HistoryError::NothingToUndo),
        }
    }

    /// Step forward one snapshot
    pub fn redo(&mut self) -> Result<&Document, HistoryError> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                Ok(&self.entries[cursor + 1].document)
            }
            _ => Err(HistoryError::NothingToRedo),
        }
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&Document> {
        self.cursor.map(|cursor| &self.entries[cursor].document)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Label of the edit the next undo reverts
    pub fn undo_label(&self) -> Option<&str> {
        match self.cursor {
            Some(cursor) if cursor > 0 => self.entries[cursor].label.as_deref(),
            _ => None,
        }
    }

    /// Label of the edit the next redo reapplies
    pub fn redo_label(&self) -> Option<&str> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.entries[cursor + 1].label.as_deref()
            }
            _ => None,
        }
    }

    /// Drop all snapshots
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}
