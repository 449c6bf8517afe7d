//! History entries and the metadata stored with them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::differ::Delta;

/// Caller data stored alongside a history step and handed back on
/// undo/redo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Caret offset to restore in the editing surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caret_position: Option<usize>,

    /// Any other fields the caller wants back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metadata holding only a caret offset.
    #[must_use]
    pub fn with_caret(caret_position: usize) -> Self {
        Self {
            caret_position: Some(caret_position),
            extra: Map::new(),
        }
    }

    /// Adds a free-form field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Looks up a free-form field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// What an entry keeps besides its diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// The full text of the step. Only the newest entry holds one.
    Materialized(String),
    /// The text is recoverable from the neighbouring diffs only.
    DiffOnly,
}

/// One step of a [`HistoryManager`](super::HistoryManager).
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub(super) snapshot: Snapshot,
    pub(super) diff: Delta,
    pub(super) metadata: Metadata,
}

impl HistoryEntry {
    pub(super) const fn new(text: String, diff: Delta, metadata: Metadata) -> Self {
        Self {
            snapshot: Snapshot::Materialized(text),
            diff,
            metadata,
        }
    }

    /// The stored snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The full text, if this entry still holds it.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.snapshot {
            Snapshot::Materialized(text) => Some(text),
            Snapshot::DiffOnly => None,
        }
    }

    /// Returns true if the entry holds its full text.
    #[must_use]
    pub const fn is_materialized(&self) -> bool {
        matches!(self.snapshot, Snapshot::Materialized(_))
    }

    /// Delta from the previous step's text to this one.
    #[must_use]
    pub const fn diff(&self) -> &Delta {
        &self.diff
    }

    /// Metadata recorded with the step.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Drops the full text, keeping only the diff.
    pub(super) fn demote(&mut self) {
        self.snapshot = Snapshot::DiffOnly;
    }
}

/// A text rebuilt by [`undo`](super::HistoryManager::undo) or
/// [`redo`](super::HistoryManager::redo).
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    /// The text at the new position.
    pub text: String,
    /// Metadata of the step that was crossed.
    pub metadata: Metadata,
}
