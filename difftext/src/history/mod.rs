//! History manager - diff-backed undo and redo over successive texts.
//!
//! Each step stores the [`Delta`] from the previous text to its own. Only
//! the newest step keeps its full text; every other text is rebuilt from a
//! neighbouring delta on demand, so a long history costs roughly the size of
//! its edits rather than the size of every version.
//!
//! ```
//! use difftext::HistoryManager;
//!
//! let mut history = HistoryManager::new();
//! history.add("1st").add("2nd").add("3rd");
//!
//! assert_eq!(history.undo().map(|r| r.text).as_deref(), Some("2nd"));
//! assert_eq!(history.undo().map(|r| r.text).as_deref(), Some("1st"));
//! assert!(history.undo().is_none());
//! assert_eq!(history.redo().map(|r| r.text).as_deref(), Some("2nd"));
//! ```

mod entry;

pub use entry::{HistoryEntry, Metadata, Restored, Snapshot};

use std::borrow::Cow;

use tracing::{debug, instrument, trace};

use crate::config::HistoryConfig;
use crate::differ::{Delta, Direction, ndiff};

/// Linear undo/redo history of a text.
///
/// Adding a text after one or more undos discards the undone steps: the
/// history is a line, never a tree.
#[derive(Debug, Clone, Default)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    position: Option<usize>,
    config: HistoryConfig,
    /// Last text passed to `add`.
    previous_text: Option<String>,
    /// Last text produced by `undo`.
    current_text: Option<String>,
}

impl HistoryManager {
    /// Creates an empty, unbounded history that diffs line by line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty history with the given configuration.
    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Records a new text with empty metadata. See
    /// [`add_with_metadata`](Self::add_with_metadata).
    pub fn add(&mut self, text: impl Into<String>) -> &mut Self {
        self.add_with_metadata(text, Metadata::default())
    }

    /// Records a new text.
    ///
    /// Does nothing when `text` equals the last text passed to `add` or the
    /// last text produced by [`undo`](Self::undo), so redundant change
    /// notifications never create steps. Otherwise any undone steps are
    /// discarded, the oldest steps are evicted once the history holds
    /// `max_steps` undo steps, and the new text becomes the newest step.
    #[instrument(skip(self, text, metadata))]
    pub fn add_with_metadata(&mut self, text: impl Into<String>, metadata: Metadata) -> &mut Self {
        let text = text.into();
        let seen = |slot: &Option<String>| slot.as_deref() == Some(text.as_str());
        if seen(&self.previous_text) || seen(&self.current_text) {
            trace!("Skipping unchanged text");
            return self;
        }
        let base = self.current_text().map(Cow::into_owned).unwrap_or_default();
        self.previous_text = Some(text.clone());

        if let Some(pos) = self.position
            && pos + 1 < self.entries.len()
        {
            debug!("Discarding {} undone steps", self.entries.len() - pos - 1);
            self.entries.truncate(pos + 1);
        }

        if let Some(max_steps) = self.config.max_steps {
            self.evict(max_steps);
        }

        let separator = self.config.separator.as_str();
        let diff = ndiff(&split(&base, separator), &split(&text, separator));
        trace!("Computed delta with {} lines", diff.len());

        if let Some(tail) = self.entries.last_mut() {
            tail.demote();
        }
        self.entries.push(HistoryEntry::new(text, diff, metadata));
        self.position = Some(self.entries.len() - 1);
        self
    }

    /// Drops the oldest entries until at most `max_steps` undo steps
    /// remain before the incoming one.
    fn evict(&mut self, max_steps: usize) {
        let Some(pos) = self.position else {
            return;
        };
        if pos < max_steps {
            return;
        }
        let excess = pos + 1 - max_steps;
        self.entries.drain(..excess);
        self.position = pos.checked_sub(excess);
        // Nothing precedes the new head, so its delta can never be undone.
        if let Some(head) = self.entries.first_mut() {
            head.diff = Delta::new();
        }
        debug!("Evicted {} oldest steps", excess);
    }

    /// Steps back to the previous text.
    ///
    /// Returns the rebuilt text with the metadata of the step being left,
    /// or `None` when there is nothing to undo.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Option<Restored> {
        let pos = self.position.filter(|&pos| pos > 0)?;
        let left = self.entries.get(pos)?;
        let text = left.diff.restore(Direction::Backward).join(&self.config.separator);
        let metadata = left.metadata.clone();

        self.position = Some(pos - 1);
        self.current_text = Some(text.clone());
        debug!("Undo to step {}", pos - 1);
        Some(Restored { text, metadata })
    }

    /// Steps forward to the next text.
    ///
    /// Returns the rebuilt text with the metadata of the step being entered,
    /// or `None` when there is nothing to redo.
    #[instrument(skip(self))]
    pub fn redo(&mut self) -> Option<Restored> {
        let next = self.position? + 1;
        let entered = self.entries.get(next)?;
        let text = entered.text().map_or_else(
            || entered.diff.restore(Direction::Forward).join(&self.config.separator),
            str::to_owned,
        );
        let metadata = entered.metadata.clone();

        self.position = Some(next);
        debug!("Redo to step {}", next);
        Some(Restored { text, metadata })
    }

    /// Forgets every step.
    pub fn clear(&mut self) {
        debug!("Clearing {} steps", self.entries.len());
        self.entries.clear();
        self.position = None;
        self.previous_text = None;
        self.current_text = None;
    }

    /// Bounds the number of undo steps kept; `None` keeps everything.
    ///
    /// Applied on the next [`add`](Self::add). `Some(0)` keeps no undo steps
    /// at all.
    pub const fn set_max_steps(&mut self, max_steps: Option<usize>) {
        self.config.max_steps = max_steps;
    }

    /// Undo step bound, if any.
    #[must_use]
    pub const fn max_steps(&self) -> Option<usize> {
        self.config.max_steps
    }

    /// Separator texts are split on.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.config.separator
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Number of stored steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no step is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current step, `None` when empty.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        self.position
    }

    /// Returns true if [`undo`](Self::undo) would succeed.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.position.is_some_and(|pos| pos > 0)
    }

    /// Returns true if [`redo`](Self::redo) would succeed.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.position.is_some_and(|pos| pos + 1 < self.entries.len())
    }

    /// Stored steps, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Text at the current position, `None` when empty.
    ///
    /// Only the newest step is stored in full; any other step is rebuilt
    /// from the delta of the step after it.
    #[must_use]
    pub fn current_text(&self) -> Option<Cow<'_, str>> {
        let pos = self.position?;
        if let Some(text) = self.entries.get(pos)?.text() {
            return Some(Cow::Borrowed(text));
        }
        let next = self.entries.get(pos + 1)?;
        Some(Cow::Owned(
            next.diff.restore(Direction::Backward).join(&self.config.separator),
        ))
    }
}

/// Splits a text into diffable units; the empty separator yields single
/// characters.
fn split<'t>(text: &'t str, separator: &str) -> Vec<&'t str> {
    if separator.is_empty() {
        text.char_indices()
            .map(|(i, ch)| &text[i..i + ch.len_utf8()])
            .collect()
    } else {
        text.split(separator).collect()
    }
}
