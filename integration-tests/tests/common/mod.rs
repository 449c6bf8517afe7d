//! Shared test utilities for integration tests.
//!
//! Provides an editing-session driver that mirrors what a text editor does
//! with a history: record every settled text, then walk back and forth.

#![allow(dead_code)]

use difftext::{HistoryConfig, HistoryManager};

/// Drives a [`HistoryManager`] the way an editor would.
#[derive(Default)]
pub struct EditingSession {
    /// The history under test.
    pub history: HistoryManager,
    /// Every text that was recorded, in order.
    pub recorded: Vec<String>,
}

impl EditingSession {
    /// Creates a session with an unbounded, line-based history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with the given configuration.
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            history: HistoryManager::with_config(config),
            recorded: Vec::new(),
        }
    }

    /// Records a settled text.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        self.history.add(text);
        self.recorded.push(text.to_string());
        self
    }

    /// Undoes until the start, returning every restored text.
    pub fn undo_all(&mut self) -> Vec<String> {
        std::iter::from_fn(|| self.history.undo().map(|restored| restored.text)).collect()
    }

    /// Redoes until the end, returning every restored text.
    pub fn redo_all(&mut self) -> Vec<String> {
        std::iter::from_fn(|| self.history.redo().map(|restored| restored.text)).collect()
    }
}

/// Texts of a short letter being typed line by line.
pub fn letter_drafts() -> Vec<String> {
    let lines = [
        "Dear team,",
        "",
        "the release is scheduled for Friday.",
        "Please review the open pull requests.",
        "",
        "Thanks,",
        "Sam",
    ];
    (1..=lines.len()).map(|n| lines[..n].join("\n")).collect()
}
