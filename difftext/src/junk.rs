//! Junk filters: tokens a matcher must not anchor a match on.
//!
//! Junk tokens never start a matching block. They may still be absorbed at
//! the edges of a block that is already anchored on interesting tokens.

use regex::Regex;
use std::sync::LazyLock;

/// Junk strategy for a [`SequenceMatcher`](crate::SequenceMatcher).
///
/// The predicate is consulted once per distinct token of the second
/// sequence when that sequence is indexed, never during matching.
#[derive(Debug, Clone, Copy)]
pub enum Junk<T> {
    /// Every token may anchor a match.
    None,
    /// Tokens for which the function returns true are junk.
    Predicate(fn(T) -> bool),
}

impl<T> Default for Junk<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T> Junk<T> {
    /// Wraps an optional predicate.
    #[must_use]
    pub fn from_option(predicate: Option<fn(T) -> bool>) -> Self {
        predicate.map_or(Self::None, Self::Predicate)
    }

    /// Returns true if `token` is junk under this strategy.
    pub fn is_junk(&self, token: T) -> bool {
        match self {
            Self::None => false,
            Self::Predicate(predicate) => predicate(token),
        }
    }
}

#[allow(clippy::expect_used)]
static LINE_JUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#?\s*$").expect("LINE_JUNK should be valid"));

/// Returns true for a blank line or one holding only a single `#`.
#[must_use]
pub fn is_line_junk(line: &str) -> bool {
    LINE_JUNK.is_match(line)
}

/// Returns true for a space or a tab.
#[must_use]
pub const fn is_character_junk(ch: char) -> bool {
    matches!(ch, ' ' | '\t')
}
