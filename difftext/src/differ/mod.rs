//! Differ - human-readable line deltas with intraline hints.
//!
//! Lines are aligned with a [`SequenceMatcher`]; replaced blocks are then
//! searched for near-matching pairs, which get a character-level comparison
//! rendered as `"? "` hint lines. Example:
//!
//! ```
//! use difftext::{Direction, ndiff, restore};
//!
//! let a = ["one\n", "two\n", "three\n"];
//! let b = ["ore\n", "tree\n", "emu\n"];
//! let delta = ndiff(&a, &b);
//! assert_eq!(
//!     delta.lines(),
//!     ["- one\n", "?  ^", "+ ore\n", "?  ^", "- two\n", "- three\n", "?  -", "+ tree\n", "+ emu\n"]
//! );
//! assert_eq!(restore(delta.lines(), Direction::Backward), a);
//! assert_eq!(restore(delta.lines(), Direction::Forward), b);
//! ```

pub mod delta;
mod fancy;

pub use delta::{Delta, Direction, LineTag, restore};

use crate::junk::{Junk, is_character_junk};
use crate::matcher::{OpTag, SequenceMatcher};

/// Line junk filter signature.
pub type LineJunk = fn(&str) -> bool;

/// Character junk filter signature.
pub type CharJunk = fn(char) -> bool;

/// Compares sequences of lines and produces [`Delta`]s.
///
/// Differ does not aim for minimal deltas: it only synchronizes on
/// contiguous runs, which keeps unrelated lines far apart from pairing up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ {
    line_junk: Option<LineJunk>,
    char_junk: Option<CharJunk>,
}

impl Differ {
    /// Creates a differ with no junk filters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line_junk: None,
            char_junk: None,
        }
    }

    /// Sets the filter for lines that must not anchor a line match.
    ///
    /// Leaving this unset is usually best; the popularity heuristic
    /// already keeps repeated filler lines cheap.
    #[must_use]
    pub const fn with_line_junk(mut self, line_junk: LineJunk) -> Self {
        self.line_junk = Some(line_junk);
        self
    }

    /// Sets the filter for characters ignored as intraline anchors, such as
    /// [`is_character_junk`].
    #[must_use]
    pub const fn with_char_junk(mut self, char_junk: CharJunk) -> Self {
        self.char_junk = Some(char_junk);
        self
    }

    /// Compares two sequences of lines.
    #[must_use]
    pub fn compare(&self, a: &[&str], b: &[&str]) -> Delta {
        let cruncher = SequenceMatcher::with_junk(Junk::from_option(self.line_junk), a, b);
        let mut delta = Delta::new();
        for code in cruncher.opcodes() {
            match code.tag {
                OpTag::Replace => {
                    self.fancy_replace(&mut delta, &a[code.a_range()], &b[code.b_range()]);
                }
                OpTag::Delete => dump(&mut delta, LineTag::Removed, &a[code.a_range()]),
                OpTag::Insert => dump(&mut delta, LineTag::Added, &b[code.b_range()]),
                OpTag::Equal => dump(&mut delta, LineTag::Common, &a[code.a_range()]),
            }
        }
        delta
    }

    /// Dumps a replaced block without intraline analysis, shorter side
    /// first.
    fn plain_replace(delta: &mut Delta, a: &[&str], b: &[&str]) {
        debug_assert!(!a.is_empty() && !b.is_empty());
        if b.len() < a.len() {
            dump(delta, LineTag::Added, b);
            dump(delta, LineTag::Removed, a);
        } else {
            dump(delta, LineTag::Removed, a);
            dump(delta, LineTag::Added, b);
        }
    }
}

fn dump(delta: &mut Delta, tag: LineTag, lines: &[&str]) {
    for line in lines {
        delta.push(tag, line);
    }
}

/// Compares two sequences of lines with the default filters: no line junk,
/// and blanks and tabs as character junk.
#[must_use]
pub fn ndiff(a: &[&str], b: &[&str]) -> Delta {
    ndiff_with(a, b, None, Some(is_character_junk))
}

/// Compares two sequences of lines with explicit filters; `None` disables
/// a filter.
#[must_use]
pub fn ndiff_with(
    a: &[&str],
    b: &[&str],
    line_junk: Option<LineJunk>,
    char_junk: Option<CharJunk>,
) -> Delta {
    Differ {
        line_junk,
        char_junk,
    }
    .compare(a, b)
}
