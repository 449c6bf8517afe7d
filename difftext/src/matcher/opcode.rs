//! Matching blocks and edit opcodes.
//!
//! These are the two views a [`SequenceMatcher`](super::SequenceMatcher)
//! produces: the common runs between two sequences, and the edit script that
//! turns the first sequence into the second.

use std::fmt;
use std::ops::Range;

/// A run where `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    /// Start index in the first sequence.
    pub a: usize,
    /// Start index in the second sequence.
    pub b: usize,
    /// Length of the run.
    pub size: usize,
}

impl Match {
    /// Creates a matching block.
    #[must_use]
    pub const fn new(a: usize, b: usize, size: usize) -> Self {
        Self { a, b, size }
    }
}

impl From<(usize, usize, usize)> for Match {
    fn from((a, b, size): (usize, usize, usize)) -> Self {
        Self::new(a, b, size)
    }
}

/// What an [`Opcode`] does to its slice of the first sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpTag {
    /// `a[a_start..a_end] == b[b_start..b_end]`.
    Equal,
    /// `a[a_start..a_end]` is replaced by `b[b_start..b_end]`.
    Replace,
    /// `a[a_start..a_end]` is deleted; `b_start == b_end`.
    Delete,
    /// `b[b_start..b_end]` is inserted at `a_start`; `a_start == a_end`.
    Insert,
}

impl OpTag {
    /// Lower-case name, as used in diff listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Replace => "replace",
            Self::Delete => "delete",
            Self::Insert => "insert",
        }
    }
}

impl fmt::Display for OpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the edit script between two sequences.
///
/// Opcodes for a pair of sequences cover both of them left to right with no
/// gaps: each opcode starts where the previous one ended, on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode {
    /// Kind of edit.
    pub tag: OpTag,
    /// Start index in the first sequence (inclusive).
    pub a_start: usize,
    /// End index in the first sequence (exclusive).
    pub a_end: usize,
    /// Start index in the second sequence (inclusive).
    pub b_start: usize,
    /// End index in the second sequence (exclusive).
    pub b_end: usize,
}

impl Opcode {
    /// Creates an opcode.
    #[must_use]
    pub const fn new(tag: OpTag, a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> Self {
        Self {
            tag,
            a_start,
            a_end,
            b_start,
            b_end,
        }
    }

    /// Range covered in the first sequence.
    #[must_use]
    pub const fn a_range(&self) -> Range<usize> {
        self.a_start..self.a_end
    }

    /// Range covered in the second sequence.
    #[must_use]
    pub const fn b_range(&self) -> Range<usize> {
        self.b_start..self.b_end
    }

    /// Number of tokens consumed from the first sequence.
    #[must_use]
    pub const fn a_len(&self) -> usize {
        self.a_end - self.a_start
    }

    /// Number of tokens consumed from the second sequence.
    #[must_use]
    pub const fn b_len(&self) -> usize {
        self.b_end - self.b_start
    }

    /// Returns true if this operation represents a change (not equal).
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self.tag, OpTag::Equal)
    }
}
