//! Line deltas and their reconstruction.
//!
//! A delta is a human-readable transcript of two line sequences. Every line
//! carries a two-character prefix naming where it came from, so either
//! input can be recovered by filtering on prefixes.

use std::fmt;

use crate::error::DiffError;

/// Prefix of a delta line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineTag {
    /// `"  "`: present in both sequences.
    Common,
    /// `"- "`: only in the first sequence.
    Removed,
    /// `"+ "`: only in the second sequence.
    Added,
    /// `"? "`: intraline hint, present in neither sequence.
    Hint,
}

impl LineTag {
    /// The two-character prefix.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Common => "  ",
            Self::Removed => "- ",
            Self::Added => "+ ",
            Self::Hint => "? ",
        }
    }

    /// Splits a delta line into its tag and content.
    ///
    /// Returns `None` for lines without a recognized prefix.
    #[must_use]
    pub fn parse(line: &str) -> Option<(Self, &str)> {
        [Self::Common, Self::Removed, Self::Added, Self::Hint]
            .into_iter()
            .find_map(|tag| line.strip_prefix(tag.prefix()).map(|rest| (tag, rest)))
    }

    /// Formats `content` as a delta line with this tag.
    #[must_use]
    pub fn line(self, content: &str) -> String {
        let mut line = String::with_capacity(content.len() + 2);
        line.push_str(self.prefix());
        line.push_str(content);
        line
    }
}

/// Which side of a delta to rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The first sequence: common and removed lines.
    Backward,
    /// The second sequence: common and added lines.
    Forward,
}

impl Direction {
    /// Tag kept in addition to [`LineTag::Common`].
    #[must_use]
    pub const fn tag(self) -> LineTag {
        match self {
            Self::Backward => LineTag::Removed,
            Self::Forward => LineTag::Added,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = DiffError;

    /// Maps the classic `restore` codes: `1` for the first sequence, `2`
    /// for the second.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Backward),
            2 => Ok(Self::Forward),
            _ => Err(DiffError::InvalidDirection { code }),
        }
    }
}

/// An ordered list of tagged lines produced by a [`Differ`](super::Differ).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Delta {
    lines: Vec<String>,
}

impl Delta {
    /// Creates an empty delta.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The tagged lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the delta, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Number of tagged lines, hints included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true when the delta has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over the tagged lines.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    /// Number of lines only present on one side.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| {
                matches!(
                    LineTag::parse(line),
                    Some((LineTag::Removed | LineTag::Added, _))
                )
            })
            .count()
    }

    /// Rebuilds one side of the delta. See [`restore`].
    #[must_use]
    pub fn restore(&self, direction: Direction) -> Vec<String> {
        restore(&self.lines, direction)
    }

    pub(crate) fn push(&mut self, tag: LineTag, content: &str) {
        self.lines.push(tag.line(content));
    }
}

impl From<Vec<String>> for Delta {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

impl FromIterator<String> for Delta {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl<'d> IntoIterator for &'d Delta {
    type Item = &'d String;
    type IntoIter = std::slice::Iter<'d, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Rebuilds one of the two sequences a delta was computed from.
///
/// Keeps common lines plus the lines of the chosen side, with the prefix
/// stripped. Hint lines and lines without a recognized prefix are skipped,
/// so a truncated delta yields a shorter result rather than an error.
pub fn restore<S: AsRef<str>>(delta: &[S], direction: Direction) -> Vec<String> {
    let side = direction.tag();
    delta
        .iter()
        .filter_map(|line| match LineTag::parse(line.as_ref()) {
            Some((tag, content)) if tag == LineTag::Common || tag == side => {
                Some(content.to_owned())
            }
            _ => None,
        })
        .collect()
}
