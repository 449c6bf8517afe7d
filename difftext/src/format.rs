//! Unified and context diff listings.
//!
//! Both formats are built from [`SequenceMatcher::grouped_opcodes`]: each
//! group becomes one hunk with a few lines of unchanged context around the
//! changes.

use crate::matcher::{DEFAULT_CONTEXT, OpTag, Opcode, SequenceMatcher};

/// Headers and layout of a unified or context diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Name shown for the first sequence.
    pub from_file: String,
    /// Name shown for the second sequence.
    pub to_file: String,
    /// Modification time of the first sequence, appended after a tab.
    pub from_date: String,
    /// Modification time of the second sequence, appended after a tab.
    pub to_date: String,
    /// Unchanged lines shown around each change.
    pub context: usize,
    /// Terminator for the control lines (headers and hunk markers).
    ///
    /// Content lines are emitted as given. Use `""` for inputs without
    /// trailing newlines.
    pub line_term: String,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            from_file: String::new(),
            to_file: String::new(),
            from_date: String::new(),
            to_date: String::new(),
            context: DEFAULT_CONTEXT,
            line_term: "\n".to_string(),
        }
    }
}

impl DiffOptions {
    /// Creates options with empty headers, 3 lines of context, and `"\n"`
    /// control line terminators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file names.
    #[must_use]
    pub fn files(mut self, from_file: impl Into<String>, to_file: impl Into<String>) -> Self {
        self.from_file = from_file.into();
        self.to_file = to_file.into();
        self
    }

    /// Sets the modification times.
    #[must_use]
    pub fn dates(mut self, from_date: impl Into<String>, to_date: impl Into<String>) -> Self {
        self.from_date = from_date.into();
        self.to_date = to_date.into();
        self
    }

    /// Sets the number of context lines.
    #[must_use]
    pub const fn context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    /// Sets the control line terminator.
    #[must_use]
    pub fn line_term(mut self, line_term: impl Into<String>) -> Self {
        self.line_term = line_term.into();
        self
    }

    fn header(&self, marker: &str, file: &str, date: &str) -> String {
        if date.is_empty() {
            format!("{marker} {file}{}", self.line_term)
        } else {
            format!("{marker} {file}\t{date}{}", self.line_term)
        }
    }
}

/// Compares two sequences of lines as a unified diff (`diff -u`).
///
/// Returns no lines at all when the sequences are equal.
///
/// ```
/// use difftext::{DiffOptions, unified_diff};
///
/// let options = DiffOptions::new().files("Original", "Current").line_term("");
/// let diff = unified_diff(&["one", "two", "three", "four"], &["zero", "one", "tree", "four"], &options);
/// assert_eq!(
///     diff,
///     ["--- Original", "+++ Current", "@@ -1,4 +1,4 @@", "+zero", " one", "-two", "-three", "+tree", " four"]
/// );
/// ```
#[must_use]
pub fn unified_diff(a: &[&str], b: &[&str], options: &DiffOptions) -> Vec<String> {
    let groups = SequenceMatcher::new(a, b).grouped_opcodes(options.context);
    let mut lines = Vec::new();
    if groups.is_empty() {
        return lines;
    }

    lines.push(options.header("---", &options.from_file, &options.from_date));
    lines.push(options.header("+++", &options.to_file, &options.to_date));

    for group in &groups {
        let (a_range, b_range) = hunk_bounds(group);
        lines.push(format!(
            "@@ -{} +{} @@{}",
            unified_range(a_range.0, a_range.1),
            unified_range(b_range.0, b_range.1),
            options.line_term
        ));

        for code in group {
            if code.tag == OpTag::Equal {
                lines.extend(a[code.a_range()].iter().map(|line| format!(" {line}")));
                continue;
            }
            if matches!(code.tag, OpTag::Replace | OpTag::Delete) {
                lines.extend(a[code.a_range()].iter().map(|line| format!("-{line}")));
            }
            if matches!(code.tag, OpTag::Replace | OpTag::Insert) {
                lines.extend(b[code.b_range()].iter().map(|line| format!("+{line}")));
            }
        }
    }
    lines
}

/// Compares two sequences of lines as a context diff (`diff -c`).
///
/// Each hunk lists the first sequence's side under `*** r1 ****` and the
/// second's under `--- r2 ----`; a side without changes shows only its
/// range line. Returns no lines at all when the sequences are equal.
#[must_use]
pub fn context_diff(a: &[&str], b: &[&str], options: &DiffOptions) -> Vec<String> {
    let groups = SequenceMatcher::new(a, b).grouped_opcodes(options.context);
    let mut lines = Vec::new();
    if groups.is_empty() {
        return lines;
    }

    lines.push(options.header("***", &options.from_file, &options.from_date));
    lines.push(options.header("---", &options.to_file, &options.to_date));

    for group in &groups {
        let (a_range, b_range) = hunk_bounds(group);
        lines.push(format!("***************{}", options.line_term));

        lines.push(format!(
            "*** {} ****{}",
            context_range(a_range.0, a_range.1),
            options.line_term
        ));
        if group
            .iter()
            .any(|code| matches!(code.tag, OpTag::Replace | OpTag::Delete))
        {
            for code in group.iter().filter(|code| code.tag != OpTag::Insert) {
                let prefix = context_prefix(code.tag);
                lines.extend(a[code.a_range()].iter().map(|line| format!("{prefix}{line}")));
            }
        }

        lines.push(format!(
            "--- {} ----{}",
            context_range(b_range.0, b_range.1),
            options.line_term
        ));
        if group
            .iter()
            .any(|code| matches!(code.tag, OpTag::Replace | OpTag::Insert))
        {
            for code in group.iter().filter(|code| code.tag != OpTag::Delete) {
                let prefix = context_prefix(code.tag);
                lines.extend(b[code.b_range()].iter().map(|line| format!("{prefix}{line}")));
            }
        }
    }
    lines
}

/// `((a_start, a_end), (b_start, b_end))` spanned by a hunk.
fn hunk_bounds(group: &[Opcode]) -> ((usize, usize), (usize, usize)) {
    match (group.first(), group.last()) {
        (Some(first), Some(last)) => ((first.a_start, last.a_end), (first.b_start, last.b_end)),
        _ => ((0, 0), (0, 0)),
    }
}

const fn context_prefix(tag: OpTag) -> &'static str {
    match tag {
        OpTag::Insert => "+ ",
        OpTag::Delete => "- ",
        OpTag::Replace => "! ",
        OpTag::Equal => "  ",
    }
}

/// One-based `start,length`; a single line is just `start`, and an empty
/// range starts at the line before it.
fn unified_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    match length {
        0 => format!("{start},0"),
        1 => format!("{}", start + 1),
        _ => format!("{},{length}", start + 1),
    }
}

/// One-based `first,last`; a single line or an empty range is one number.
fn context_range(start: usize, stop: usize) -> String {
    match stop - start {
        0 => format!("{start}"),
        1 => format!("{}", start + 1),
        length => format!("{},{}", start + 1, start + length),
    }
}
