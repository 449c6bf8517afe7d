//! Intraline marking for replaced blocks.

use std::iter::repeat_n;
use std::ops::Range;

use super::{Delta, Differ, LineTag, dump};
use crate::junk::Junk;
use crate::matcher::{OpTag, SequenceMatcher};

/// A pair must score above this to be considered at all.
const BEST_RATIO_FLOOR: f64 = 0.74;

/// A pair must score at least this to become a sync point.
const SYNC_CUTOFF: f64 = 0.75;

/// Work left in a replaced block, processed in output order.
enum Pending {
    /// Lines `a[..]` replaced by lines `b[..]`, as index ranges.
    Block(Range<usize>, Range<usize>),
    /// Sync point at `(i, j)`; `true` when the two lines are identical.
    Synced(usize, usize, bool),
}

impl Differ {
    /// Emits a replaced block, synchronizing on its most similar pair of
    /// lines.
    ///
    /// Identical lines inside a replaced block only ever come from junk, so
    /// they are used as the sync point only when no similar pair qualifies.
    /// With neither, the block is dumped as-is. The ranges before and after
    /// each sync point are processed from an explicit stack, like
    /// [`SequenceMatcher::matching_blocks`].
    pub(super) fn fancy_replace(&self, delta: &mut Delta, a: &[&str], b: &[&str]) {
        let a_chars: Vec<Vec<char>> = a.iter().map(|line| line.chars().collect()).collect();
        let b_chars: Vec<Vec<char>> = b.iter().map(|line| line.chars().collect()).collect();
        let mut cruncher = SequenceMatcher::with_junk(Junk::from_option(self.char_junk), &[], &[]);

        let mut stack = vec![Pending::Block(0..a.len(), 0..b.len())];
        while let Some(pending) = stack.pop() {
            match pending {
                Pending::Synced(i, _, true) => delta.push(LineTag::Common, a[i]),
                Pending::Synced(i, j, false) => {
                    cruncher.set_seqs(&a_chars[i], &b_chars[j]);
                    let (a_tags, b_tags) =
                        intraline_tags(&cruncher, a_chars[i].len(), b_chars[j].len());
                    qformat(delta, a[i], b[j], &a_tags, &b_tags);
                }
                Pending::Block(a_range, b_range) => {
                    match (a_range.is_empty(), b_range.is_empty()) {
                        (false, false) => {}
                        (false, true) => {
                            dump(delta, LineTag::Removed, &a[a_range]);
                            continue;
                        }
                        (true, false) => {
                            dump(delta, LineTag::Added, &b[b_range]);
                            continue;
                        }
                        (true, true) => continue,
                    }

                    let Some((i, j, identical)) =
                        find_sync_pair(&mut cruncher, a, b, &a_chars, &b_chars, &a_range, &b_range)
                    else {
                        Self::plain_replace(delta, &a[a_range], &b[b_range]);
                        continue;
                    };
                    stack.push(Pending::Block(i + 1..a_range.end, j + 1..b_range.end));
                    stack.push(Pending::Synced(i, j, identical));
                    stack.push(Pending::Block(a_range.start..i, b_range.start..j));
                }
            }
        }
    }
}

/// Finds the most similar non-identical pair of lines within the ranges,
/// falling back to the first identical pair.
fn find_sync_pair<'c>(
    cruncher: &mut SequenceMatcher<'c, char>,
    a: &[&str],
    b: &[&str],
    a_chars: &'c [Vec<char>],
    b_chars: &'c [Vec<char>],
    a_range: &Range<usize>,
    b_range: &Range<usize>,
) -> Option<(usize, usize, bool)> {
    let mut best_ratio = BEST_RATIO_FLOOR;
    let mut best_pair = None;
    let mut eq_pair = None;
    for j in b_range.clone() {
        cruncher.set_seq2(&b_chars[j]);
        for i in a_range.clone() {
            if a[i] == b[j] {
                eq_pair.get_or_insert((i, j));
                continue;
            }
            cruncher.set_seq1(&a_chars[i]);
            // Upper bounds first; ratio() is the expensive one.
            if cruncher.real_quick_ratio() > best_ratio && cruncher.quick_ratio() > best_ratio {
                let ratio = cruncher.ratio();
                if ratio > best_ratio {
                    best_ratio = ratio;
                    best_pair = Some((i, j));
                }
            }
        }
    }

    match (best_pair, eq_pair) {
        (Some((i, j)), _) if best_ratio >= SYNC_CUTOFF => Some((i, j, false)),
        (_, Some((i, j))) => Some((i, j, true)),
        _ => None,
    }
}

/// Builds the per-character hint strings from a character-level matcher.
fn intraline_tags(
    cruncher: &SequenceMatcher<'_, char>,
    a_len: usize,
    b_len: usize,
) -> (String, String) {
    let mut a_tags = String::with_capacity(a_len);
    let mut b_tags = String::with_capacity(b_len);
    for code in cruncher.opcodes() {
        let (la, lb) = (code.a_len(), code.b_len());
        match code.tag {
            OpTag::Replace => {
                a_tags.extend(repeat_n('^', la));
                b_tags.extend(repeat_n('^', lb));
            }
            OpTag::Delete => a_tags.extend(repeat_n('-', la)),
            OpTag::Insert => b_tags.extend(repeat_n('+', lb)),
            OpTag::Equal => {
                a_tags.extend(repeat_n(' ', la));
                b_tags.extend(repeat_n(' ', lb));
            }
        }
    }
    (a_tags, b_tags)
}

/// Emits a synced pair with its hint lines.
///
/// Leading tabs shared by both lines are kept as tabs in the hints so the
/// markers line up under tab-indented text. Blank hints are omitted.
fn qformat(delta: &mut Delta, a_line: &str, b_line: &str, a_tags: &str, b_tags: &str) {
    let leading_tabs = |s: &str| s.chars().take_while(|&c| c == '\t').count();
    let leading_blanks = |s: &str, limit: usize| s.chars().take(limit).take_while(|&c| c == ' ').count();

    let mut common = leading_tabs(a_line).min(leading_tabs(b_line));
    common = common.min(leading_blanks(a_tags, common));
    common = common.min(leading_blanks(b_tags, common));
    let indent = "\t".repeat(common);

    let a_tags = a_tags[common..].trim_end();
    let b_tags = b_tags[common..].trim_end();

    delta.push(LineTag::Removed, a_line);
    if !a_tags.is_empty() {
        delta.push(LineTag::Hint, &format!("{indent}{a_tags}"));
    }
    delta.push(LineTag::Added, b_line);
    if !b_tags.is_empty() {
        delta.push(LineTag::Hint, &format!("{indent}{b_tags}"));
    }
}
