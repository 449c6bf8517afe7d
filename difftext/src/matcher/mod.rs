//! Sequence matcher - longest-block alignment of two token sequences.
//!
//! The matcher looks for the longest contiguous matching block that contains
//! no junk, then recurses on the pieces to the left and right of it. This
//! does not produce minimal edit sequences, but it produces matches that
//! "look right" to people: accidental one-token matches hundreds of tokens
//! apart never win over a long shared run.
//!
//! The second sequence is indexed once (`b2j`), so comparing one sequence
//! against many is cheapest with [`SequenceMatcher::set_seq2`] called once
//! and [`SequenceMatcher::set_seq1`] called per candidate.

pub mod opcode;

pub use opcode::{Match, OpTag, Opcode};

use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::junk::Junk;

/// Minimum length of `b` before popular tokens are dropped from the index.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Default number of context tokens around each change in grouped opcodes.
pub const DEFAULT_CONTEXT: usize = 3;

/// Compares two sequences of hashable tokens.
///
/// Caches the matching blocks, opcodes, and token counts of `b` until a
/// sequence is replaced, so repeated [`ratio`](Self::ratio) calls are cheap.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    junk: Junk<T>,
    autojunk: bool,
    /// Positions of each indexed token in `b`, ascending.
    b2j: HashMap<T, Vec<usize>>,
    /// Tokens of `b` the junk strategy rejected.
    b_junk: HashSet<T>,
    /// Tokens of `b` dropped from the index for being too frequent.
    b_popular: HashSet<T>,
    full_b_count: OnceCell<HashMap<T, usize>>,
    matching_blocks: OnceCell<Vec<Match>>,
    opcodes: OnceCell<Vec<Opcode>>,
}

impl<'a, T> SequenceMatcher<'a, T>
where
    T: Copy + Eq + Hash,
{
    /// Creates a matcher with no junk and the popularity heuristic enabled.
    #[must_use]
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self::with_junk(Junk::None, a, b)
    }

    /// Creates a matcher with a junk strategy.
    #[must_use]
    pub fn with_junk(junk: Junk<T>, a: &'a [T], b: &'a [T]) -> Self {
        let mut matcher = Self {
            a,
            b,
            junk,
            autojunk: true,
            b2j: HashMap::new(),
            b_junk: HashSet::new(),
            b_popular: HashSet::new(),
            full_b_count: OnceCell::new(),
            matching_blocks: OnceCell::new(),
            opcodes: OnceCell::new(),
        };
        matcher.chain_b();
        matcher
    }

    /// Enables or disables treating popular tokens of a long `b` as junk.
    #[must_use]
    pub fn autojunk(mut self, enabled: bool) -> Self {
        if self.autojunk != enabled {
            self.autojunk = enabled;
            self.reset_results();
            self.chain_b();
        }
        self
    }

    /// Replaces both sequences.
    pub fn set_seqs(&mut self, a: &'a [T], b: &'a [T]) {
        self.set_seq1(a);
        self.set_seq2(b);
    }

    /// Replaces the first sequence; the index of `b` is kept.
    pub fn set_seq1(&mut self, a: &'a [T]) {
        if std::ptr::eq(a, self.a) {
            return;
        }
        self.a = a;
        self.reset_results();
    }

    /// Replaces the second sequence and re-indexes it.
    pub fn set_seq2(&mut self, b: &'a [T]) {
        if std::ptr::eq(b, self.b) {
            return;
        }
        self.b = b;
        self.reset_results();
        self.full_b_count = OnceCell::new();
        self.chain_b();
    }

    /// The first sequence.
    #[must_use]
    pub const fn a(&self) -> &'a [T] {
        self.a
    }

    /// The second sequence.
    #[must_use]
    pub const fn b(&self) -> &'a [T] {
        self.b
    }

    /// Returns true if `token` was classified as junk while indexing `b`.
    ///
    /// Only meaningful for tokens that occur in `b`.
    #[must_use]
    pub fn is_b_junk(&self, token: &T) -> bool {
        self.b_junk.contains(token)
    }

    /// Returns true if `token` was dropped from the index of `b` for being
    /// too frequent.
    #[must_use]
    pub fn is_b_popular(&self, token: &T) -> bool {
        self.b_popular.contains(token)
    }

    fn reset_results(&mut self) {
        self.matching_blocks = OnceCell::new();
        self.opcodes = OnceCell::new();
    }

    /// Builds `b2j`, then purges junk and popular tokens from it.
    fn chain_b(&mut self) {
        let mut b2j: HashMap<T, Vec<usize>> = HashMap::new();
        for (i, &token) in self.b.iter().enumerate() {
            b2j.entry(token).or_default().push(i);
        }

        // Classify after counting: the predicate then runs once per
        // distinct token instead of once per position.
        let mut b_junk = HashSet::new();
        if let Junk::Predicate(is_junk) = self.junk {
            b2j.retain(|&token, _| {
                let junk = is_junk(token);
                if junk {
                    b_junk.insert(token);
                }
                !junk
            });
        }

        let mut b_popular = HashSet::new();
        let n = self.b.len();
        if self.autojunk && n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            b2j.retain(|&token, indices| {
                let popular = indices.len() > ntest;
                if popular {
                    b_popular.insert(token);
                }
                !popular
            });
        }

        self.b2j = b2j;
        self.b_junk = b_junk;
        self.b_popular = b_popular;
    }

    /// Finds the longest matching block in `a[a_lo..a_hi]` and
    /// `b[b_lo..b_hi]`.
    ///
    /// Of all maximal blocks, returns the one starting earliest in `a`, and
    /// of those the one starting earliest in `b`. The junk-free winner is
    /// then widened on both ends, first through equal non-junk tokens (which
    /// covers popular tokens missing from the index), then through equal
    /// junk tokens. Returns a block of size 0 when nothing matches.
    #[must_use]
    pub fn find_longest_match(&self, a_lo: usize, a_hi: usize, b_lo: usize, b_hi: usize) -> Match {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);

        // j2len[j] is the length of the longest junk-free match ending with
        // a[i - 1] and b[j].
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        for (i, token) in a.iter().enumerate().take(a_hi).skip(a_lo) {
            new_j2len.clear();
            if let Some(indices) = self.b2j.get(token) {
                for &j in indices {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        break;
                    }
                    let previous = j
                        .checked_sub(1)
                        .and_then(|p| j2len.get(&p))
                        .copied()
                        .unwrap_or(0);
                    let k = previous + 1;
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            std::mem::swap(&mut j2len, &mut new_j2len);
        }

        for junk_pass in [false, true] {
            while best_i > a_lo
                && best_j > b_lo
                && self.is_b_junk(&b[best_j - 1]) == junk_pass
                && a[best_i - 1] == b[best_j - 1]
            {
                best_i -= 1;
                best_j -= 1;
                best_size += 1;
            }
            while best_i + best_size < a_hi
                && best_j + best_size < b_hi
                && self.is_b_junk(&b[best_j + best_size]) == junk_pass
                && a[best_i + best_size] == b[best_j + best_size]
            {
                best_size += 1;
            }
        }

        Match::new(best_i, best_j, best_size)
    }

    /// Returns the matching blocks, ascending in both sequences.
    ///
    /// Adjacent blocks are always merged, and the list ends with the
    /// sentinel `(a.len(), b.len(), 0)`, the only block of size 0.
    pub fn matching_blocks(&self) -> &[Match] {
        self.matching_blocks
            .get_or_init(|| self.compute_matching_blocks())
    }

    fn compute_matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());

        // Explicit stack of (a_lo, a_hi, b_lo, b_hi) ranges still to scan;
        // recursion depth would grow with the number of blocks.
        let mut pending = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();
        while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
            let found = self.find_longest_match(a_lo, a_hi, b_lo, b_hi);
            let Match { a: i, b: j, size: k } = found;
            if k == 0 {
                continue;
            }
            blocks.push(found);
            if a_lo < i && b_lo < j {
                pending.push((a_lo, i, b_lo, j));
            }
            if i + k < a_hi && j + k < b_hi {
                pending.push((i + k, a_hi, j + k, b_hi));
            }
        }
        blocks.sort_unstable();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Match::new(la, lb, 0));
        merged
    }

    /// Returns the edit script turning `a` into `b`.
    ///
    /// The first opcode starts at `(0, 0)`; each later one starts where the
    /// previous one ended.
    pub fn opcodes(&self) -> &[Opcode] {
        self.opcodes.get_or_init(|| {
            let (mut i, mut j) = (0, 0);
            let mut codes = Vec::new();
            for &Match { a: ai, b: bj, size } in self.matching_blocks() {
                let tag = match (i < ai, j < bj) {
                    (true, true) => Some(OpTag::Replace),
                    (true, false) => Some(OpTag::Delete),
                    (false, true) => Some(OpTag::Insert),
                    (false, false) => None,
                };
                if let Some(tag) = tag {
                    codes.push(Opcode::new(tag, i, ai, j, bj));
                }
                i = ai + size;
                j = bj + size;
                if size > 0 {
                    codes.push(Opcode::new(OpTag::Equal, ai, i, bj, j));
                }
            }
            codes
        })
    }

    /// Splits the opcodes into hunks with up to `context` unchanged tokens
    /// around each change.
    ///
    /// An equal run longer than `2 * context` closes the current hunk.
    /// Identical sequences produce no hunks.
    #[must_use]
    pub fn grouped_opcodes(&self, context: usize) -> Vec<Vec<Opcode>> {
        let mut codes = self.opcodes().to_vec();
        if codes.is_empty() {
            codes.push(Opcode::new(OpTag::Equal, 0, 1, 0, 1));
        }
        // Trim unchanged leading and trailing runs to the context size.
        if let Some(first) = codes.first_mut()
            && first.tag == OpTag::Equal
        {
            first.a_start = first.a_start.max(first.a_end.saturating_sub(context));
            first.b_start = first.b_start.max(first.b_end.saturating_sub(context));
        }
        if let Some(last) = codes.last_mut()
            && last.tag == OpTag::Equal
        {
            last.a_end = last.a_end.min(last.a_start + context);
            last.b_end = last.b_end.min(last.b_start + context);
        }

        let span = context * 2;
        let mut groups = Vec::new();
        let mut group = Vec::new();
        for mut code in codes {
            if code.tag == OpTag::Equal && code.a_len() > span {
                group.push(Opcode::new(
                    OpTag::Equal,
                    code.a_start,
                    code.a_end.min(code.a_start + context),
                    code.b_start,
                    code.b_end.min(code.b_start + context),
                ));
                groups.push(std::mem::take(&mut group));
                code.a_start = code.a_start.max(code.a_end.saturating_sub(context));
                code.b_start = code.b_start.max(code.b_end.saturating_sub(context));
            }
            group.push(code);
        }
        if !group.is_empty() && !(group.len() == 1 && group[0].tag == OpTag::Equal) {
            groups.push(group);
        }
        groups
    }

    /// Similarity in `[0, 1]`: `2 * M / T` for `M` matched tokens out of
    /// `T` tokens in both sequences.
    ///
    /// Expensive on first call; [`quick_ratio`](Self::quick_ratio) and
    /// [`real_quick_ratio`](Self::real_quick_ratio) are upper bounds.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        let matches = self.matching_blocks().iter().map(|m| m.size).sum();
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from the multiset
    /// intersection of the two sequences, ignoring order.
    #[must_use]
    pub fn quick_ratio(&self) -> f64 {
        let full_b_count = self.full_b_count.get_or_init(|| {
            let mut counts = HashMap::new();
            for &token in self.b {
                *counts.entry(token).or_insert(0) += 1;
            }
            counts
        });

        // avail[x] is how many copies of x in b are not yet paired with an
        // x seen in a.
        let mut avail: HashMap<T, usize> = HashMap::new();
        let mut matches = 0;
        for &token in self.a {
            let remaining = avail
                .entry(token)
                .or_insert_with(|| full_b_count.get(&token).copied().unwrap_or(0));
            if *remaining > 0 {
                *remaining -= 1;
                matches += 1;
            }
        }
        calculate_ratio(matches, self.a.len() + self.b.len())
    }

    /// Cheapest upper bound on [`ratio`](Self::ratio): the shorter sequence
    /// bounds the number of matches.
    #[must_use]
    pub fn real_quick_ratio(&self) -> f64 {
        let (la, lb) = (self.a.len(), self.b.len());
        calculate_ratio(la.min(lb), la + lb)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SequenceMatcher<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceMatcher")
            .field("a", &self.a)
            .field("b", &self.b)
            .field("autojunk", &self.autojunk)
            .finish_non_exhaustive()
    }
}

fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / length as f64
}
