//! Property-based tests for deltas and history.
//!
//! Uses proptest to generate random line sequences and edit sessions and
//! verify the round-trip, inverse and idempotence laws.

use difftext::{
    Direction, HistoryConfig, HistoryManager, SequenceMatcher, is_character_junk, is_line_junk,
    ndiff, ndiff_with, restore,
};
use proptest::prelude::*;

/// Strategy to generate short lines from a small alphabet, so that
/// sequences share lines and near-identical lines often.
fn line_strategy() -> impl Strategy<Value = String> {
    "[ab #\t]{0,6}"
}

/// Strategy to generate a document as a list of lines.
fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line_strategy(), 0..12)
}

/// Strategy to generate a text using the line separator.
fn text_strategy() -> impl Strategy<Value = String> {
    lines_strategy().prop_map(|lines| lines.join("\n"))
}

fn as_refs(lines: &[String]) -> Vec<&str> {
    lines.iter().map(String::as_str).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: either input can be rebuilt from the delta.
    #[test]
    fn ndiff_round_trips(a in lines_strategy(), b in lines_strategy()) {
        let (a_refs, b_refs) = (as_refs(&a), as_refs(&b));
        let delta = ndiff(&a_refs, &b_refs);
        prop_assert_eq!(restore(delta.lines(), Direction::Backward), a.clone());
        prop_assert_eq!(restore(delta.lines(), Direction::Forward), b.clone());

        let delta = ndiff_with(&a_refs, &b_refs, Some(is_line_junk), Some(is_character_junk));
        prop_assert_eq!(delta.restore(Direction::Backward), a);
        prop_assert_eq!(delta.restore(Direction::Forward), b);
    }

    /// Property: matching blocks are ordered, in bounds, truly matching,
    /// never adjacent, and end with the sentinel.
    #[test]
    fn matching_blocks_are_well_formed(a in "[abc]{0,40}", b in "[abc]{0,40}") {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let matcher = SequenceMatcher::new(&a, &b);
        let blocks = matcher.matching_blocks();

        let sentinel = blocks[blocks.len() - 1];
        prop_assert_eq!((sentinel.a, sentinel.b, sentinel.size), (a.len(), b.len(), 0));
        for block in &blocks[..blocks.len() - 1] {
            prop_assert!(block.size > 0);
            prop_assert_eq!(&a[block.a..block.a + block.size], &b[block.b..block.b + block.size]);
        }
        for pair in blocks.windows(2) {
            prop_assert!(pair[0].a + pair[0].size <= pair[1].a);
            prop_assert!(pair[0].b + pair[0].size <= pair[1].b);
            prop_assert!(
                pair[1].size == 0
                    || pair[0].a + pair[0].size != pair[1].a
                    || pair[0].b + pair[0].size != pair[1].b
            );
        }
        prop_assert!(matcher.real_quick_ratio() >= matcher.quick_ratio());
        prop_assert!(matcher.quick_ratio() >= matcher.ratio());
    }

    /// Property: undo followed by redo returns to the text before the undo.
    #[test]
    fn undo_then_redo_is_identity(texts in prop::collection::vec(text_strategy(), 1..8)) {
        let mut history = HistoryManager::new();
        for text in &texts {
            history.add(text.as_str());
        }

        while history.can_undo() {
            let before = history.current_text().map(|text| text.into_owned());
            prop_assert!(history.undo().is_some());
            let redone = history.redo().map(|restored| restored.text);
            prop_assert_eq!(redone, before);
            prop_assert!(history.undo().is_some());
        }
    }

    /// Property: undo walks back through exactly the distinct recorded texts.
    #[test]
    fn undo_recovers_recorded_texts(
        texts in prop::collection::vec(text_strategy(), 1..8),
        by_character in any::<bool>(),
    ) {
        let separator = if by_character { "" } else { "\n" };
        let config = HistoryConfig::builder().separator(separator).build().unwrap();
        let mut history = HistoryManager::with_config(config);
        let mut kept: Vec<String> = Vec::new();
        for text in &texts {
            history.add(text.as_str());
            if kept.last() != Some(text) {
                kept.push(text.clone());
            }
        }
        prop_assert_eq!(history.len(), kept.len());

        let mut undone = Vec::new();
        while let Some(restored) = history.undo() {
            undone.push(restored.text);
        }
        undone.reverse();
        prop_assert_eq!(undone, kept[..kept.len() - 1].to_vec());
    }

    /// Property: adding the same text twice in a row stores it once.
    #[test]
    fn add_is_idempotent(texts in prop::collection::vec(text_strategy(), 1..6)) {
        let mut once = HistoryManager::new();
        let mut twice = HistoryManager::new();
        for text in &texts {
            once.add(text.as_str());
            twice.add(text.as_str()).add(text.as_str());
        }
        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(once.current_text(), twice.current_text());
    }
}
