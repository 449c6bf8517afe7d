//! Integration tests for the history manager.
//!
//! Tests undo/redo walks, branch truncation, bounded retention, metadata
//! round trips and environment-driven configuration through the public API.

use anyhow::{Context, Result};
use difftext::{HistoryConfig, HistoryManager, Metadata, RECOMMENDED_MAX_STEPS, Snapshot};
use serde_json::json;

mod common;

/// Test a full undo walk and redo walk over a typed letter.
#[test]
fn test_undo_redo_full_walk() {
    let mut session = common::EditingSession::new();
    for draft in common::letter_drafts() {
        session.type_text(&draft);
    }

    let undone = session.undo_all();
    let mut expected: Vec<String> = session.recorded[..session.recorded.len() - 1].to_vec();
    expected.reverse();
    assert_eq!(undone, expected);

    let redone = session.redo_all();
    assert_eq!(redone, session.recorded[1..].to_vec());
    assert_eq!(
        session.history.current_text().as_deref(),
        session.recorded.last().map(String::as_str)
    );
}

/// Test that editing after undo discards the undone branch for good.
#[test]
fn test_branch_truncation() -> Result<()> {
    let mut history = HistoryManager::new();
    history.add("A").add("B").add("C").add("D");

    history.undo().context("undo to C")?;
    let restored = history.undo().context("undo to B")?;
    assert_eq!(restored.text, "B");

    history.add("E");
    assert_eq!(history.len(), 3);

    let mut texts = vec![history.current_text().context("current text")?.into_owned()];
    while let Some(restored) = history.undo() {
        texts.push(restored.text);
    }
    assert_eq!(texts, ["E", "B", "A"]);
    Ok(())
}

/// Test that bounded retention never gives back evicted texts.
#[test]
fn test_capacity_eviction() -> Result<()> {
    let config = HistoryConfig::builder().max_steps(2).build()?;
    let mut session = common::EditingSession::with_config(config);
    session.type_text("A").type_text("B").type_text("C").type_text("D");

    let undone = session.undo_all();
    assert_eq!(undone, ["C", "B"]);
    assert!(!undone.contains(&"A".to_string()));
    Ok(())
}

/// Test the recommended bound over a long session.
#[test]
fn test_recommended_bound_keeps_window() -> Result<()> {
    let config = HistoryConfig::builder().max_steps(RECOMMENDED_MAX_STEPS).build()?;
    let mut session = common::EditingSession::with_config(config);
    for i in 0..(RECOMMENDED_MAX_STEPS + 50) {
        session.type_text(&format!("line {i}"));
    }

    assert_eq!(session.history.len(), RECOMMENDED_MAX_STEPS + 1);
    let undone = session.undo_all();
    assert_eq!(undone.len(), RECOMMENDED_MAX_STEPS);
    assert_eq!(undone.last().map(String::as_str), Some("line 49"));
    Ok(())
}

/// Test that only the newest entry keeps its full text.
#[test]
fn test_single_materialized_entry() {
    let mut history = HistoryManager::new();
    history.add("one").add("one\ntwo").add("one\ntwo\nthree");
    history.undo();
    history.add("one\n2");

    let materialized: Vec<bool> = history
        .entries()
        .iter()
        .map(|entry| matches!(entry.snapshot(), Snapshot::Materialized(_)))
        .collect();
    assert_eq!(materialized, [false, false, true]);
    assert_eq!(history.entries()[2].text(), Some("one\n2"));
}

/// Test that caller metadata comes back untouched on undo and redo.
#[test]
fn test_metadata_round_trip() -> Result<()> {
    let mut history = HistoryManager::new();
    history
        .add_with_metadata("Hallo!", Metadata::with_caret(6))
        .add_with_metadata(
            "Hallo!\nHallo Welt",
            Metadata::with_caret(17).with_field("scrollTop", 120),
        );

    let undone = history.undo().context("undo")?;
    assert_eq!(undone.text, "Hallo!");
    assert_eq!(
        serde_json::to_value(&undone.metadata)?,
        json!({ "caretPosition": 17, "scrollTop": 120 })
    );

    let redone = history.redo().context("redo")?;
    assert_eq!(redone.text, "Hallo!\nHallo Welt");
    assert_eq!(redone.metadata, undone.metadata);
    Ok(())
}

/// Test configuration loading from an environment-like lookup.
#[test]
fn test_config_from_lookup() -> Result<()> {
    let config = HistoryConfig::from_lookup(|key| match key {
        "DIFFTEXT_MAX_STEPS" => Some("3".to_string()),
        "DIFFTEXT_SEPARATOR" => Some(String::new()),
        _ => None,
    })?;
    let mut history = HistoryManager::with_config(config);
    history.add("ab").add("abc").add("abcd").add("abcde").add("abcdef");

    assert_eq!(history.max_steps(), Some(3));
    assert_eq!(history.separator(), "");
    assert_eq!(history.len(), 4);
    Ok(())
}

/// Test that configuration survives a serde round trip.
#[test]
fn test_config_serde() -> Result<()> {
    let config = HistoryConfig::builder().max_steps(10).separator("\n").build()?;
    let restored: HistoryConfig = serde_json::from_str(&serde_json::to_string(&config)?)?;
    assert_eq!(restored, config);
    Ok(())
}
