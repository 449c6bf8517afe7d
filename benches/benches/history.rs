//! Benchmarks for difftext/src/history
//!
//! Performance-critical paths:
//! - `HistoryManager::add`: delta computation against the current text
//! - `HistoryManager::undo` / `redo`: text reconstruction from deltas

#![allow(missing_docs)]

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use difftext::{HistoryConfig, HistoryManager, RECOMMENDED_MAX_STEPS};

/// Successive versions of a document, each appending one line.
fn typing_session(steps: usize) -> Vec<String> {
    let mut text = String::from("# Notes");
    let mut versions = Vec::with_capacity(steps);
    for i in 0..steps {
        text.push_str(&format!("\n- item {i}: remember to check the {i}th entry"));
        versions.push(text.clone());
    }
    versions
}

fn filled_history(versions: &[String], separator: &str) -> HistoryManager {
    let config = HistoryConfig {
        max_steps: Some(RECOMMENDED_MAX_STEPS),
        separator: separator.to_string(),
    };
    let mut history = HistoryManager::with_config(config);
    for version in versions {
        history.add(version.as_str());
    }
    history
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("history/add");

    for steps in [10usize, 100, 400] {
        let versions = typing_session(steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &versions, |b, versions| {
            b.iter(|| filled_history(black_box(versions), "\n").len());
        });
    }

    group.finish();
}

fn bench_add_by_character(c: &mut Criterion) {
    let mut group = c.benchmark_group("history/add_by_character");

    let versions = typing_session(20);
    group.bench_function("20_steps", |b| {
        b.iter(|| filled_history(black_box(&versions), "").len());
    });

    group.finish();
}

fn bench_undo_redo_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("history/undo_redo_cycle");

    for steps in [10usize, 100] {
        let versions = typing_session(steps);
        let history = filled_history(&versions, "\n");

        group.bench_with_input(BenchmarkId::from_parameter(steps), &history, |b, history| {
            b.iter_batched(
                || history.clone(),
                |mut history| {
                    while history.undo().is_some() {}
                    while history.redo().is_some() {}
                    history.position()
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add, bench_add_by_character, bench_undo_redo_cycle);
criterion_main!(benches);
