//! Benchmarks for difftext/src/matcher and difftext/src/differ
//!
//! Performance-critical paths:
//! - `SequenceMatcher::matching_blocks`: longest-block alignment of lines
//! - `SequenceMatcher::ratio`: character-level similarity
//! - `ndiff`: line deltas with intraline hints
//! - `get_close_matches`: ranking candidates by similarity

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use difftext::{SequenceMatcher, get_close_matches, ndiff};

/// Simulated source file: mostly distinct lines with periodic blank lines.
fn source_lines(count: usize, salt: &str) -> Vec<String> {
    (0..count)
        .map(|i| {
            if i % 7 == 0 {
                String::new()
            } else {
                format!("    let value_{i} = compute({i}, \"{salt}\");")
            }
        })
        .collect()
}

/// Copy of `lines` with every `every`-th line edited.
fn edited(lines: &[String], every: usize) -> Vec<String> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i % every == 3 {
                format!("{line} // edited")
            } else {
                line.clone()
            }
        })
        .collect()
}

fn as_refs(lines: &[String]) -> Vec<&str> {
    lines.iter().map(String::as_str).collect()
}

fn bench_matching_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher/matching_blocks");

    for count in [100usize, 1000, 5000] {
        let a = source_lines(count, "a");
        let b = edited(&a, 25);
        let (a, b) = (as_refs(&a), as_refs(&b));

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |bench, _| {
            bench.iter(|| {
                let matcher = SequenceMatcher::new(black_box(&a), black_box(&b));
                matcher.matching_blocks().len()
            });
        });
    }

    group.finish();
}

fn bench_popular_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher/popular_lines");

    // Mostly blank lines: the popularity heuristic keeps this near linear.
    let a: Vec<&str> = (0..2000).map(|i| if i % 50 == 0 { "}" } else { "" }).collect();
    let b: Vec<&str> = (0..2000).map(|i| if i % 40 == 0 { "}" } else { "" }).collect();

    group.bench_function("autojunk", |bench| {
        bench.iter(|| SequenceMatcher::new(black_box(&a), black_box(&b)).ratio());
    });
    group.bench_function("no_autojunk", |bench| {
        bench.iter(|| {
            SequenceMatcher::new(black_box(&a), black_box(&b))
                .autojunk(false)
                .ratio()
        });
    });

    group.finish();
}

fn bench_char_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher/char_ratio");

    let pairs = [
        ("short", "private Thread currentThread;", "private volatile Thread currentThread;"),
        (
            "long",
            "The quick brown fox jumps over the lazy dog while the cat watches from the fence.",
            "The quick brown fox leaps over the lazy dogs while a cat watches from the old fence.",
        ),
    ];

    for (name, x, y) in pairs {
        let a: Vec<char> = x.chars().collect();
        let b: Vec<char> = y.chars().collect();
        group.bench_function(name, |bench| {
            bench.iter(|| SequenceMatcher::new(black_box(&a), black_box(&b)).ratio());
        });
    }

    group.finish();
}

fn bench_ndiff(c: &mut Criterion) {
    let mut group = c.benchmark_group("differ/ndiff");

    for (name, every) in [("sparse_edits", 50usize), ("dense_edits", 5)] {
        let a = source_lines(500, "a");
        let b = edited(&a, every);
        let (a, b) = (as_refs(&a), as_refs(&b));

        group.bench_function(name, |bench| {
            bench.iter(|| ndiff(black_box(&a), black_box(&b)).len());
        });
    }

    group.finish();
}

fn bench_close_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("close/get_close_matches");

    let words: Vec<String> = (0..1000).map(|i| format!("identifier_{i}_name")).collect();
    let words = as_refs(&words);

    group.throughput(Throughput::Elements(words.len() as u64));
    group.bench_function("1000_candidates", |bench| {
        bench.iter(|| get_close_matches(black_box("identifer_42_nam"), &words, 3, 0.6));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_matching_blocks,
    bench_popular_lines,
    bench_char_ratio,
    bench_ndiff,
    bench_close_matches
);
criterion_main!(benches);
