//! Benchmarks for the matcher hot paths.
//!
//! Covers the three call patterns the UI produces:
//! - raw weighted distance (cold and memoized)
//! - single-word verdicts
//! - phrase analysis

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pronuncia::distance::{phonetic_distance, phonetic_distance_cached, MemoCache};
use pronuncia::matcher::{MatchOptions, PhoneticMatcher, DEFAULT_THRESHOLD};

fn word_pairs() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        // (name, spoken, target)
        ("identical", "borboleta", "borboleta"),
        ("rotacism", "lato", "rato"),
        ("sibilant", "caza", "casa"),
        ("cluster", "baço", "braço"),
        ("unrelated", "banana", "rato"),
        ("accented", "passaro", "pássaro"),
    ]
}

fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("phonetic_distance");
    for (name, spoken, target) in word_pairs() {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(spoken, target),
            |b, (spoken, target)| {
                b.iter(|| phonetic_distance(black_box(spoken), black_box(target)))
            },
        );
    }
    group.finish();
}

fn bench_distance_cached(c: &mut Criterion) {
    let cache = MemoCache::new();
    // Warm the cache so the benchmark measures the hit path.
    for (_, spoken, target) in word_pairs() {
        phonetic_distance_cached(spoken, target, &cache);
    }

    c.bench_function("phonetic_distance_cached/warm", |b| {
        b.iter(|| {
            for (_, spoken, target) in word_pairs() {
                black_box(phonetic_distance_cached(spoken, target, &cache));
            }
        })
    });
}

fn bench_is_match(c: &mut Criterion) {
    let matcher = PhoneticMatcher::new();
    let mut group = c.benchmark_group("is_match");
    for (name, spoken, target) in word_pairs() {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(spoken, target),
            |b, (spoken, target)| {
                b.iter(|| {
                    matcher.is_match(black_box(spoken), black_box(target), DEFAULT_THRESHOLD)
                })
            },
        );
    }
    group.finish();
}

fn bench_analyze_phrase(c: &mut Criterion) {
    let matcher = PhoneticMatcher::new();
    let options = MatchOptions::default();
    let spoken = "o lato roeu a roupa do rei de roma";
    let target = "o rato roeu a roupa do rei de roma";

    c.bench_function("analyze/phrase", |b| {
        b.iter(|| matcher.analyze(black_box(spoken), black_box(target), &options))
    });
}

criterion_group!(
    benches,
    bench_distance,
    bench_distance_cached,
    bench_is_match,
    bench_analyze_phrase
);
criterion_main!(benches);
