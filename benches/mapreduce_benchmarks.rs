//! Performance benchmarks for word-count runs
//! Measures tokenization, the locked map phase and full runs across lock strategies

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tally::config::EngineConfig;
use tally::mapreduce::pure::tokenize::{map_record, EmptyTokenPolicy};
use tally::mapreduce::{Coordinator, LockStrategy};

/// Synthetic corpus with a skewed vocabulary
fn create_corpus(records: usize, words_per_record: usize) -> Vec<String> {
    (0..records)
        .map(|i| {
            (0..words_per_record)
                .map(|j| match (i + j) % 10 {
                    0..=4 => "the".to_string(),
                    5 | 6 => format!("Word{},", (i * 31 + j) % 50),
                    _ => format!("rare-{}!", (i * 17 + j) % 5_000),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let corpus = create_corpus(1, 200);
    let record = &corpus[0];

    c.bench_function("map_record_200_words", |b| {
        b.iter(|| map_record(black_box(record), EmptyTokenPolicy::Discard))
    });
}

fn bench_parallelism(c: &mut Criterion) {
    let corpus = create_corpus(2_000, 40);
    let mut group = c.benchmark_group("run_by_parallelism");
    group.throughput(Throughput::Elements(corpus.len() as u64));

    for workers in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.iter(|| {
                Coordinator::new(EngineConfig::new().with_parallelism(workers))
                    .run(black_box(&corpus))
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_lock_strategies(c: &mut Criterion) {
    let corpus = create_corpus(2_000, 40);
    let mut group = c.benchmark_group("run_by_lock_strategy");

    let strategies = [
        ("global", LockStrategy::Global),
        ("sharded_8", LockStrategy::Sharded { shards: 8 }),
        ("sharded_64", LockStrategy::Sharded { shards: 64 }),
    ];

    for (name, strategy) in strategies {
        group.bench_function(name, |b| {
            b.iter(|| {
                let config = EngineConfig::new()
                    .with_parallelism(8)
                    .with_lock_strategy(strategy);
                Coordinator::new(config).run(black_box(&corpus)).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_parallelism,
    bench_lock_strategies
);
criterion_main!(benches);
