//! Merge and candle-building throughput.
//!
//! Run with: `cargo bench --package candlewick-bench`

use candlewick_bench::{FixtureConfig, side_ticks, write_batch};
use candlewick_lib::{AskBidMerger, CandleBuilder, Side, Timeframe, from_ticks, process_batch};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tempfile::TempDir;

fn fixture_sizes() -> Vec<(&'static str, FixtureConfig)> {
    vec![
        (
            "1h-10k",
            FixtureConfig {
                hours: 1,
                ..Default::default()
            },
        ),
        ("4h-10k", FixtureConfig::default()),
    ]
}

fn merge_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for (name, config) in fixture_sizes() {
        let ask: Vec<_> = (0..config.hours)
            .flat_map(|h| side_ticks(&config, Side::Ask, h))
            .collect();
        let bid: Vec<_> = (0..config.hours)
            .flat_map(|h| side_ticks(&config, Side::Bid, h))
            .collect();
        group.throughput(Throughput::Elements(config.total_ticks()));

        group.bench_with_input(BenchmarkId::new("mid_ticks", name), &(ask, bid), |b, (ask, bid)| {
            b.iter(|| {
                let merger =
                    AskBidMerger::new(from_ticks(ask.clone()), from_ticks(bid.clone())).unwrap();
                black_box(merger.filter_map(Result::ok).count())
            });
        });
    }

    group.finish();
}

fn candle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("candles");
    let config = FixtureConfig::default();
    let ticks: Vec<_> = (0..config.hours)
        .flat_map(|h| side_ticks(&config, Side::Bid, h))
        .collect();
    group.throughput(Throughput::Elements(ticks.len() as u64));

    for timeframe in [Timeframe::Second1, Timeframe::Minute1, Timeframe::Hour1] {
        group.bench_with_input(
            BenchmarkId::new("build", timeframe),
            &timeframe,
            |b, &timeframe| {
                b.iter(|| {
                    let builder =
                        CandleBuilder::from_timeframe(ticks.iter().copied().map(Ok), timeframe)
                            .unwrap();
                    black_box(builder.count())
                });
            },
        );
    }

    group.finish();
}

fn batch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(20);

    for (name, config) in fixture_sizes() {
        let dir = TempDir::new().unwrap();
        let (ask, bid) = write_batch(dir.path(), "K", &config).unwrap();
        group.throughput(Throughput::Elements(config.total_ticks()));

        group.bench_function(BenchmarkId::new("process_batch", name), |b| {
            b.iter(|| {
                let candles = process_batch(dir.path(), ask.clone(), bid.clone(), 60_000).unwrap();
                black_box(candles.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, merge_benchmark, candle_benchmark, batch_benchmark);
criterion_main!(benches);
