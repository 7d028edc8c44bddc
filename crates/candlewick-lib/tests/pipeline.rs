//! End-to-end tests over directories of tick files.

use std::fs;
use std::path::Path;

use approx::assert_abs_diff_eq;
use candlewick_lib::prelude::*;
use candlewick_lib::{BatchOrganizer, TickParseError, mid_ticks, process_batch};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, lines: &[&str]) {
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(dir.join(name), contents).unwrap();
}

fn symbol() -> Symbol {
    Symbol::new("ADAUSD").unwrap()
}

fn config(dir: &Path, timeframe: Timeframe) -> PipelineConfig {
    PipelineConfig::new(symbol())
        .with_input_dir(dir)
        .with_timeframe(timeframe)
}

#[test]
fn test_two_sided_scenario() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tick_ADAUSD_A_ASK_00.csv", &["1000,10.0,1", "2000,10.4,1"]);
    write(dir.path(), "tick_ADAUSD_A_BID_00.csv", &["1000,9.8,1", "2000,10.0,1"]);

    let organizer = BatchOrganizer::build(dir.path()).unwrap();
    let (ask, bid) = organizer.get_batch("tick_ADAUSD_A_ASK_00.csv").unwrap().into_parts();

    let ticks = mid_ticks(dir.path(), ask.clone(), bid.clone()).unwrap();
    let epochs: Vec<_> = ticks.iter().map(|t| t.epoch).collect();
    assert_eq!(epochs, vec![1000, 2000, 2000]);

    let candles = process_batch(dir.path(), ask, bid, 1000).unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0], Candle::new(1000, 9.9, 9.9, 9.9, 9.9, 1));

    let second = candles[1];
    assert_eq!(second.time, 2000);
    assert_abs_diff_eq!(second.open, 10.0, epsilon = 1e-10);
    assert_abs_diff_eq!(second.high, 10.2, epsilon = 1e-10);
    assert_abs_diff_eq!(second.low, 10.0, epsilon = 1e-10);
    assert_abs_diff_eq!(second.close, 10.2, epsilon = 1e-10);
    assert_eq!(second.tick_count, 2);
}

#[test]
fn test_gap_prevents_bridging() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "t_s_G_ASK_00.csv", &["0,10.0,1", "75000,11.0,1"]);
    write(dir.path(), "t_s_G_BID_00.csv", &["0,9.0,1", "70000,9.5,1", "80000,9.6,1"]);

    let ticks = mid_ticks(
        dir.path(),
        vec!["t_s_G_ASK_00.csv".into()],
        vec!["t_s_G_BID_00.csv".into()],
    )
    .unwrap();

    let epochs: Vec<_> = ticks.iter().map(|t| t.epoch).collect();
    assert_eq!(epochs, vec![0, 80_000]);
    assert_abs_diff_eq!(ticks[1].price, 10.3, epsilon = 1e-10);
}

#[test]
fn test_files_read_in_hour_order() {
    let dir = TempDir::new().unwrap();
    // Name order (10 < 9) differs from hour order (9 < 10).
    write(dir.path(), "t_s_H_ASK_10.csv", &["36000000,2.0,1"]);
    write(dir.path(), "t_s_H_ASK_9.csv", &["35999000,1.0,1"]);
    write(dir.path(), "t_s_H_BID_10.csv", &["36000000,2.0,1"]);
    write(dir.path(), "t_s_H_BID_9.csv", &["35999000,1.0,1"]);

    let organizer = BatchOrganizer::build(dir.path()).unwrap();
    let batch = organizer.get_batch("t_s_H_BID_10.csv").unwrap();
    assert_eq!(batch.ask, vec!["t_s_H_ASK_9.csv", "t_s_H_ASK_10.csv"]);

    let (ask, bid) = batch.into_parts();
    let candles = process_batch(dir.path(), ask, bid, 1000).unwrap();
    let times: Vec<_> = candles.iter().map(|c| c.time).collect();
    assert_eq!(times, vec![35_999_000, 36_000_000]);
    assert_abs_diff_eq!(candles[1].open, 1.5, epsilon = 1e-10);
    assert_abs_diff_eq!(candles[1].close, 2.0, epsilon = 1e-10);
}

#[test]
fn test_run_into_sqlite() {
    let dir = TempDir::new().unwrap();
    let ticks = TempDir::new().unwrap();
    write(ticks.path(), "tick_ADAUSD_A_ASK_00.csv", &["1000,10.0,1", "2000,10.4,1"]);
    write(ticks.path(), "tick_ADAUSD_A_BID_00.csv", &["1000,9.8,1", "2000,10.0,1"]);

    let config = config(ticks.path(), Timeframe::Second1).with_db_path(dir.path().join("c.db"));
    let mut store = SqliteStore::open(&config.db_path).unwrap();

    let summary = run(&config, &mut store, |_| {}).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            batches: 1,
            failed: 0,
            candles: 2,
        }
    );

    // A second run over the same files overwrites rather than duplicates.
    run(&config, &mut store, |_| {}).unwrap();
    let stored = store.load(&symbol()).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].time, 1000);
    assert_eq!(stored[1].tick_count, 2);
}

#[test]
fn test_bad_line_fails_only_its_batch() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "t_s_A_ASK_00.csv", &["abc,10.0,1"]);
    write(dir.path(), "t_s_A_BID_00.csv", &["1000,9.8,1"]);
    write(dir.path(), "t_s_B_ASK_00.csv", &["1000,10.0,1"]);
    write(dir.path(), "t_s_B_BID_00.csv", &["1000,9.8,1"]);

    let mut sink = MemorySink::new();
    let mut outcomes = Vec::new();
    let summary = run(&config(dir.path(), Timeframe::Minute1), &mut sink, |outcome| {
        let failed_on_parse = matches!(
            outcome.result,
            Err(CandlewickError::Parse(TickParseError::InvalidEpoch(_)))
        );
        outcomes.push((outcome.key.clone(), outcome.is_ok(), failed_on_parse));
    })
    .unwrap();

    assert_eq!(
        outcomes,
        vec![
            ("A".to_string(), false, true),
            ("B".to_string(), true, false),
        ]
    );
    assert_eq!(summary.batches, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.candles, 1);
    assert_eq!(sink.writes(), 1);
}

#[test]
fn test_failed_batch_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "t_s_A_ASK_00.csv", &["1000,10.0,1", "2000,oops,1"]);
    write(dir.path(), "t_s_A_BID_00.csv", &["1000,9.8,1"]);

    let mut store = SqliteStore::open_in_memory().unwrap();
    let summary = run(&config(dir.path(), Timeframe::Second1), &mut store, |_| {}).unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(store.count(&symbol()).unwrap(), 0);
}

#[test]
fn test_unmarked_and_one_sided_batches() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "t_s_N_MID_00.csv", &["1000,1.0,1"]);
    write(dir.path(), "t_s_O_ASK_00.csv", &["1000,1.0,1"]);

    let mut sink = MemorySink::new();
    let mut keys = Vec::new();
    let summary = run(&config(dir.path(), Timeframe::Minute1), &mut sink, |outcome| {
        keys.push(outcome.key.clone());
    })
    .unwrap();

    // The unmarked group yields an empty batch and is skipped; the ask-only
    // batch runs but never pairs, so it writes nothing.
    assert_eq!(keys, vec!["O".to_string()]);
    assert_eq!(summary.batches, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.candles, 0);
}

#[test]
fn test_malformed_filename_aborts_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.txt", &["not a tick file"]);

    let err = run(&config(dir.path(), Timeframe::Minute1), &mut MemorySink::new(), |_| {})
        .unwrap_err();
    assert!(matches!(err, CandlewickError::Filename(_)));
}

#[test]
fn test_missing_input_dir() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let err = run(&config(&missing, Timeframe::Minute1), &mut MemorySink::new(), |_| {})
        .unwrap_err();
    assert!(matches!(err, CandlewickError::Io(_)));
}
