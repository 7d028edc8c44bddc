//! Run command implementation.
//!
//! Processes every batch in the input directory and upserts the candles into
//! SQLite (or an in-memory sink for dry runs).

use anyhow::{Context, Result};
use candlewick_lib::prelude::*;
use candlewick_lib::DEFAULT_DB_PATH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::warn;

use super::{input_dir, resolve_path};

/// Builds the pipeline configuration from flags and legacy environment variables.
pub(crate) fn resolve_config(
    input: Option<PathBuf>,
    db: Option<PathBuf>,
    symbol: Symbol,
    timeframe: Timeframe,
    log_dir: Option<PathBuf>,
) -> PipelineConfig {
    let log_dir = log_dir.or_else(|| std::env::var_os("LOGS_FOLDER_PATH").map(PathBuf::from));

    PipelineConfig::new(symbol)
        .with_input_dir(input_dir(input))
        .with_db_path(resolve_path(db, "DB_PATH", DEFAULT_DB_PATH))
        .with_timeframe(timeframe)
        .with_log_dir(log_dir)
}

/// Run the pipeline and print a summary.
pub(crate) fn run(config: &PipelineConfig, dry_run: bool, quiet: bool) -> Result<()> {
    if config.timeframe.is_tick() {
        anyhow::bail!("The run command needs a candle timeframe, not `tick`");
    }

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) {msg}")
                .context("Invalid progress template")?
                .progress_chars("=>-"),
        );
        pb.set_message(format!("{} {}", config.symbol, config.timeframe));
        pb
    };

    let observer = |outcome: &BatchOutcome| {
        progress.set_length(outcome.total as u64);
        progress.set_position(outcome.index as u64);
        if let Err(e) = &outcome.result {
            progress.suspend(|| warn!(key = %outcome.key, error = %e, "skipped batch"));
        }
    };

    let (summary, stored) = if dry_run {
        let mut sink = MemorySink::new();
        let summary = run_pipeline(config, &mut sink, observer)?;
        (summary, sink.count(&config.symbol) as u64)
    } else {
        let mut store = SqliteStore::open(&config.db_path)
            .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;
        let summary = run_pipeline(config, &mut store, observer)?;
        (summary, store.count(&config.symbol)?)
    };

    progress.finish_with_message(format!("{} candles", summary.candles));

    if !quiet {
        println!(
            "Processed {} batches ({} failed), wrote {} candles",
            summary.batches, summary.failed, summary.candles
        );
        if dry_run {
            println!("Dry run: {stored} distinct candles for {}", config.symbol);
        } else {
            println!(
                "{} now holds {stored} candles for {} in {}",
                config.db_path.display(),
                config.symbol,
                config.symbol.table_name()
            );
        }
    }

    Ok(())
}

fn run_pipeline<S, F>(config: &PipelineConfig, sink: &mut S, observer: F) -> Result<RunSummary>
where
    S: CandleSink,
    F: FnMut(&BatchOutcome),
{
    candlewick_lib::run(config, sink, observer)
        .with_context(|| format!("Failed to process {}", config.input_dir.display()))
}
