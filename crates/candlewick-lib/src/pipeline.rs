//! Batch pipeline: tick files in, candles out.
//!
//! A directory holds one file per (symbol, side, hour). Files sharing a batch
//! key form a batch; each batch is merged into mid-price ticks, folded into
//! candles, and handed to a [`CandleSink`] in one upsert. Batches are
//! independent: a batch that fails is logged and skipped, and the run moves on.

use std::path::Path;

use candlewick_aggregate::{AskBidMerger, Candle, CandleBuilder};
use candlewick_ingest::{BatchOrganizer, MultiFileStream, filename::extract_key, list_files};
use candlewick_store::CandleSink;
use candlewick_types::{CandlewickError, Result, Tick};
use tracing::{debug, error, info, info_span};

use crate::PipelineConfig;

/// Merges one batch's ask and bid files into mid-price ticks.
///
/// # Errors
///
/// Returns the first open, read, or parse error of either side.
pub fn mid_ticks(dir: &Path, ask_files: Vec<String>, bid_files: Vec<String>) -> Result<Vec<Tick>> {
    let ask = MultiFileStream::new(dir, ask_files);
    let bid = MultiFileStream::new(dir, bid_files);
    AskBidMerger::new(ask, bid)?.collect()
}

/// Builds the candles of one batch.
///
/// Either every candle of the batch is returned or an error is; partial
/// results are never produced.
///
/// # Errors
///
/// Returns [`CandlewickError::InvalidFrame`] for a non-positive `frame`, and
/// otherwise the first open, read, or parse error of either side.
pub fn process_batch(
    dir: &Path,
    ask_files: Vec<String>,
    bid_files: Vec<String>,
    frame: i64,
) -> Result<Vec<Candle>> {
    if frame <= 0 {
        return Err(CandlewickError::InvalidFrame(frame));
    }

    let ask = MultiFileStream::new(dir, ask_files);
    let bid = MultiFileStream::new(dir, bid_files);
    let merger = AskBidMerger::new(ask, bid)?;
    CandleBuilder::new(merger, frame)?.collect()
}

/// Result of processing one batch, reported to the run observer.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Batch key shared by the batch's files.
    pub key: String,
    /// Number of ask files in the batch.
    pub ask_files: usize,
    /// Number of bid files in the batch.
    pub bid_files: usize,
    /// Position of this batch in the run, starting at 1.
    pub index: usize,
    /// Number of batches found when the run started.
    pub total: usize,
    /// Candles written, or the error that aborted the batch.
    pub result: Result<usize>,
}

impl BatchOutcome {
    /// Returns true if the batch was written.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Totals of a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Batches attempted.
    pub batches: usize,
    /// Batches that failed and wrote nothing.
    pub failed: usize,
    /// Candles written across all successful batches.
    pub candles: usize,
}

impl RunSummary {
    /// Returns the number of batches that were written.
    #[must_use]
    pub const fn succeeded(&self) -> usize {
        self.batches - self.failed
    }
}

/// Runs the pipeline over `config.input_dir`, writing candles to `sink`.
///
/// Filenames are visited in sorted order. The first file seen for a batch key
/// triggers the whole batch; the batch is evicted afterwards so later files
/// with the same key are skipped. `observer` is called once per batch.
///
/// # Errors
///
/// Fails only on setup problems: a tick timeframe, an unreadable input
/// directory, or a filename without a batch key. Batch errors are reported
/// through `observer` and counted in [`RunSummary::failed`].
pub fn run<S, F>(config: &PipelineConfig, sink: &mut S, mut observer: F) -> Result<RunSummary>
where
    S: CandleSink + ?Sized,
    F: FnMut(&BatchOutcome),
{
    let frame = config
        .timeframe
        .milliseconds()
        .ok_or(CandlewickError::InvalidFrame(0))?;

    let dir = config.input_dir.as_path();
    let filenames = list_files(dir)?;
    let mut organizer = BatchOrganizer::from_filenames(dir, filenames.iter().cloned())?;
    let total = organizer.len();
    info!(
        dir = %dir.display(),
        files = filenames.len(),
        batches = total,
        symbol = %config.symbol,
        timeframe = %config.timeframe,
        "starting candle run"
    );

    let mut summary = RunSummary::default();
    for filename in &filenames {
        let batch = organizer.get_batch(filename)?;
        if batch.is_empty() {
            continue;
        }

        let key = extract_key(filename)?.to_string();
        let _span = info_span!("batch", key = %key).entered();
        summary.batches += 1;

        let (ask, bid) = batch.into_parts();
        let (ask_files, bid_files) = (ask.len(), bid.len());
        debug!(ask_files, bid_files, "processing batch");

        let result = process_batch(dir, ask, bid, frame)
            .and_then(|candles| sink.upsert(&config.symbol, &candles));

        match &result {
            Ok(written) => {
                summary.candles += written;
                info!(candles = written, "batch written");
            }
            Err(e) => {
                summary.failed += 1;
                error!(error = %e, data = e.is_data_error(), "batch failed");
            }
        }

        organizer.evict(filename)?;
        observer(&BatchOutcome {
            key,
            ask_files,
            bid_files,
            index: summary.batches,
            total,
            result,
        });
    }

    info!(
        batches = summary.batches,
        failed = summary.failed,
        candles = summary.candles,
        "candle run finished"
    );
    Ok(summary)
}
