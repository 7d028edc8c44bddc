//! Turn per-hour ask/bid tick files into OHLC candles.
//!
//! This is a facade crate that re-exports the candlewick workspace crates and
//! adds the batch [`pipeline`] that ties them together.
//!
//! # Quick Start
//!
//! ```no_run
//! use candlewick_lib::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = PipelineConfig::new(Symbol::new("ADAUSD")?)
//!         .with_input_dir("./decompressed")
//!         .with_timeframe(Timeframe::Minute5);
//!
//!     let mut store = SqliteStore::open(&config.db_path)?;
//!     let summary = run(&config, &mut store, |outcome| {
//!         println!("{}: {:?}", outcome.key, outcome.result);
//!     })?;
//!
//!     println!("{} candles from {} batches", summary.candles, summary.batches);
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod pipeline;

pub use config::{DEFAULT_DB_PATH, DEFAULT_INPUT_DIR, PipelineConfig};
pub use pipeline::{BatchOutcome, RunSummary, mid_ticks, process_batch, run};

// Re-export core types
pub use candlewick_types::*;

// Re-export ingestion
pub use candlewick_ingest::{
    Batch, BatchOrganizer, MultiFileStream, StreamState, filename, list_files, parse_line,
    parse_tick,
};

// Re-export merging and candle building
pub use candlewick_aggregate::{AskBidMerger, Candle, CandleBuilder, GAP_RESET_MS, PairState};

// Re-export persistence
pub use candlewick_store::{CandleSink, MemorySink, SqliteStore};

// Re-export formatters
#[cfg(feature = "format")]
pub use candlewick_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use candlewick_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use candlewick_lib::prelude::*;
/// ```
pub mod prelude {
    pub use candlewick_types::{
        CandlewickError, Result, Side, Symbol, Tick, TickSource, Timeframe,
    };

    pub use candlewick_aggregate::{AskBidMerger, Candle, CandleBuilder};
    pub use candlewick_ingest::{BatchOrganizer, MultiFileStream};
    pub use candlewick_store::{CandleSink, MemorySink, SqliteStore};

    pub use crate::config::PipelineConfig;
    pub use crate::pipeline::{BatchOutcome, RunSummary, run};

    #[cfg(feature = "format")]
    pub use candlewick_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use candlewick_format::ParquetFormatter;
}
