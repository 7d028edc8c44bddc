//! Candle persistence for candlewick.
//!
//! - [`CandleSink`] - Destination for the candles of one batch
//! - [`SqliteStore`] - SQLite-backed sink with one table per symbol
//! - [`MemorySink`] - In-memory sink for tests and dry runs

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod memory;
mod sink;
mod sqlite;

pub use memory::MemorySink;
pub use sink::CandleSink;
pub use sqlite::SqliteStore;
