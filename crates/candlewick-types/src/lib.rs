//! Core types for the candlewick tick-to-candle pipeline.
//!
//! This crate provides the fundamental data structures used throughout candlewick:
//!
//! - [`Tick`] - A single timestamped price observation from one market side
//! - [`Side`] - Ask or bid
//! - [`Timeframe`] - Candle bucket width
//! - [`Symbol`] - Validated instrument identifier
//! - [`TickSource`] - Pull-based source of ticks for one market side
//! - [`CandlewickError`] - Error taxonomy shared by every stage

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod source;
mod symbol;
mod tick;
mod timeframe;

pub use error::{CandlewickError, FilenameError, Result, TickParseError};
pub use source::{TickIter, TickSource, from_ticks};
pub use symbol::Symbol;
pub use tick::{Side, Tick};
pub use timeframe::{Timeframe, TimeframeParseError};
