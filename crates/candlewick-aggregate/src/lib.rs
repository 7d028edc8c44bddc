//! Mid-price merging and candle building for candlewick.
//!
//! This crate turns ask and bid tick sources into OHLC candles:
//!
//! - [`AskBidMerger`] - Merges two sides into mid-price ticks with gap reset
//! - [`CandleBuilder`] - Groups ticks into fixed-width candles
//! - [`Candle`] - OHLC candle data structure

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod candle;
mod merger;

pub use builder::CandleBuilder;
pub use candle::Candle;
pub use merger::{AskBidMerger, GAP_RESET_MS, PairState};
