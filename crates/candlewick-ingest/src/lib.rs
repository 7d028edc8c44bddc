//! Tick file discovery and streaming for the candlewick pipeline.
//!
//! This crate turns a directory of per-hour ask/bid text files into tick
//! sources:
//!
//! - [`filename`] - Batch key and hour extraction from filenames
//! - [`BatchOrganizer`] - Groups files into ask/bid batches
//! - [`MultiFileStream`] - Chains an ordered list of files into one line stream
//! - [`parse_tick`] - Parses `epoch,price,size` lines into ticks

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod filename;
mod organizer;
mod parse;
mod stream;

pub use organizer::{Batch, BatchOrganizer, list_files};
pub use parse::{parse_line, parse_tick};
pub use stream::{MultiFileStream, StreamState};
