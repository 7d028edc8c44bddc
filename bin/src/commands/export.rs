//! Export command implementation.
//!
//! Processes the single batch a filename belongs to and writes its candles,
//! or its merged mid-ticks for the `tick` timeframe, to a file.

use crate::display::{Format, write_candles, write_ticks};
use anyhow::{Context, Result, bail};
use candlewick_lib::filename::extract_key;
use candlewick_lib::prelude::*;
use candlewick_lib::{mid_ticks, process_batch};
use std::path::{Path, PathBuf};

/// Export one batch.
pub(crate) fn export(
    dir: &Path,
    filename: &str,
    output: Option<PathBuf>,
    format: Format,
    timeframe: Timeframe,
    quiet: bool,
) -> Result<()> {
    let key = extract_key(filename)?.to_string();
    let organizer = BatchOrganizer::build(dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    let batch = organizer.get_batch(filename)?;
    if batch.is_empty() {
        bail!("No ask or bid files for batch '{key}' in {}", dir.display());
    }

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{key}.{}", format.extension())));
    let (ask, bid) = batch.into_parts();

    let written = match timeframe.milliseconds() {
        None => {
            let ticks = mid_ticks(dir, ask, bid)
                .with_context(|| format!("Failed to merge batch '{key}'"))?;
            write_ticks(&ticks, &output, format)?;
            format!("{} mid-ticks", ticks.len())
        }
        Some(frame) => {
            let candles = process_batch(dir, ask, bid, frame)
                .with_context(|| format!("Failed to build candles for batch '{key}'"))?;
            write_candles(&candles, &output, format)?;
            format!("{} {timeframe} candles", candles.len())
        }
    };

    if !quiet {
        println!("Wrote {written} to {}", output.display());
    }

    Ok(())
}
