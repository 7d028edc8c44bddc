//! Batches command implementation.

use anyhow::{Context, Result};
use candlewick_lib::prelude::*;
use std::path::Path;

/// List the batch keys in `dir` with their ask and bid file counts.
pub(crate) fn list_batches(dir: &Path) -> Result<()> {
    let organizer = BatchOrganizer::build(dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    if organizer.is_empty() {
        println!("No batches found in {}.", dir.display());
        return Ok(());
    }

    println!("{:<24} {:>6} {:>6} {:>8}", "KEY", "ASK", "BID", "OTHER");
    println!("{}", "-".repeat(47));

    for key in organizer.keys() {
        let files = organizer.group(key).unwrap_or_default();
        let (ask, bid, other) = count_sides(files);
        println!("{key:<24} {ask:>6} {bid:>6} {other:>8}");
    }

    println!("\nTotal: {} batches", organizer.len());
    Ok(())
}

/// Counts ask-marked, bid-marked, and unmarked files.
fn count_sides(files: &[String]) -> (usize, usize, usize) {
    let ask = files.iter().filter(|f| Side::Ask.matches(f)).count();
    let bid = files.iter().filter(|f| Side::Bid.matches(f)).count();
    let other = files
        .iter()
        .filter(|f| !Side::Ask.matches(f) && !Side::Bid.matches(f))
        .count();
    (ask, bid, other)
}
