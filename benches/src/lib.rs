//! Synthetic tick fixtures for candlewick benchmarks.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use candlewick_lib::{Side, Tick};

const HOUR_MS: i64 = 3_600_000;

/// Shape of a generated batch.
#[derive(Debug, Clone, Copy)]
pub struct FixtureConfig {
    /// Number of hourly files per side.
    pub hours: u32,
    /// Ticks per side per hour.
    pub ticks_per_hour: u32,
    /// Start of the first hour, in ms since the epoch.
    pub start_epoch: i64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            hours: 4,
            ticks_per_hour: 10_000,
            start_epoch: 1_704_067_200_000,
        }
    }
}

impl FixtureConfig {
    /// Total ticks across both sides.
    pub const fn total_ticks(&self) -> u64 {
        2 * self.hours as u64 * self.ticks_per_hour as u64
    }
}

/// Generates one side's ticks for `hour`: evenly spaced, with a deterministic
/// saw-tooth price around 1.0. Ask prices sit a small spread above bid prices.
pub fn side_ticks(config: &FixtureConfig, side: Side, hour: u32) -> Vec<Tick> {
    let step = HOUR_MS / i64::from(config.ticks_per_hour.max(1));
    let offset = match side {
        Side::Ask => step / 2,
        Side::Bid => 0,
    };
    let spread = match side {
        Side::Ask => 0.0002,
        Side::Bid => 0.0,
    };
    let base = config.start_epoch + i64::from(hour) * HOUR_MS;

    (0..config.ticks_per_hour)
        .map(|i| {
            let wave = f64::from(i % 200) / 200_000.0;
            Tick::new(base + i64::from(i) * step + offset, 1.0 + wave + spread, 1.0)
        })
        .collect()
}

/// Writes a batch of hourly ask and bid files into `dir` under batch `key`.
///
/// Returns the ask and bid filenames in hour order.
///
/// # Errors
///
/// Returns an error if a file cannot be written.
pub fn write_batch(
    dir: &Path,
    key: &str,
    config: &FixtureConfig,
) -> io::Result<(Vec<String>, Vec<String>)> {
    let mut ask_files = Vec::new();
    let mut bid_files = Vec::new();

    for hour in 0..config.hours {
        for side in [Side::Ask, Side::Bid] {
            let name = format!("bench_SYM_{key}{}{hour:02}.csv", side.marker());
            let mut contents = String::new();
            for tick in side_ticks(config, side, hour) {
                let _ = writeln!(contents, "{},{},{}", tick.epoch, tick.price, tick.size);
            }
            fs::write(dir.join(&name), contents)?;

            match side {
                Side::Ask => ask_files.push(name),
                Side::Bid => bid_files.push(name),
            }
        }
    }

    Ok((ask_files, bid_files))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_ticks_sorted() {
        let config = FixtureConfig {
            hours: 1,
            ticks_per_hour: 100,
            ..Default::default()
        };
        let ticks = side_ticks(&config, Side::Ask, 0);

        assert_eq!(ticks.len(), 100);
        assert!(ticks.windows(2).all(|w| w[0].epoch < w[1].epoch));
    }

    #[test]
    fn test_total_ticks() {
        let config = FixtureConfig::default();
        assert_eq!(config.total_ticks(), 80_000);
    }
}
