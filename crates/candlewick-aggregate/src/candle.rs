//! OHLC candle data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fixed-width OHLC candle built from mid-ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start in milliseconds since the epoch (a multiple of the frame).
    pub time: i64,
    /// Price of the first mid-tick in the bucket.
    pub open: f64,
    /// Highest mid-tick price in the bucket.
    pub high: f64,
    /// Lowest mid-tick price in the bucket.
    pub low: f64,
    /// Price of the last mid-tick in the bucket.
    pub close: f64,
    /// Number of mid-ticks folded into the candle.
    pub tick_count: i64,
}

impl Candle {
    /// Creates a new candle.
    #[must_use]
    pub const fn new(time: i64, open: f64, high: f64, low: f64, close: f64, tick_count: i64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            tick_count,
        }
    }

    /// Returns the bucket start as a UTC timestamp, if representable.
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if `low <= open, close <= high`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }
}
