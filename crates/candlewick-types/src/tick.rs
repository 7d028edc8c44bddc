//! Tick data representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tick: one timestamped observation from one side of the market.
///
/// The same type carries synthetic mid-ticks produced by the ask/bid merger,
/// which always have a size of `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Milliseconds since the Unix epoch.
    pub epoch: i64,
    /// Observed price.
    pub price: f64,
    /// Observed size.
    pub size: f64,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(epoch: i64, price: f64, size: f64) -> Self {
        Self { epoch, price, size }
    }

    /// Returns the tick time as a UTC timestamp, if representable.
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.epoch)
    }

    /// Returns the bucket index of this tick for a frame width in milliseconds.
    ///
    /// Uses floor division so epochs before 1970 land in the bucket that
    /// starts at or before them.
    #[must_use]
    pub const fn bucket(&self, frame: i64) -> i64 {
        self.epoch.div_euclid(frame)
    }
}

/// Market side of a tick file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Offer side.
    Ask,
    /// Bid side.
    Bid,
}

impl Side {
    /// Returns the literal marker that identifies this side in a filename.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Ask => "_ASK_",
            Self::Bid => "_BID_",
        }
    }

    /// Returns the side as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ask => "ask",
            Self::Bid => "bid",
        }
    }

    /// Returns true if `filename` carries this side's marker.
    #[must_use]
    pub fn matches(&self, filename: &str) -> bool {
        filename.contains(self.marker())
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
