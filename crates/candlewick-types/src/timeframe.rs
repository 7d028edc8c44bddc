//! Candle timeframe definitions.

use std::str::FromStr;
use thiserror::Error;

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Width of a candle bucket.
///
/// `Tick` means no aggregation: the pipeline emits mid-ticks instead of candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    /// Raw mid-ticks (no aggregation).
    Tick,
    /// 1-second candles.
    Second1,
    /// 1-minute candles.
    #[default]
    Minute1,
    /// 5-minute candles.
    Minute5,
    /// 15-minute candles.
    Minute15,
    /// 30-minute candles.
    Minute30,
    /// 1-hour candles.
    Hour1,
    /// 4-hour candles.
    Hour4,
    /// Daily candles.
    Day1,
    /// Any other positive width in milliseconds.
    Custom(i64),
}

impl Timeframe {
    /// Returns the frame width in milliseconds, or None for tick data.
    #[must_use]
    pub const fn milliseconds(&self) -> Option<i64> {
        match self {
            Self::Tick => None,
            Self::Second1 => Some(SECOND),
            Self::Minute1 => Some(MINUTE),
            Self::Minute5 => Some(5 * MINUTE),
            Self::Minute15 => Some(15 * MINUTE),
            Self::Minute30 => Some(30 * MINUTE),
            Self::Hour1 => Some(HOUR),
            Self::Hour4 => Some(4 * HOUR),
            Self::Day1 => Some(DAY),
            Self::Custom(ms) => Some(*ms),
        }
    }

    /// Maps a width in milliseconds to a named timeframe when one exists.
    ///
    /// Returns None for non-positive widths.
    #[must_use]
    pub const fn from_millis(ms: i64) -> Option<Self> {
        if ms <= 0 {
            return None;
        }
        Some(match ms {
            SECOND => Self::Second1,
            MINUTE => Self::Minute1,
            m if m == 5 * MINUTE => Self::Minute5,
            m if m == 15 * MINUTE => Self::Minute15,
            m if m == 30 * MINUTE => Self::Minute30,
            HOUR => Self::Hour1,
            h if h == 4 * HOUR => Self::Hour4,
            DAY => Self::Day1,
            other => Self::Custom(other),
        })
    }

    /// Returns true if this is tick data (no aggregation).
    #[must_use]
    pub const fn is_tick(&self) -> bool {
        matches!(self, Self::Tick)
    }

    /// Returns the named timeframes.
    #[must_use]
    pub const fn named() -> &'static [Self] {
        &[
            Self::Tick,
            Self::Second1,
            Self::Minute1,
            Self::Minute5,
            Self::Minute15,
            Self::Minute30,
            Self::Hour1,
            Self::Hour4,
            Self::Day1,
        ]
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tick => write!(f, "tick"),
            Self::Second1 => write!(f, "s1"),
            Self::Minute1 => write!(f, "m1"),
            Self::Minute5 => write!(f, "m5"),
            Self::Minute15 => write!(f, "m15"),
            Self::Minute30 => write!(f, "m30"),
            Self::Hour1 => write!(f, "h1"),
            Self::Hour4 => write!(f, "h4"),
            Self::Day1 => write!(f, "d1"),
            Self::Custom(ms) => write!(f, "{ms}ms"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let named = match lower.as_str() {
            "tick" => Some(Self::Tick),
            "s1" | "1s" | "second" => Some(Self::Second1),
            "m1" | "1m" | "minute" => Some(Self::Minute1),
            "m5" | "5m" => Some(Self::Minute5),
            "m15" | "15m" => Some(Self::Minute15),
            "m30" | "30m" => Some(Self::Minute30),
            "h1" | "1h" | "hour" => Some(Self::Hour1),
            "h4" | "4h" => Some(Self::Hour4),
            "d1" | "1d" | "day" | "daily" => Some(Self::Day1),
            _ => None,
        };
        if let Some(tf) = named {
            return Ok(tf);
        }

        // "<n><unit>" with unit one of ms, s, m, h, d
        let split = lower
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(lower.len());
        let (digits, unit) = lower.split_at(split);
        let unit_ms = match unit {
            "ms" => 1,
            "s" => SECOND,
            "m" => MINUTE,
            "h" => HOUR,
            "d" => DAY,
            _ => return Err(TimeframeParseError(s.to_string())),
        };
        digits
            .parse::<i64>()
            .ok()
            .and_then(|n| n.checked_mul(unit_ms))
            .and_then(Self::from_millis)
            .ok_or_else(|| TimeframeParseError(s.to_string()))
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "invalid timeframe '{0}', expected one of: tick, s1, m1, m5, m15, m30, h1, h4, d1, or <n>ms|s|m|h|d"
)]
pub struct TimeframeParseError(String);
