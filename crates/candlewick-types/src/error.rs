//! Error types for candlewick.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for candlewick operations.
pub type Result<T> = std::result::Result<T, CandlewickError>;

/// Errors that can occur while turning tick files into candles.
///
/// Every variant is fatal for the batch being processed: the pipeline never
/// skips a bad line or retries an unreadable file.
#[derive(Error, Debug)]
pub enum CandlewickError {
    /// A filename does not follow the `<prefix>_<..>_<key>_.._<HH>.<ext>` convention.
    #[error(transparent)]
    Filename(#[from] FilenameError),

    /// A tick line is malformed.
    #[error(transparent)]
    Parse(#[from] TickParseError),

    /// A tick file could not be opened.
    #[error("Failed to open '{path}': {source}")]
    Open {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A tick file could not be read after it was opened.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Generic I/O error (directory scans, output files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Candle frame must be a positive number of milliseconds.
    #[error("Invalid candle frame: {0} ms (must be positive)")]
    InvalidFrame(i64),

    /// A tick epoch whose candle start is not representable as `i64` milliseconds.
    #[error("Epoch {epoch} has no representable {frame} ms bucket")]
    EpochOutOfRange {
        /// The tick epoch.
        epoch: i64,
        /// The candle frame in milliseconds.
        frame: i64,
    },

    /// Symbol is empty, too long, or contains characters outside `[A-Za-z0-9_-]`.
    #[error("Invalid symbol: '{0}'")]
    InvalidSymbol(String),

    /// Persistence layer failure.
    #[error("Store error: {0}")]
    Store(String),

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),
}

impl CandlewickError {
    /// Returns true for errors caused by the contents of the tick files
    /// (bad filenames or bad lines) rather than by the environment.
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Filename(_) | Self::Parse(_) | Self::EpochOutOfRange { .. }
        )
    }
}

/// Error for filenames that do not match the positional naming convention.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    /// Fewer than three underscores, or an empty key field.
    #[error("No batch key in filename '{0}' (expected at least three '_' separators)")]
    MissingKey(String),

    /// The text between the last `_` and the first following `.` is not an integer.
    #[error("Invalid hour '{hour}' in filename '{filename}'")]
    InvalidHour {
        /// The offending filename.
        filename: String,
        /// The text that failed to parse.
        hour: String,
    },
}

/// Error for a tick line that is not `epoch,price,size`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickParseError {
    /// Line does not have exactly three comma-separated fields.
    #[error("Expected 3 fields, found {found} in tick line '{line}'")]
    FieldCount {
        /// The offending line.
        line: String,
        /// Number of fields found.
        found: usize,
    },

    /// Epoch field is not a 64-bit integer.
    #[error("Invalid epoch in tick line '{0}'")]
    InvalidEpoch(String),

    /// Price field is not a float.
    #[error("Invalid price in tick line '{0}'")]
    InvalidPrice(String),

    /// Size field is not a float.
    #[error("Invalid size in tick line '{0}'")]
    InvalidSize(String),
}
