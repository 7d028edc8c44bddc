//! Pipeline configuration.

use std::path::PathBuf;

use candlewick_types::{Symbol, Timeframe};

/// Default directory of decompressed tick files.
pub const DEFAULT_INPUT_DIR: &str = "./data";

/// Default SQLite database path.
pub const DEFAULT_DB_PATH: &str = "./candles.db";

/// Settings for one pipeline run over a directory of tick files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Directory holding the per-hour ask/bid files.
    pub input_dir: PathBuf,
    /// Database the candles are written to.
    pub db_path: PathBuf,
    /// Symbol the candles are stored under.
    pub symbol: Symbol,
    /// Candle width.
    pub timeframe: Timeframe,
    /// Directory for per-symbol log files, if file logging is wanted.
    pub log_dir: Option<PathBuf>,
}

impl PipelineConfig {
    /// Creates a configuration for `symbol` with default paths and 1-minute candles.
    #[must_use]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            symbol,
            timeframe: Timeframe::default(),
            log_dir: None,
        }
    }

    /// Sets the input directory.
    #[must_use]
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Sets the candle timeframe.
    #[must_use]
    pub const fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    /// Sets the log directory.
    #[must_use]
    pub fn with_log_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.log_dir = dir;
        self
    }

    /// Returns the per-symbol log file path, when a log directory is set.
    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_dir
            .as_deref()
            .map(|dir| dir.join(format!("{}.log", self.symbol)))
    }
}
