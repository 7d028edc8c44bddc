//! Output formatting for the candlewick CLI.

use anyhow::Result;
use candlewick_lib::prelude::*;
use clap::ValueEnum;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Output format for exported data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Write mid-ticks to a file in the specified format.
pub(crate) fn write_ticks(ticks: &[Tick], output: &Path, format: Format) -> Result<()> {
    let writer = BufWriter::new(File::create(output)?);

    match format {
        Format::Csv => CsvFormatter::new().write_ticks(ticks, writer)?,
        Format::Json => JsonFormatter::new().write_ticks(ticks, writer)?,
        Format::Ndjson => JsonFormatter::ndjson().write_ticks(ticks, writer)?,
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            ParquetFormatter::new().write_ticks(ticks, writer)?;
            #[cfg(not(feature = "parquet"))]
            anyhow::bail!("Parquet support not compiled in");
        }
    }

    Ok(())
}

/// Write candles to a file in the specified format.
pub(crate) fn write_candles(candles: &[Candle], output: &Path, format: Format) -> Result<()> {
    let writer = BufWriter::new(File::create(output)?);

    match format {
        Format::Csv => CsvFormatter::new().write_candles(candles, writer)?,
        Format::Json => JsonFormatter::new().write_candles(candles, writer)?,
        Format::Ndjson => JsonFormatter::ndjson().write_candles(candles, writer)?,
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            ParquetFormatter::new().write_candles(candles, writer)?;
            #[cfg(not(feature = "parquet"))]
            anyhow::bail!("Parquet support not compiled in");
        }
    }

    Ok(())
}
