//! Apache Parquet output format.

use arrow::array::{ArrayRef, Float64Array, Int64Array, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use candlewick_aggregate::Candle;
use candlewick_types::Tick;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

fn timestamp_field() -> Field {
    Field::new(
        "timestamp",
        DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into())),
        false,
    )
}

fn parquet_err(e: impl std::fmt::Display) -> FormatError {
    FormatError::Parquet(e.to_string())
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    fn tick_schema() -> Schema {
        Schema::new(vec![
            timestamp_field(),
            Field::new("price", DataType::Float64, false),
            Field::new("size", DataType::Float64, false),
        ])
    }

    fn candle_schema() -> Schema {
        Schema::new(vec![
            timestamp_field(),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("tick_count", DataType::Int64, false),
        ])
    }

    fn ticks_to_batch(schema: &Arc<Schema>, ticks: &[Tick]) -> Result<RecordBatch, FormatError> {
        let epochs: Vec<_> = ticks.iter().map(|t| t.epoch).collect();
        let prices: Vec<_> = ticks.iter().map(|t| t.price).collect();
        let sizes: Vec<_> = ticks.iter().map(|t| t.size).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(TimestampMillisecondArray::from(epochs).with_timezone("UTC")),
            Arc::new(Float64Array::from(prices)),
            Arc::new(Float64Array::from(sizes)),
        ];
        RecordBatch::try_new(Arc::clone(schema), columns).map_err(parquet_err)
    }

    fn candles_to_batch(
        schema: &Arc<Schema>,
        candles: &[Candle],
    ) -> Result<RecordBatch, FormatError> {
        let times: Vec<_> = candles.iter().map(|c| c.time).collect();
        let opens: Vec<_> = candles.iter().map(|c| c.open).collect();
        let highs: Vec<_> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<_> = candles.iter().map(|c| c.low).collect();
        let closes: Vec<_> = candles.iter().map(|c| c.close).collect();
        let counts: Vec<_> = candles.iter().map(|c| c.tick_count).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(TimestampMillisecondArray::from(times).with_timezone("UTC")),
            Arc::new(Float64Array::from(opens)),
            Arc::new(Float64Array::from(highs)),
            Arc::new(Float64Array::from(lows)),
            Arc::new(Float64Array::from(closes)),
            Arc::new(Int64Array::from(counts)),
        ];
        RecordBatch::try_new(Arc::clone(schema), columns).map_err(parquet_err)
    }

    /// Writes `rows` in row-group sized chunks, converting each with `to_batch`.
    fn write_chunked<T, W, F>(
        &self,
        schema: Schema,
        rows: &[T],
        writer: W,
        to_batch: F,
    ) -> Result<(), FormatError>
    where
        W: Write + Send,
        F: Fn(&Arc<Schema>, &[T]) -> Result<RecordBatch, FormatError>,
    {
        let schema = Arc::new(schema);
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer =
            ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props)).map_err(parquet_err)?;

        for chunk in rows.chunks(self.row_group_size.max(1)) {
            let batch = to_batch(&schema, chunk)?;
            arrow_writer.write(&batch).map_err(parquet_err)?;
        }

        arrow_writer.close().map_err(parquet_err)?;
        Ok(())
    }
}

impl Formatter for ParquetFormatter {
    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError> {
        self.write_chunked(Self::tick_schema(), ticks, writer, Self::ticks_to_batch)
    }

    fn write_candles<W: Write + Send>(
        &self,
        candles: &[Candle],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_chunked(Self::candle_schema(), candles, writer, Self::candles_to_batch)
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
