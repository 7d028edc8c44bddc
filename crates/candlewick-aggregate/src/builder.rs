//! Fixed-width candle building over a tick stream.

use crate::Candle;
use candlewick_types::{CandlewickError, Result, Tick, Timeframe};
use tracing::trace;

/// Running OHLC state for the bucket being built.
#[derive(Debug, Clone, Copy)]
struct Bar {
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    count: i64,
}

impl Bar {
    const fn new(time: i64, price: f64) -> Self {
        Self {
            time,
            open: price,
            high: price,
            low: price,
            close: price,
            count: 1,
        }
    }

    fn update(&mut self, price: f64) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.count += 1;
    }

    const fn finish(self) -> Candle {
        Candle::new(self.time, self.open, self.high, self.low, self.close, self.count)
    }
}

/// Groups a tick stream into consecutive fixed-width candles.
///
/// Ticks are assumed to arrive in non-decreasing epoch order. A tick belongs
/// to bucket `epoch / frame` (floored); each candle covers one non-empty
/// bucket and its `time` is the bucket start. The first tick of the next
/// bucket is held back and opens the following candle.
#[derive(Debug)]
pub struct CandleBuilder<I> {
    ticks: I,
    frame: i64,
    lookahead: Option<Tick>,
}

impl<I> CandleBuilder<I>
where
    I: Iterator<Item = Result<Tick>>,
{
    /// Creates a builder with a bucket width of `frame` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`CandlewickError::InvalidFrame`] if `frame` is not positive.
    pub fn new(ticks: I, frame: i64) -> Result<Self> {
        if frame <= 0 {
            return Err(CandlewickError::InvalidFrame(frame));
        }
        Ok(Self {
            ticks,
            frame,
            lookahead: None,
        })
    }

    /// Creates a builder for a named timeframe.
    ///
    /// # Errors
    ///
    /// Returns [`CandlewickError::InvalidFrame`] for [`Timeframe::Tick`],
    /// which has no bucket width.
    pub fn from_timeframe(ticks: I, timeframe: Timeframe) -> Result<Self> {
        let frame = timeframe.milliseconds().unwrap_or(0);
        Self::new(ticks, frame)
    }

    /// Returns the bucket width in milliseconds.
    #[must_use]
    pub const fn frame(&self) -> i64 {
        self.frame
    }

    /// Returns the next completed candle, or None when the stream is done.
    ///
    /// # Errors
    ///
    /// Propagates the first error of the underlying tick stream. A partially
    /// built candle is discarded in that case.
    pub fn next_candle(&mut self) -> Result<Option<Candle>> {
        let first = match self.lookahead.take() {
            Some(tick) => tick,
            None => match self.ticks.next().transpose()? {
                Some(tick) => tick,
                None => return Ok(None),
            },
        };

        let bucket = first.bucket(self.frame);
        let time = bucket
            .checked_mul(self.frame)
            .ok_or(CandlewickError::EpochOutOfRange {
                epoch: first.epoch,
                frame: self.frame,
            })?;
        let mut bar = Bar::new(time, first.price);

        while let Some(tick) = self.ticks.next().transpose()? {
            if tick.bucket(self.frame) != bucket {
                self.lookahead = Some(tick);
                break;
            }
            bar.update(tick.price);
        }

        let candle = bar.finish();
        trace!(time = candle.time, ticks = candle.tick_count, "candle built");
        Ok(Some(candle))
    }
}

impl<I> Iterator for CandleBuilder<I>
where
    I: Iterator<Item = Result<Tick>>,
{
    type Item = Result<Candle>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_candle().transpose()
    }
}
