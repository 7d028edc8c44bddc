//! Candle sink abstraction.

use candlewick_aggregate::Candle;
use candlewick_types::{Result, Symbol};

/// Destination for finished candles.
///
/// Candles are keyed by `time` within a symbol. Writing a candle whose time
/// already exists overwrites its prices and tick count, so replaying the same
/// batch leaves the sink unchanged.
pub trait CandleSink {
    /// Upserts the candles of one batch and returns how many were written.
    ///
    /// Either every candle is written or none is.
    ///
    /// # Errors
    ///
    /// Returns [`candlewick_types::CandlewickError::Store`] if the write fails.
    fn upsert(&mut self, symbol: &Symbol, candles: &[Candle]) -> Result<usize>;
}

impl<S: CandleSink + ?Sized> CandleSink for &mut S {
    fn upsert(&mut self, symbol: &Symbol, candles: &[Candle]) -> Result<usize> {
        (**self).upsert(symbol, candles)
    }
}

impl<S: CandleSink + ?Sized> CandleSink for Box<S> {
    fn upsert(&mut self, symbol: &Symbol, candles: &[Candle]) -> Result<usize> {
        (**self).upsert(symbol, candles)
    }
}
