//! In-memory candle sink.

use std::collections::BTreeMap;

use candlewick_aggregate::Candle;
use candlewick_types::{Result, Symbol};

use crate::CandleSink;

/// Candle sink backed by ordered maps, one per symbol.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    symbols: BTreeMap<Symbol, BTreeMap<i64, Candle>>,
    writes: usize,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored candles for `symbol`, ordered by time.
    #[must_use]
    pub fn candles(&self, symbol: &Symbol) -> Vec<Candle> {
        self.symbols
            .get(symbol)
            .map(|rows| rows.values().copied().collect())
            .unwrap_or_default()
    }

    /// Returns the number of distinct candles stored for `symbol`.
    #[must_use]
    pub fn count(&self, symbol: &Symbol) -> usize {
        self.symbols.get(symbol).map_or(0, BTreeMap::len)
    }

    /// Returns the total number of candle writes, overwrites included.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl CandleSink for MemorySink {
    fn upsert(&mut self, symbol: &Symbol, candles: &[Candle]) -> Result<usize> {
        let rows = self.symbols.entry(symbol.clone()).or_default();
        for candle in candles {
            rows.insert(candle.time, *candle);
        }
        self.writes += candles.len();
        Ok(candles.len())
    }
}
