//! Instrument symbol.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::CandlewickError;

/// Validated instrument symbol (e.g. `ADAUSD`).
///
/// Symbols are upper-cased and restricted to ASCII alphanumerics, `_` and `-`,
/// so they can be embedded in table names and file paths as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Maximum symbol length.
    pub const MAX_LEN: usize = 32;

    /// Creates a symbol, validating and upper-casing it.
    ///
    /// # Errors
    ///
    /// Returns [`CandlewickError::InvalidSymbol`] if the symbol is empty,
    /// longer than [`Self::MAX_LEN`], or contains other characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CandlewickError> {
        let raw = raw.as_ref().trim();
        let valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !valid {
            return Err(CandlewickError::InvalidSymbol(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name of the candle table for this symbol.
    ///
    /// `-` is not valid in an unquoted SQL identifier, so it maps to `_`.
    #[must_use]
    pub fn table_name(&self) -> String {
        format!("candles_{}", self.0.replace('-', "_"))
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = CandlewickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = CandlewickError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
