//! SQLite candle store.

use std::path::{Path, PathBuf};

use candlewick_aggregate::Candle;
use candlewick_types::{CandlewickError, Result, Symbol};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, warn};

use crate::CandleSink;

fn store_err(e: rusqlite::Error) -> CandlewickError {
    CandlewickError::Store(e.to_string())
}

/// Candle store backed by a SQLite database.
///
/// Each symbol gets its own table, `candles_<SYMBOL>`, keyed by candle time:
///
/// ```sql
/// CREATE TABLE candles_ADAUSD (
///     time   INTEGER PRIMARY KEY,
///     open   REAL,
///     high   REAL,
///     low    REAL,
///     close  REAL,
///     volume INTEGER
/// );
/// ```
///
/// `volume` holds the candle's tick count.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (or creates) a database file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(store_err)?;
        if let Err(e) = conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;") {
            warn!(path = %path.display(), error = %e, "could not enable WAL journal");
        }
        debug!(path = %path.display(), "opened candle store");

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        Ok(Self { conn, path: None })
    }

    /// Returns the database path, or None for an in-memory store.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns all stored candles for `symbol`, ordered by time.
    ///
    /// A symbol that was never written yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load(&self, symbol: &Symbol) -> Result<Vec<Candle>> {
        if !self.has_table(symbol)? {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT time, open, high, low, close, volume FROM {} ORDER BY time",
            symbol.table_name()
        );
        let mut stmt = self.conn.prepare(&sql).map_err(store_err)?;
        let candles = stmt
            .query_map([], |row| {
                Ok(Candle::new(
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })
            .map_err(store_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(store_err)?;

        Ok(candles)
    }

    /// Returns the number of stored candles for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self, symbol: &Symbol) -> Result<u64> {
        if !self.has_table(symbol)? {
            return Ok(0);
        }

        let sql = format!("SELECT COUNT(*) FROM {}", symbol.table_name());
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(store_err)?;
        Ok(count.unsigned_abs())
    }

    fn has_table(&self, symbol: &Symbol) -> Result<bool> {
        self.conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [symbol.table_name()],
                |_| Ok(()),
            )
            .optional()
            .map(|row| row.is_some())
            .map_err(store_err)
    }
}

impl CandleSink for SqliteStore {
    fn upsert(&mut self, symbol: &Symbol, candles: &[Candle]) -> Result<usize> {
        let table = symbol.table_name();
        let tx = self.conn.transaction().map_err(store_err)?;

        tx.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                time INTEGER PRIMARY KEY,
                open REAL,
                high REAL,
                low REAL,
                close REAL,
                volume INTEGER
            );"
        ))
        .map_err(store_err)?;

        {
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT INTO {table} (time, open, high, low, close, volume)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     ON CONFLICT(time) DO UPDATE SET
                        open = excluded.open,
                        high = excluded.high,
                        low = excluded.low,
                        close = excluded.close,
                        volume = excluded.volume"
                ))
                .map_err(store_err)?;

            for c in candles {
                stmt.execute(params![c.time, c.open, c.high, c.low, c.close, c.tick_count])
                    .map_err(store_err)?;
            }
        }

        tx.commit().map_err(store_err)?;
        debug!(%symbol, table = %table, rows = candles.len(), "upserted candles");
        Ok(candles.len())
    }
}
