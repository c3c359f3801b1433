use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use super::{KvError, KvStore};

pub type KvPool = Pool<SqliteConnectionManager>;

/// File-backed key/value store: one `kv` table, values are JSON text.
pub struct SqliteKv {
    pool: KvPool,
}

impl SqliteKv {
    /// Open (or create) the store at `db_path`, creating parent directories
    /// and the `kv` table as needed.
    pub fn open(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder().max_size(8).build(manager)?;

        let conn = pool.get()?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;

        Ok(Self { pool })
    }

    /// In-memory variant for tests. Uses a single pooled connection so the
    /// database survives as long as the pool does.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;

        let conn = pool.get()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )?;

        Ok(Self { pool })
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, KvError> {
        let conn = self.pool.get()?;

        let result: Result<String, rusqlite::Error> = conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(text) => {
                let value =
                    serde_json::from_str(&text).map_err(|source| KvError::MalformedValue {
                        key: key.to_string(),
                        source,
                    })?;
                Ok(Some(value))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), KvError> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
               value = excluded.value,
               updated_at = excluded.updated_at",
            params![key, value.to_string()],
        )?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
