// Key/value store seam - isolates all persistence side effects
pub mod memory;
pub mod sqlite;

pub use memory::MemoryKv;
pub use sqlite::SqliteKv;

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Malformed value under key '{key}': {source}")]
    MalformedValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous string-keyed JSON store. Every operation is a whole-value
/// read or overwrite; there is no partial update and no multi-key atomicity.
/// Callers read-modify-write entire collections.
pub trait KvStore: Send + Sync {
    /// Read the value under `key`. `None` if the key was never written.
    /// Fails if the stored text is not valid JSON.
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, KvError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), KvError>;

    /// Remove `key` if present. No-op otherwise.
    fn remove(&self, key: &str) -> Result<(), KvError>;
}

/// Shared handle used throughout the app state.
pub type SharedKv = Arc<dyn KvStore>;
