use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{KvError, KvStore};

/// HashMap-backed store for tests. Mirrors the adapter contract without
/// touching the filesystem.
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    // Every write is a complete insert or remove, so a panic while the lock
    // was held cannot leave a half-written entry; recover the guard instead
    // of propagating the poison.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, serde_json::Value>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, KvError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), KvError> {
        self.entries().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        self.entries().remove(key);
        Ok(())
    }
}
