//! In-memory storage backend.
//!
//! Clones share the same underlying map, so several collections can be
//! given their own handle onto one logical store, as with browser local
//! storage. Nothing survives the process.

use crate::domain::error::{Result, StudioError};
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Process-local key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    /// When set, every operation fails with `StorageUnavailable`.
    unavailable: bool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every read and write fails, standing in for a
    /// disabled or full browser store.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            values: Arc::default(),
            unavailable: true,
        }
    }

    /// Returns a handle onto the same values with availability toggled.
    #[must_use]
    pub fn with_availability(&self, available: bool) -> Self {
        Self {
            values: Arc::clone(&self.values),
            unavailable: !available,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        if self.unavailable {
            return Err(StudioError::StorageUnavailable("store is disabled".to_string()));
        }
        self.values
            .lock()
            .map_err(|e| StudioError::StorageUnavailable(format!("store lock poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_values() {
        let mut a = MemoryStore::new();
        let b = a.clone();
        a.set("theme", "light").unwrap();
        assert_eq!(b.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn unavailable_store_rejects_everything() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(store.get("k"), Err(StudioError::StorageUnavailable(_))));
        assert!(matches!(store.set("k", "v"), Err(StudioError::StorageUnavailable(_))));
    }
}
