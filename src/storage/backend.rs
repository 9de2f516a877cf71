//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait: a string store with one
//! independent value per key, the same shape as a browser's local storage.
//! Every logical collection (style library, prompt history, theme, layout)
//! lives under its own key; there are no cross-key transactions.
//!
//! # Design Philosophy
//!
//! The trait is deliberately minimal. Serialization, validation and
//! collection semantics belong to the stores in [`crate::library`]; the
//! backend only moves whole string values in and out.

use crate::domain::error::Result;

/// Abstraction over persistent key-value string storage.
///
/// # Implementations
///
/// - [`crate::storage::FileStore`]: one JSON file per key with atomic writes
/// - [`crate::storage::MemoryStore`]: process-local map, used in tests and as
///   a fallback when the data directory is unusable
///
/// # Examples
///
/// ```
/// use sref_studio::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("theme", "dark")?;
/// assert_eq!(store.get("theme")?.as_deref(), Some("dark"));
/// # Ok::<(), sref_studio::StudioError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StudioError::StorageUnavailable`] if the backend
    /// cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StudioError::StorageUnavailable`] if the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StudioError::StorageUnavailable`] if the backend
    /// cannot be modified.
    fn remove(&mut self, key: &str) -> Result<()>;
}
