//! JSON file-based storage backend.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary file first
//! and are renamed into place, so a crash never leaves a half-written value.
//!
//! # Performance Characteristics
//!
//! - **Read**: reads the whole file for the key
//! - **Write**: rewrites the whole file for the key
//! - **Best for**: small collections written after every user action

use crate::domain::error::{Result, StudioError};
use crate::storage::backend::KeyValueStore;
use std::path::{Path, PathBuf};

/// JSON file storage backend.
///
/// Values are stored verbatim; callers decide whether a value is a JSON
/// document or a bare token.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. Each logical collection owns its own
/// handle, and handles for different keys never touch the same file.
///
/// # Directory Layout
///
/// ```text
/// <data_dir>/
///   srefLibrary.json      {"cards": [...]}
///   savedPrompts.json     [...]
///   theme.json            auto
///   preferredLayout.json  landscape
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding one file per key.
    dir: PathBuf,
}

impl FileStore {
    /// Creates or opens a file store rooted at `dir`.
    ///
    /// The directory is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::StorageUnavailable`] if the directory cannot be
    /// created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sref_studio::storage::FileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = FileStore::new(PathBuf::from("/tmp/sref-studio"))?;
    /// # Ok::<(), sref_studio::StudioError>(())
    /// ```
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?dir, "initializing file store");

        std::fs::create_dir_all(&dir).map_err(|e| {
            StudioError::StorageUnavailable(format!("cannot create {}: {e}", dir.display()))
        })?;

        Ok(Self { dir })
    }

    /// Directory holding the store's files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// Path separators in the key are replaced so a key can never escape the
    /// store directory.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | '.') { '_' } else { c })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _span = tracing::debug_span!("file_store_get", key = %key).entered();

        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "value loaded");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no stored value");
                Ok(None)
            }
            Err(e) => Err(StudioError::StorageUnavailable(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("file_store_set", key = %key, bytes = value.len()).entered();

        let path = self.path_for(key);
        let tmp_path = path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value).map_err(|e| {
            StudioError::StorageUnavailable(format!("cannot write {}: {e}", tmp_path.display()))
        })?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path).map_err(|e| {
            StudioError::StorageUnavailable(format!("cannot replace {}: {e}", path.display()))
        })?;

        tracing::debug!("value saved");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("file_store_remove", key = %key).entered();

        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StudioError::StorageUnavailable(format!("cannot remove {key}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_key_reads_as_none() {
        let temp = tempdir().unwrap();
        let store = FileStore::new(temp.path().to_path_buf()).unwrap();
        assert_eq!(store.get("srefLibrary").unwrap(), None);
    }

    #[test]
    fn set_then_get_returns_value_and_leaves_no_tmp_file() {
        let temp = tempdir().unwrap();
        let mut store = FileStore::new(temp.path().join("nested")).unwrap();

        store.set("savedPrompts", "[]").unwrap();

        assert_eq!(store.get("savedPrompts").unwrap().as_deref(), Some("[]"));
        assert!(store.path_for("savedPrompts").exists());
        assert!(!store.path_for("savedPrompts").with_extension("tmp").exists());
    }

    #[test]
    fn keys_cannot_escape_directory() {
        let temp = tempdir().unwrap();
        let store = FileStore::new(temp.path().to_path_buf()).unwrap();
        let path = store.path_for("../outside");
        assert_eq!(path.parent(), Some(temp.path()));
    }

    #[test]
    fn remove_is_idempotent() {
        let temp = tempdir().unwrap();
        let mut store = FileStore::new(temp.path().to_path_buf()).unwrap();
        store.set("theme", "dark").unwrap();
        store.remove("theme").unwrap();
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }
}
