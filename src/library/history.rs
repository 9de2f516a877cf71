//! Bounded prompt history.

use crate::domain::error::{Result, StudioError};
use crate::domain::history::{SavedPrompt, HISTORY_LIMIT};
use crate::storage::models::PROMPT_HISTORY_KEY;
use crate::storage::KeyValueStore;

/// Most recent generated prompts, newest first, at most [`HISTORY_LIMIT`].
#[derive(Debug)]
pub struct PromptHistory<S: KeyValueStore> {
    backend: S,
    entries: Vec<SavedPrompt>,
    durable: bool,
}

impl<S: KeyValueStore> PromptHistory<S> {
    /// Loads the history, falling back to empty on missing or malformed data.
    pub fn load(backend: S) -> Self {
        let _span = tracing::debug_span!("prompt_history_load").entered();

        let (mut entries, durable) = match backend.get(PROMPT_HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<SavedPrompt>>(&raw) {
                Ok(entries) => (entries, true),
                Err(e) => {
                    tracing::warn!(error = %e, "stored prompt history is malformed, starting empty");
                    (Vec::new(), true)
                }
            },
            Ok(None) => (Vec::new(), true),
            Err(e) => {
                tracing::warn!(error = %e, "history storage unavailable, changes will not persist");
                (Vec::new(), false)
            }
        };
        entries.truncate(HISTORY_LIMIT);

        tracing::debug!(count = entries.len(), "prompt history loaded");

        Self {
            backend,
            entries,
            durable,
        }
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[SavedPrompt] {
        &self.entries
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&SavedPrompt> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub const fn is_durable(&self) -> bool {
        self.durable
    }

    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Records a generated prompt at the front, evicting the oldest entry
    /// once the history is full.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::MissingRequiredField`] if `text` is blank.
    pub fn append(&mut self, text: &str) -> Result<SavedPrompt> {
        let _span = tracing::debug_span!("prompt_history_append").entered();

        if text.trim().is_empty() {
            return Err(StudioError::MissingRequiredField("prompt"));
        }

        let now = chrono::Local::now();
        let id = self.next_id(now.timestamp_millis());

        let entry = SavedPrompt::new(
            id,
            text.to_string(),
            now.format("%Y-%m-%d %H:%M:%S").to_string(),
        );

        self.entries.insert(0, entry.clone());
        self.entries.truncate(HISTORY_LIMIT);
        self.persist_best_effort();

        tracing::debug!(id, count = self.entries.len(), "prompt saved");
        Ok(entry)
    }

    /// Removes an entry. Returns `false` without writing if the id is absent.
    ///
    /// # Errors
    ///
    /// Never fails today; persistence failures only mark the history
    /// non-durable.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let _span = tracing::debug_span!("prompt_history_delete", id).entered();

        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }

        self.persist_best_effort();
        Ok(true)
    }

    /// Writes the full history in one operation.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::StorageUnavailable`] if the write fails.
    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| StudioError::StorageUnavailable(format!("failed to serialize history: {e}")))?;
        self.backend.set(PROMPT_HISTORY_KEY, &json)?;
        self.durable = true;
        Ok(())
    }

    /// `max(now_ms, newest + 1)`, stepping down past ids already taken when
    /// the newest id sits at `i64::MAX`.
    fn next_id(&self, now_ms: i64) -> i64 {
        let mut id = match self.entries.first().map(|newest| newest.id.checked_add(1)) {
            Some(Some(next)) => now_ms.max(next),
            Some(None) => {
                tracing::warn!("history ids exhausted, falling back to clock ids");
                now_ms
            }
            None => now_ms,
        };
        while self.entries.iter().any(|entry| entry.id == id) {
            id = id.wrapping_sub(1);
        }
        id
    }

    fn persist_best_effort(&mut self) {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "failed to persist prompt history");
            self.durable = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn eleven_appends_keep_ten_newest_first() {
        let mut history = PromptHistory::load(MemoryStore::new());

        for i in 1..=11 {
            history.append(&format!("prompt {i}")).unwrap();
        }

        let texts: Vec<&str> = history.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts.len(), HISTORY_LIMIT);
        assert_eq!(texts[0], "prompt 11");
        assert_eq!(texts[9], "prompt 2");
        assert!(!texts.contains(&"prompt 1"));
    }

    #[test]
    fn ids_are_unique_and_descending() {
        let mut history = PromptHistory::load(MemoryStore::new());
        for _ in 0..5 {
            history.append("same").unwrap();
        }

        let ids: Vec<i64> = history.entries().iter().map(|e| e.id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn persisted_snapshot_matches_memory() {
        let backend = MemoryStore::new();
        let mut history = PromptHistory::load(backend.clone());
        history.append("a cat --ar 9:16").unwrap();

        let reloaded = PromptHistory::load(backend);

        assert_eq!(reloaded.entries(), history.entries());
        assert_eq!(reloaded.entries()[0].name, "a cat --ar 9:16...");
    }

    #[test]
    fn append_after_max_id_stays_unique() {
        let mut backend = MemoryStore::new();
        backend
            .set(PROMPT_HISTORY_KEY, r#"[{"id":9223372036854775807,"text":"a","createdAt":""}]"#)
            .unwrap();
        let mut history = PromptHistory::load(backend);

        let entry = history.append("b").unwrap();

        assert_ne!(entry.id, i64::MAX);
        assert_eq!(history.entries()[0].text, "b");
        assert_eq!(history.entries().len(), 2);
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut history = PromptHistory::load(MemoryStore::new());
        assert!(matches!(
            history.append("  "),
            Err(StudioError::MissingRequiredField("prompt"))
        ));
        assert!(history.entries().is_empty());
    }

    #[test]
    fn delete_absent_id_writes_nothing() {
        let backend = MemoryStore::new();
        let mut history = PromptHistory::load(backend.clone());
        let kept = history.append("keep").unwrap();
        let before = backend.get(PROMPT_HISTORY_KEY).unwrap();

        assert!(!history.delete(kept.id + 1000).unwrap());
        assert_eq!(backend.get(PROMPT_HISTORY_KEY).unwrap(), before);

        assert!(history.delete(kept.id).unwrap());
        assert!(history.get(kept.id).is_none());
    }
}
