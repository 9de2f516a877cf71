//! Style record store.
//!
//! [`RecordStore`] owns the in-memory style collection and the backend handle
//! it is persisted through. The collection is loaded once at construction and
//! the full snapshot is written back after every mutation.
//!
//! Persistence is best-effort: a failed write is logged, the store is marked
//! non-durable, and the in-memory change stands.

use crate::domain::error::{Result, StudioError};
use crate::domain::style::{generate_style_id, sample_styles, StyleInput, StyleRecord};
use crate::storage::models::{ExportDocument, LibraryDocument, STYLE_LIBRARY_KEY};
use crate::storage::KeyValueStore;

/// CRUD store for style records, most recently added first.
#[derive(Debug)]
pub struct RecordStore<S: KeyValueStore> {
    backend: S,
    records: Vec<StyleRecord>,
    durable: bool,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Loads the library from `backend`.
    ///
    /// Never fails: a missing key yields an empty library, malformed data is
    /// logged and discarded, and an unreadable backend marks the store
    /// non-durable.
    pub fn load(backend: S) -> Self {
        let _span = tracing::debug_span!("record_store_load").entered();

        let (records, durable) = match backend.get(STYLE_LIBRARY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<LibraryDocument>(&raw) {
                Ok(document) => (document.cards, true),
                Err(e) => {
                    tracing::warn!(error = %e, "stored library is malformed, starting empty");
                    (Vec::new(), true)
                }
            },
            Ok(None) => (Vec::new(), true),
            Err(e) => {
                tracing::warn!(error = %e, "library storage unavailable, changes will not persist");
                (Vec::new(), false)
            }
        };

        tracing::debug!(count = records.len(), durable, "library loaded");

        Self {
            backend,
            records,
            durable,
        }
    }

    /// All records in stored order.
    #[must_use]
    pub fn records(&self) -> &[StyleRecord] {
        &self.records
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StyleRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether every change so far has reached the backend.
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        self.durable
    }

    /// The backend handle.
    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Adds a new record at the front of the library.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Validation`] if the sref code is blank; the
    /// library is unchanged.
    pub fn create(&mut self, input: StyleInput) -> Result<StyleRecord> {
        let _span = tracing::debug_span!("record_store_create").entered();

        let now = chrono::Utc::now().timestamp_millis();
        let id = self.fresh_id(now);
        let record = input.into_record(id, now)?;

        self.records.insert(0, record.clone());
        self.persist_best_effort();

        tracing::debug!(id = %record.id, sref = %record.sref_code, "style created");
        Ok(record)
    }

    /// Overwrites a record's editable fields.
    ///
    /// `id` and `created_at` are preserved, as is `favorite` unless the input
    /// sets it explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::NotFound`] for an unknown id, or
    /// [`StudioError::Validation`] if the sref code is blank.
    pub fn update(&mut self, id: &str, input: StyleInput) -> Result<StyleRecord> {
        let _span = tracing::debug_span!("record_store_update", id = %id).entered();

        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| StudioError::NotFound(format!("style '{id}'")))?;

        input.apply_to(record)?;
        let updated = record.clone();
        self.persist_best_effort();

        tracing::debug!("style updated");
        Ok(updated)
    }

    /// Removes a record.
    ///
    /// Returns `false` without touching the backend if the id is absent.
    ///
    /// # Errors
    ///
    /// Never fails today; persistence failures only mark the store
    /// non-durable.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let _span = tracing::debug_span!("record_store_delete", id = %id).entered();

        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            tracing::debug!("style not found, nothing deleted");
            return Ok(false);
        };

        self.records.remove(index);
        self.persist_best_effort();

        tracing::debug!(remaining = self.records.len(), "style deleted");
        Ok(true)
    }

    /// Flips the favorite flag of a record.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::NotFound`] for an unknown id.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<StyleRecord> {
        let _span = tracing::debug_span!("record_store_toggle_favorite", id = %id).entered();

        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| StudioError::NotFound(format!("style '{id}'")))?;

        record.favorite = !record.favorite;
        let toggled = record.clone();
        self.persist_best_effort();

        tracing::debug!(favorite = toggled.favorite, "favorite toggled");
        Ok(toggled)
    }

    /// Serializes the library and the current time into an export document.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::InvalidFormat`] if serialization fails.
    pub fn export_all(&self) -> Result<Vec<u8>> {
        let document = ExportDocument {
            cards: self.records.clone(),
            export_date: chrono::Utc::now().to_rfc3339(),
        };

        let bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| StudioError::InvalidFormat(format!("failed to serialize export: {e}")))?;

        tracing::debug!(count = self.records.len(), bytes = bytes.len(), "library exported");
        Ok(bytes)
    }

    /// Replaces the whole library with the records in `blob`.
    ///
    /// The blob must be a JSON object whose `cards` field is an array of
    /// style records. Any other shape fails and leaves the library untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::InvalidFormat`] for malformed input.
    pub fn import_all(&mut self, blob: &[u8]) -> Result<&[StyleRecord]> {
        let _span = tracing::debug_span!("record_store_import", bytes = blob.len()).entered();

        let value: serde_json::Value = serde_json::from_slice(blob)
            .map_err(|e| StudioError::InvalidFormat(format!("not a JSON document: {e}")))?;

        let cards = value
            .get("cards")
            .filter(|cards| cards.is_array())
            .cloned()
            .ok_or_else(|| StudioError::InvalidFormat("missing 'cards' array".to_string()))?;

        let records: Vec<StyleRecord> = serde_json::from_value(cards)
            .map_err(|e| StudioError::InvalidFormat(format!("malformed style record: {e}")))?;

        self.records = records;
        self.persist_best_effort();

        tracing::debug!(count = self.records.len(), "library imported");
        Ok(&self.records)
    }

    /// Drops the stored library and clears every record, returning how many
    /// were removed. The next start counts as a first start again.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::StorageUnavailable`] if the stored key cannot be
    /// removed; the records are left as they were.
    pub fn reset(&mut self) -> Result<usize> {
        let _span = tracing::debug_span!("record_store_reset").entered();

        self.backend.remove(STYLE_LIBRARY_KEY)?;
        let removed = self.records.len();
        self.records.clear();
        self.durable = true;

        tracing::info!(removed, "library reset");
        Ok(removed)
    }

    /// Fills an empty library with the sample styles.
    ///
    /// Returns whether anything was added.
    pub fn seed_samples(&mut self) -> bool {
        if !self.records.is_empty() {
            return false;
        }

        self.records = sample_styles(chrono::Utc::now().timestamp_millis());
        self.persist_best_effort();

        tracing::debug!(count = self.records.len(), "sample styles seeded");
        true
    }

    /// Writes the full library snapshot to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::StorageUnavailable`] if the write fails.
    pub fn persist(&mut self) -> Result<()> {
        let document = LibraryDocument {
            cards: self.records.clone(),
        };
        let json = serde_json::to_string(&document)
            .map_err(|e| StudioError::StorageUnavailable(format!("failed to serialize library: {e}")))?;

        self.backend.set(STYLE_LIBRARY_KEY, &json)?;
        self.durable = true;
        Ok(())
    }

    fn persist_best_effort(&mut self) {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "failed to persist library, keeping changes in memory");
            self.durable = false;
        }
    }

    fn fresh_id(&self, now_ms: i64) -> String {
        loop {
            let id = generate_style_id(now_ms);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::style::Category;
    use crate::query::LibraryStats;
    use crate::storage::MemoryStore;

    fn store_with(inputs: &[&str]) -> RecordStore<MemoryStore> {
        let mut store = RecordStore::load(MemoryStore::new());
        for sref in inputs {
            store.create(StyleInput::new(*sref)).unwrap();
        }
        store
    }

    fn stored_bytes(store: &RecordStore<MemoryStore>) -> Option<String> {
        store.backend().get(STYLE_LIBRARY_KEY).unwrap()
    }

    #[test]
    fn create_inserts_at_front_and_persists() {
        let store = store_with(&["1", "2"]);

        assert_eq!(store.records()[0].sref_code, "--sref 2");
        assert_eq!(store.records()[1].sref_code, "--sref 1");

        let reloaded = RecordStore::load(store.backend().clone());
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn create_with_blank_sref_changes_nothing() {
        let mut store = store_with(&["1"]);
        let before = stored_bytes(&store);

        let err = store.create(StyleInput::new("")).unwrap_err();

        assert!(matches!(err, StudioError::Validation(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(stored_bytes(&store), before);
    }

    #[test]
    fn update_preserves_immutable_fields() {
        let mut store = store_with(&["1"]);
        let id = store.records()[0].id.clone();
        let created_at = store.records()[0].created_at;
        store.toggle_favorite(&id).unwrap();

        let updated = store
            .update(&id, StyleInput::new("99").with_category(Category::Vintage))
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created_at);
        assert!(updated.favorite);
        assert_eq!(updated.sref_code, "--sref 99");
        assert_eq!(updated.category, Category::Vintage);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = store_with(&[]);
        let err = store.update("nope", StyleInput::new("1")).unwrap_err();
        assert!(matches!(err, StudioError::NotFound(_)));
    }

    #[test]
    fn update_with_blank_sref_keeps_record() {
        let mut store = store_with(&["5"]);
        let id = store.records()[0].id.clone();

        let err = store.update(&id, StyleInput::new(" ")).unwrap_err();

        assert!(matches!(err, StudioError::Validation(_)));
        assert_eq!(store.records()[0].sref_code, "--sref 5");
    }

    #[test]
    fn delete_absent_id_is_a_byte_identical_no_op() {
        let mut store = store_with(&["1", "2"]);
        let before = stored_bytes(&store);

        assert!(!store.delete("missing").unwrap());
        store.persist().unwrap();

        assert_eq!(stored_bytes(&store), before);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = store_with(&["1", "2", "3"]);
        let id = store.records()[1].id.clone();

        assert!(store.delete(&id).unwrap());

        assert_eq!(store.len(), 2);
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn toggle_favorite_flips_only_that_flag() {
        let mut store = store_with(&["1"]);
        let before = store.records()[0].clone();

        let toggled = store.toggle_favorite(&before.id).unwrap();

        assert_eq!(toggled, StyleRecord { favorite: true, ..before });
        assert!(matches!(store.toggle_favorite("nope"), Err(StudioError::NotFound(_))));
    }

    #[test]
    fn export_then_import_round_trips() {
        let mut source = store_with(&["1", "2"]);
        let id = source.records()[0].id.clone();
        source.toggle_favorite(&id).unwrap();
        let blob = source.export_all().unwrap();

        let mut target = store_with(&["9"]);
        let imported = target.import_all(&blob).unwrap().to_vec();

        assert_eq!(imported, source.records());
    }

    #[test]
    fn import_rejects_wrong_shapes_without_mutating() {
        let mut store = store_with(&["1"]);
        let before = store.records().to_vec();

        for blob in [
            &b"not json"[..],
            br#"[1, 2, 3]"#,
            br#"{"records": []}"#,
            br#"{"cards": "nope"}"#,
            br#"{"cards": [{"id": 3}]}"#,
        ] {
            let err = store.import_all(blob).unwrap_err();
            assert!(matches!(err, StudioError::InvalidFormat(_)));
            assert_eq!(store.records(), before.as_slice());
        }
    }

    #[test]
    fn imported_extreme_timestamps_do_not_break_stats() {
        let mut store = store_with(&[]);
        let blob = br#"{"cards":[{"id":"x","sref":"--sref 1","createdAt":-9223372036854775808}]}"#;
        store.import_all(blob).unwrap();

        let stats = LibraryStats::compute(store.records(), 1_700_000_000_000);

        assert_eq!(stats.total, 1);
        assert_eq!(stats.recent, 0);
    }

    #[test]
    fn malformed_stored_data_loads_empty() {
        let mut backend = MemoryStore::new();
        backend.set(STYLE_LIBRARY_KEY, "{not json").unwrap();

        let store = RecordStore::load(backend);

        assert!(store.is_empty());
        assert!(store.is_durable());
    }

    #[test]
    fn unavailable_backend_keeps_in_memory_changes() {
        let mut store = RecordStore::load(MemoryStore::unavailable());
        assert!(!store.is_durable());

        let record = store.create(StyleInput::new("1")).unwrap();

        assert_eq!(store.get(&record.id), Some(&record));
        assert!(!store.is_durable());
    }

    #[test]
    fn reset_removes_stored_key_and_records() {
        let mut store = store_with(&["1", "2"]);

        assert_eq!(store.reset().unwrap(), 2);
        assert!(store.is_empty());
        assert_eq!(stored_bytes(&store), None);
    }

    #[test]
    fn failed_reset_keeps_records() {
        let backend = MemoryStore::new();
        let mut store = RecordStore::load(backend.clone());
        store.create(StyleInput::new("1")).unwrap();
        let mut offline = RecordStore::load(backend.with_availability(false));
        offline.records = store.records().to_vec();

        assert!(matches!(offline.reset(), Err(StudioError::StorageUnavailable(_))));
        assert_eq!(offline.len(), 1);
        assert!(backend.get(STYLE_LIBRARY_KEY).unwrap().is_some());
    }

    #[test]
    fn samples_seed_only_an_empty_library() {
        let mut empty = store_with(&[]);
        assert!(empty.seed_samples());
        assert_eq!(empty.len(), 4);

        let mut populated = store_with(&["1"]);
        assert!(!populated.seed_samples());
        assert_eq!(populated.len(), 1);
    }
}
