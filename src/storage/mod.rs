//! Storage layer for persistent library, history and preference data.
//!
//! This module provides the key-value abstraction every persisted collection
//! is written through, its file and in-memory implementations, and the
//! document shapes stored under each key.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait
//! - `json`: one-file-per-key JSON storage with atomic writes
//! - `memory`: shared in-memory storage
//! - `models`: storage keys and persisted document types

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::KeyValueStore;
pub use json::FileStore;
pub use memory::MemoryStore;
pub use models::{
    export_file_name, ExportDocument, LibraryDocument, LAYOUT_KEY, PROMPT_HISTORY_KEY,
    STYLE_LIBRARY_KEY, THEME_KEY,
};
