//! Persisted document shapes and storage keys.
//!
//! These types describe exactly what is written under each key, separate
//! from the domain types they wrap.

use crate::domain::style::StyleRecord;
use serde::{Deserialize, Serialize};

/// Key holding the style library document.
pub const STYLE_LIBRARY_KEY: &str = "srefLibrary";

/// Key holding the prompt history array.
pub const PROMPT_HISTORY_KEY: &str = "savedPrompts";

/// Key holding the theme preference token.
pub const THEME_KEY: &str = "theme";

/// Key holding the card layout preference token.
pub const LAYOUT_KEY: &str = "preferredLayout";

/// Style library document: `{ "cards": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryDocument {
    pub cards: Vec<StyleRecord>,
}

/// Export document: the library plus the export time.
///
/// Import only requires the `cards` array, so an export document is always a
/// valid import document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub cards: Vec<StyleRecord>,
    /// RFC 3339 timestamp of the export.
    pub export_date: String,
}

/// Download file name for an export taken at `now_ms`.
#[must_use]
pub fn export_file_name(now_ms: i64) -> String {
    format!("sref-library-{now_ms}.json")
}
