//! Saved prompt history entries.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the prompt history.
pub const HISTORY_LIMIT: usize = 10;

/// Number of characters of the prompt used for the entry name.
const NAME_PREFIX_CHARS: usize = 50;

/// A previously generated prompt.
///
/// Entries written by older builds used `prompt` and `timestamp` for the
/// text and display time; both are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPrompt {
    /// Creation time in milliseconds, unique within the history.
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "prompt")]
    pub text: String,
    #[serde(alias = "timestamp", default)]
    pub created_at: String,
}

impl SavedPrompt {
    /// Creates an entry, deriving the name from the prompt text.
    #[must_use]
    pub fn new(id: i64, text: String, created_at: String) -> Self {
        Self {
            id,
            name: entry_name(&text),
            text,
            created_at,
        }
    }
}

/// First fifty characters of the prompt followed by an ellipsis.
#[must_use]
pub fn entry_name(text: &str) -> String {
    let prefix: String = text.chars().take(NAME_PREFIX_CHARS).collect();
    format!("{prefix}...")
}
