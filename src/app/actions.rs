//! Side effects requested by the command handler.
//!
//! The handler never touches the clipboard, the filesystem outside the
//! store, or the terminal. It returns a `Vec<Action>` and the frontend
//! (the CLI in `main.rs`) performs them in order.
//!
//! # Example
//!
//! ```rust
//! use sref_studio::app::{Action, NotifyLevel};
//!
//! let actions = vec![
//!     Action::CopyToClipboard("a cat --ar 9:16".to_string()),
//!     Action::notify(NotifyLevel::Success, "Prompt copied"),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use super::modes::NotifyLevel;

/// Effects produced by [`App::handle`](crate::app::App::handle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Shows a transient message to the user.
    Notify {
        level: NotifyLevel,
        message: String,
    },

    /// Places text on the system clipboard.
    ///
    /// Frontends without clipboard access print the text instead.
    CopyToClipboard(String),

    /// Offers a file to the user.
    Download {
        /// Suggested file name, e.g. `sref-library-1700000000000.json`.
        file_name: String,
        contents: Vec<u8>,
    },

    /// State changed and the view should be redrawn.
    Render,
}

impl Action {
    pub fn notify(level: NotifyLevel, message: impl Into<String>) -> Self {
        Self::Notify {
            level,
            message: message.into(),
        }
    }
}
