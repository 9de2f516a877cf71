//! Mode and level enums for the application layer.
//!
//! The style form is a small state machine: it is either closed, open for a
//! new style, or open on an existing record. Notifications carry a level that
//! the frontend maps to a color and, for the CLI, an exit status.
//!
//! # Example
//!
//! ```rust
//! use sref_studio::app::modes::{FormMode, NotifyLevel};
//!
//! let mode = FormMode::Editing;
//! assert!(mode.is_open());
//! assert!(NotifyLevel::Error.is_error());
//! ```

/// State of the style add/edit form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    /// No form is shown.
    #[default]
    Closed,

    /// Form is open for a new style. Saving creates a record.
    Creating,

    /// Form is open on an existing record. Saving overwrites it.
    Editing,
}

impl FormMode {
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Form title as shown in the header.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Closed => "",
            Self::Creating => "New Style",
            Self::Editing => "Edit Style",
        }
    }
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

impl NotifyLevel {
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}
