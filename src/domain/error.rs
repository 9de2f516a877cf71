//! Error types for sref-studio.
//!
//! This module defines the centralized error type [`StudioError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Every variant is
//! recoverable: the application layer turns errors into user-visible notifications
//! instead of terminating.

use thiserror::Error;

/// The main error type for prompt assembly, record storage and import/export.
///
/// # Examples
///
/// ```
/// use sref_studio::domain::StudioError;
///
/// fn require_sref(code: &str) -> Result<(), StudioError> {
///     if code.trim().is_empty() {
///         return Err(StudioError::Validation("sref code is required".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(require_sref("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum StudioError {
    /// A required prompt field was empty after trimming.
    ///
    /// Raised by prompt assembly when the base prompt is blank, and by the
    /// history when asked to save a prompt that was never generated.
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// A style record failed validation on create or update.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced record, history entry or preset does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An imported document does not have the expected shape.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The persistent store could not be read or written.
    ///
    /// Non-fatal: in-memory state remains usable for the session but is not
    /// durable.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StudioError {
    /// Short machine-readable name of the error kind.
    ///
    /// Used as a structured logging field and by the CLI exit path.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::InvalidFormat(_) => "invalid_format",
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::Io(_) => "io",
            Self::Config(_) => "config",
        }
    }
}

/// A specialized `Result` type for sref-studio operations.
pub type Result<T> = std::result::Result<T, StudioError>;
