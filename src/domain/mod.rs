//! Domain layer for sref-studio.
//!
//! This module contains the core domain types and pure business rules: the
//! prompt grammar, the preset catalog, style records and prompt history
//! entries. Nothing here performs I/O.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`prompt`]: Prompt fields, assembly and style-ref merging
//! - [`preset`]: Built-in preset catalog
//! - [`style`]: Style library records and input validation
//! - [`history`]: Saved prompt entries
//! - [`preferences`]: Theme and layout modes
//!
//! # Examples
//!
//! ```
//! use sref_studio::domain::{assemble, PromptFields, Result};
//!
//! fn build() -> Result<String> {
//!     let mut fields = PromptFields::default();
//!     fields.load_preset("portrait")?;
//!     assemble(&fields)
//! }
//!
//! assert!(build().unwrap().starts_with("portrait of a person"));
//! ```

pub mod error;
pub mod history;
pub mod preferences;
pub mod preset;
pub mod prompt;
pub mod style;

pub use error::{Result, StudioError};
pub use history::{SavedPrompt, HISTORY_LIMIT};
pub use preferences::{LayoutMode, ThemeMode};
pub use preset::{get_preset, preset_names, Preset, PRESETS};
pub use prompt::{assemble, merge_base_prompt, merge_style_ref, PromptField, PromptFields, DEFAULT_ASPECT_RATIO};
pub use style::{Category, StyleInput, StyleRecord};
