//! Terminal rendering layer.
//!
//! Transforms view models into ANSI-styled text through small composable
//! components, with light and dark palettes.
//!
//! # Architecture
//!
//! ```text
//! UiState → compute_*_view → ViewModel → render_* → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Screen-level rendering entry points
//! - [`components`]: Composable component renderers
//! - [`helpers`]: Highlighting, truncation and rules
//! - [`theme`]: Palettes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render_history, render_library, render_notification, render_prompt, render_style_detail};
pub use theme::Theme;
pub use viewmodel::{
    EmptyState, FilterBadge, FormView, HeaderInfo, HistoryItem, HistoryViewModel, LibraryViewModel,
    PreviewBlock, PromptViewModel, SearchBarInfo, StyleCard,
};
