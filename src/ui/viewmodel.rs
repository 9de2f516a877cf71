//! View model types representing renderable UI state.
//!
//! View models are computed by the `UiState::compute_*` methods and consumed
//! by the renderer. They hold display-ready data only: labels are already
//! resolved, search highlights are pre-computed, and empty states are decided.
//!
//! # Example
//!
//! ```rust
//! use sref_studio::ui::viewmodel::{HistoryItem, HistoryViewModel};
//!
//! let vm = HistoryViewModel {
//!     items: vec![HistoryItem {
//!         id: 1,
//!         name: "a cat --ar 9:16...".to_string(),
//!         text: "a cat --ar 9:16".to_string(),
//!         created_at: "2024-01-01 12:00:00".to_string(),
//!     }],
//!     empty_state: None,
//! };
//! assert_eq!(vm.items.len(), 1);
//! ```

use crate::domain::preferences::LayoutMode;
use crate::domain::prompt::PreviewKind;
use crate::query::{LibraryStats, SortKey};

/// Style library screen.
#[derive(Debug, Clone)]
pub struct LibraryViewModel {
    pub header: HeaderInfo,
    pub stats: LibraryStats,
    /// `All`, `Favorites`, then one badge per category.
    pub badges: Vec<FilterBadge>,
    /// Visible cards in display order.
    pub cards: Vec<StyleCard>,
    pub empty_state: Option<EmptyState>,
    /// Present while a search term is active.
    pub search_bar: Option<SearchBarInfo>,
    pub layout: LayoutMode,
    pub sort: SortKey,
    /// Open add/edit form.
    pub form: Option<FormView>,
}

/// One style card.
#[derive(Debug, Clone)]
pub struct StyleCard {
    pub id: String,
    pub sref_code: String,
    pub category_label: String,
    pub description: String,
    pub tags: Vec<String>,
    pub favorite: bool,
    pub has_image: bool,

    /// Character ranges of `sref_code` matching the search term.
    ///
    /// Each tuple is `(start, end)` in char indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Category filter button with its count.
#[derive(Debug, Clone)]
pub struct FilterBadge {
    pub label: String,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct FormView {
    pub title: String,
    pub sref_code: String,
    pub category_label: String,
    pub description: String,
    /// Tags joined with `", "`.
    pub tags: String,
}

/// Prompt builder screen.
#[derive(Debug, Clone)]
pub struct PromptViewModel {
    /// Live preview blocks in assembly order.
    pub preview: Vec<PreviewBlock>,
    pub output: Option<String>,
    pub can_copy: bool,
}

#[derive(Debug, Clone)]
pub struct PreviewBlock {
    pub kind: PreviewKind,
    pub text: String,
}

/// Saved prompt list.
#[derive(Debug, Clone)]
pub struct HistoryViewModel {
    pub items: Vec<HistoryItem>,
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Clone)]
pub struct HistoryItem {
    pub id: i64,
    pub name: String,
    pub text: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Shown when there is nothing to list.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
}
