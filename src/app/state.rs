//! Transient UI state and view model computation.
//!
//! [`UiState`] holds everything the user is in the middle of: the prompt
//! fields and last generated output, the library filter/search/sort, the open
//! style form, and the active theme and layout. It is owned by the
//! [`App`](crate::app::App) and passed explicitly; nothing here is global.
//!
//! # View Model Computation
//!
//! The `compute_*` methods turn state plus the persisted collections into
//! display-ready view models for the renderer. They never mutate.
//!
//! # Example
//!
//! ```rust
//! use sref_studio::app::UiState;
//! use sref_studio::domain::style::sample_styles;
//!
//! let state = UiState::default();
//! let records = sample_styles(0);
//! let view = state.compute_library_view(&records, 0);
//! assert_eq!(view.cards.len(), records.len());
//! ```

use super::modes::FormMode;
use crate::domain::history::SavedPrompt;
use crate::domain::preferences::{LayoutMode, ThemeMode};
use crate::domain::prompt::PromptFields;
use crate::domain::style::{Category, StyleInput, StyleRecord};
use crate::query::{category_counts, count, query, CategoryFilter, LibraryStats, QueryOptions, SortKey};
use crate::ui::helpers::highlight_ranges;
use crate::ui::viewmodel::{
    EmptyState, FilterBadge, FormView, HeaderInfo, HistoryItem, HistoryViewModel,
    LibraryViewModel, PreviewBlock, PromptViewModel, SearchBarInfo, StyleCard,
};

/// All transient UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Prompt builder inputs.
    pub prompt: PromptFields,

    /// Last successfully generated prompt. Cleared by `clear`.
    pub output: Option<String>,

    pub filter: CategoryFilter,
    pub favorites_only: bool,
    pub search: String,
    pub sort: SortKey,

    /// Record being edited; `None` with an open form means a new style.
    pub editing_id: Option<String>,

    /// Open style form, if any.
    pub form: Option<StyleInput>,

    pub layout: LayoutMode,
    pub theme: ThemeMode,
}

impl UiState {
    #[must_use]
    pub fn form_mode(&self) -> FormMode {
        match (&self.form, &self.editing_id) {
            (None, _) => FormMode::Closed,
            (Some(_), None) => FormMode::Creating,
            (Some(_), Some(_)) => FormMode::Editing,
        }
    }

    /// Query options matching the current filter, search and sort.
    #[must_use]
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            filter: self.filter,
            favorites_only: self.favorites_only,
            search: self.search.clone(),
            sort: self.sort,
        }
    }

    /// Opens the form on a blank style.
    pub fn open_new_form(&mut self) {
        self.editing_id = None;
        self.form = Some(StyleInput::default());
    }

    /// Opens the form pre-filled from `record`.
    pub fn open_edit_form(&mut self, record: &StyleRecord) {
        self.editing_id = Some(record.id.clone());
        self.form = Some(StyleInput {
            sref_code: record.sref_code.clone(),
            category: record.category,
            description: record.description.clone(),
            tags: record.tags.clone(),
            image: record.image.clone(),
            favorite: None,
        });
    }

    pub fn close_form(&mut self) {
        self.editing_id = None;
        self.form = None;
    }

    /// Builds the library view: stats, filter badges and visible cards.
    #[must_use]
    pub fn compute_library_view(&self, records: &[StyleRecord], now_ms: i64) -> LibraryViewModel {
        let _span = tracing::debug_span!("compute_library_view", total = records.len()).entered();

        let visible = query(records, &self.query_options());
        let needle = self.search.trim().to_lowercase();

        let cards: Vec<StyleCard> = visible
            .iter()
            .map(|record| StyleCard {
                id: record.id.clone(),
                sref_code: record.sref_code.clone(),
                category_label: record.category.label().to_string(),
                description: record.description.clone(),
                tags: record.tags.clone(),
                favorite: record.favorite,
                has_image: record.image.is_some(),
                highlight_ranges: highlight_ranges(&record.sref_code, &needle),
            })
            .collect();

        let empty_state = if records.is_empty() {
            Some(EmptyState {
                message: "No styles yet".to_string(),
                subtitle: "Add one with `style add <sref>` or import a library".to_string(),
            })
        } else if cards.is_empty() {
            Some(EmptyState {
                message: "No matching styles".to_string(),
                subtitle: "Try a different filter or search term".to_string(),
            })
        } else {
            None
        };

        let search_bar = (!needle.is_empty()).then(|| SearchBarInfo {
            query: self.search.trim().to_string(),
        });

        LibraryViewModel {
            header: HeaderInfo {
                title: format!(" Style Library ({}/{}) ", cards.len(), records.len()),
            },
            stats: LibraryStats::compute(records, now_ms),
            badges: self.compute_badges(records),
            cards,
            empty_state,
            search_bar,
            layout: self.layout,
            sort: self.sort,
            form: self.compute_form_view(),
        }
    }

    fn compute_badges(&self, records: &[StyleRecord]) -> Vec<FilterBadge> {
        let per_category = category_counts(records);

        let mut badges = vec![
            FilterBadge {
                label: "All".to_string(),
                count: count(records, CategoryFilter::All),
                active: self.filter == CategoryFilter::All,
            },
            FilterBadge {
                label: "Favorites".to_string(),
                count: count(records, CategoryFilter::Favorites),
                active: self.filter == CategoryFilter::Favorites,
            },
        ];

        badges.extend(Category::ALL.iter().map(|category| FilterBadge {
            label: category.label().to_string(),
            count: per_category.get(category).copied().unwrap_or(0),
            active: self.filter == CategoryFilter::Category(*category),
        }));

        badges
    }

    fn compute_form_view(&self) -> Option<FormView> {
        let form = self.form.as_ref()?;
        Some(FormView {
            title: self.form_mode().title().to_string(),
            sref_code: form.sref_code.clone(),
            category_label: form.category.label().to_string(),
            description: form.description.clone(),
            tags: form.tags.join(", "),
        })
    }

    /// Builds the prompt builder view: live preview blocks and the output.
    #[must_use]
    pub fn compute_prompt_view(&self) -> PromptViewModel {
        let preview = self
            .prompt
            .preview()
            .into_iter()
            .map(|(kind, text)| PreviewBlock { kind, text })
            .collect();

        PromptViewModel {
            preview,
            output: self.output.clone(),
            can_copy: self.output.is_some(),
        }
    }

    /// Builds the saved prompt list.
    #[must_use]
    pub fn compute_history_view(&self, entries: &[SavedPrompt]) -> HistoryViewModel {
        let items: Vec<HistoryItem> = entries
            .iter()
            .map(|entry| HistoryItem {
                id: entry.id,
                name: entry.name.clone(),
                text: entry.text.clone(),
                created_at: entry.created_at.clone(),
            })
            .collect();

        let empty_state = items.is_empty().then(|| EmptyState {
            message: "No saved prompts".to_string(),
            subtitle: "Generate a prompt and save it to keep it here".to_string(),
        });

        HistoryViewModel { items, empty_state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::style::sample_styles;

    #[test]
    fn form_mode_follows_form_and_editing_id() {
        let mut state = UiState::default();
        assert_eq!(state.form_mode(), FormMode::Closed);

        state.open_new_form();
        assert_eq!(state.form_mode(), FormMode::Creating);

        let record = &sample_styles(0)[0];
        state.open_edit_form(record);
        assert_eq!(state.form_mode(), FormMode::Editing);
        assert_eq!(state.form.as_ref().map(|f| f.sref_code.as_str()), Some(record.sref_code.as_str()));

        state.close_form();
        assert_eq!(state.form_mode(), FormMode::Closed);
    }

    #[test]
    fn library_view_reports_empty_states() {
        let state = UiState::default();
        let empty = state.compute_library_view(&[], 0);
        assert_eq!(empty.empty_state.map(|e| e.message).as_deref(), Some("No styles yet"));

        let searching = UiState {
            search: "zzz-no-match".to_string(),
            ..UiState::default()
        };
        let view = searching.compute_library_view(&sample_styles(0), 0);
        assert!(view.cards.is_empty());
        assert_eq!(view.empty_state.map(|e| e.message).as_deref(), Some("No matching styles"));
        assert!(view.search_bar.is_some());
    }

    #[test]
    fn badges_cover_all_favorites_and_categories() {
        let records = sample_styles(0);
        let view = UiState::default().compute_library_view(&records, 0);

        assert_eq!(view.badges.len(), Category::ALL.len() + 2);
        assert_eq!(view.badges[0].count, records.len());
        assert!(view.badges[0].active);
    }

    #[test]
    fn prompt_view_enables_copy_only_with_output() {
        let mut state = UiState::default();
        assert!(!state.compute_prompt_view().can_copy);

        state.output = Some("a cat --ar 9:16".to_string());
        assert!(state.compute_prompt_view().can_copy);
    }
}
