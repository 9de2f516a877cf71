//! Top-level screen rendering.
//!
//! Each function takes a pre-computed view model and returns the whole screen
//! as an ANSI-styled `String`. Callers decide where it goes (stdout for the
//! CLI, a buffer in tests).
//!
//! # Example
//!
//! ```rust
//! use sref_studio::app::UiState;
//! use sref_studio::ui::{render_library, Theme};
//!
//! let state = UiState::default();
//! let vm = state.compute_library_view(&[], 0);
//! let screen = render_library(&vm, &Theme::default(), 80);
//! assert!(screen.contains("No styles yet"));
//! ```

use crate::app::NotifyLevel;
use crate::ui::components;
use crate::ui::helpers::rule;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HistoryViewModel, LibraryViewModel, PromptViewModel, StyleCard};

/// Renders the style library: header, stats, badges, optional search bar and
/// form summary, then the cards or an empty state.
#[must_use]
pub fn render_library(vm: &LibraryViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();

    components::render_header(&mut out, &vm.header, theme, cols);
    components::render_stats(&mut out, &vm.stats, theme);
    components::render_badges(&mut out, &vm.badges, theme, cols);
    if let Some(search) = &vm.search_bar {
        components::render_search_bar(&mut out, search, theme);
    }
    out.push_str(&rule(theme, cols));
    out.push('\n');

    if let Some(form) = &vm.form {
        out.push_str(&format!(
            "{}{}{}: {} [{}] {} {}\n",
            Theme::bold(),
            form.title,
            Theme::reset(),
            form.sref_code,
            form.category_label,
            form.description,
            form.tags
        ));
    }

    if let Some(empty) = &vm.empty_state {
        components::render_empty_state(&mut out, empty, theme, cols);
        return out;
    }

    components::render_cards(&mut out, &vm.cards, vm.layout, theme, cols);
    out
}

/// Renders the prompt builder preview and output.
#[must_use]
pub fn render_prompt(vm: &PromptViewModel, theme: &Theme) -> String {
    let mut out = String::new();
    components::render_prompt(&mut out, vm, theme);
    out
}

/// Renders the saved prompt table or its empty state.
#[must_use]
pub fn render_history(vm: &HistoryViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();
    match &vm.empty_state {
        Some(empty) => components::render_empty_state(&mut out, empty, theme, cols),
        None => components::render_history_rows(&mut out, &vm.items, theme, cols),
    }
    out
}

/// Renders every field of one style.
#[must_use]
pub fn render_style_detail(card: &StyleCard, theme: &Theme) -> String {
    let mut out = String::new();
    components::render_card_detail(&mut out, card, theme);
    out
}

/// Renders a one-line notification colored by level.
#[must_use]
pub fn render_notification(level: NotifyLevel, message: &str, theme: &Theme) -> String {
    let color = match level {
        NotifyLevel::Info => &theme.colors.info_fg,
        NotifyLevel::Success => &theme.colors.success_fg,
        NotifyLevel::Error => &theme.colors.error_fg,
    };
    format!("{}{message}{}", Theme::fg(color), Theme::reset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::UiState;
    use crate::domain::style::sample_styles;

    #[test]
    fn library_lists_every_visible_card() {
        let theme = Theme::from_name("light").unwrap();
        let records = sample_styles(0);
        let vm = UiState::default().compute_library_view(&records, 0);

        let screen = render_library(&vm, &theme, 100);

        for record in &records {
            assert!(screen.contains(&record.sref_code), "missing {}", record.sref_code);
        }
        assert!(screen.contains("Style Library"));
    }

    #[test]
    fn prompt_without_output_shows_placeholder() {
        let theme = Theme::from_name("dark").unwrap();
        let vm = UiState::default().compute_prompt_view();
        assert!(render_prompt(&vm, &theme).contains("Your generated prompt will appear here"));
    }

    #[test]
    fn empty_history_renders_message() {
        let theme = Theme::from_name("dark").unwrap();
        let vm = UiState::default().compute_history_view(&[]);
        assert!(render_history(&vm, &theme, 80).contains("No saved prompts"));
    }
}
