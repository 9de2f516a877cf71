//! Saved prompt list renderer.

use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HistoryItem;

/// Column width of the id.
const ID_WIDTH: usize = 14;
/// Column width of the timestamp.
const DATE_WIDTH: usize = 20;

pub fn render_history_rows(out: &mut String, items: &[HistoryItem], theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&format!("{:<ID_WIDTH$} {:<DATE_WIDTH$} {}", "ID", "SAVED", "PROMPT"));
    out.push_str(Theme::reset());
    out.push('\n');

    let text_width = cols.saturating_sub(ID_WIDTH + DATE_WIDTH + 2).max(10);

    for item in items {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&format!("{:<ID_WIDTH$} {:<DATE_WIDTH$} ", item.id, item.created_at));
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&truncate(&item.text, text_width));
        out.push_str(Theme::reset());
        out.push('\n');
    }
}
