//! Header, stats line, filter badges and search bar.

use crate::query::LibraryStats;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterBadge, HeaderInfo, SearchBarInfo};

/// Appends the title centered across `cols`.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let title_len = header.title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(padding));
    out.push_str(&header.title);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + title_len)));

    out.push_str(Theme::reset());
    out.push('\n');
}

pub fn render_stats(out: &mut String, stats: &LibraryStats, theme: &Theme) {
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&format!(
        "{} styles · {} this week · {} categories · {} favorites",
        stats.total, stats.recent, stats.categories, stats.favorites
    ));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends the filter badges, wrapping at `cols`. The active badge is bold
/// and accented.
pub fn render_badges(out: &mut String, badges: &[FilterBadge], theme: &Theme, cols: usize) {
    let mut line_len = 0;

    for badge in badges {
        let text = format!("[{} {}]", badge.label, badge.count);
        let len = text.chars().count() + 1;

        if line_len > 0 && line_len + len > cols {
            out.push('\n');
            line_len = 0;
        }

        if badge.active {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.accent));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        out.push_str(&text);
        out.push_str(Theme::reset());
        out.push(' ');
        line_len += len;
    }
    out.push('\n');
}

pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme) {
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str("Search: ");
    out.push_str(Theme::reset());
    out.push_str(&search.query);
    out.push('\n');
}
