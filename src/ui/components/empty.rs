//! Empty state component renderer.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Appends a centered two-line message: the message in `empty_state_fg`, the
/// subtitle dimmed.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    let msg_padding = cols.saturating_sub(empty.message.chars().count()) / 2;
    out.push('\n');
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&" ".repeat(msg_padding));
    out.push_str(&empty.message);
    out.push_str(Theme::reset());
    out.push('\n');

    let sub_padding = cols.saturating_sub(empty.subtitle.chars().count()) / 2;
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(sub_padding));
    out.push_str(&empty.subtitle);
    out.push_str(Theme::reset());
    out.push('\n');
}
