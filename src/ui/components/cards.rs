//! Style card grid renderer.
//!
//! Cards are boxed, fixed-width blocks laid out left to right and wrapped at
//! the terminal width. The card width comes from the layout preference.

use crate::domain::preferences::LayoutMode;
use crate::ui::helpers::{push_highlighted, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StyleCard;

/// One rendered line of a card: styled text plus its visible width.
struct CardLine {
    styled: String,
    width: usize,
}

impl CardLine {
    fn plain(text: String, color: &str) -> Self {
        let width = text.chars().count();
        Self {
            styled: format!("{}{text}{}", Theme::fg(color), Theme::reset()),
            width,
        }
    }
}

/// Appends every card as a grid that fits in `cols`.
pub fn render_cards(out: &mut String, cards: &[StyleCard], layout: LayoutMode, theme: &Theme, cols: usize) {
    let card_width = layout.card_width().min(cols.max(8));
    let inner = card_width.saturating_sub(4);
    let per_row = (cols / (card_width + 1)).max(1);

    for row in cards.chunks(per_row) {
        let boxes: Vec<Vec<String>> = row
            .iter()
            .map(|card| boxed(card_lines(card, inner, theme), inner, theme))
            .collect();

        let height = boxes.iter().map(Vec::len).max().unwrap_or(0);
        for line in 0..height {
            for (i, lines) in boxes.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                if let Some(text) = lines.get(line) {
                    out.push_str(text);
                }
            }
            out.push('\n');
        }
    }
}

/// Appends one card with every field, untruncated.
pub fn render_card_detail(out: &mut String, card: &StyleCard, theme: &Theme) {
    let label = |out: &mut String, name: &str, value: &str| {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&format!("{name:<12}"));
        out.push_str(Theme::reset());
        out.push_str(value);
        out.push('\n');
    };

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str(&card.sref_code);
    out.push_str(Theme::reset());
    if card.favorite {
        out.push_str(&format!(" {}★{}", Theme::fg(&theme.colors.favorite_fg), Theme::reset()));
    }
    out.push('\n');

    label(out, "id", &card.id);
    label(out, "category", &card.category_label);
    label(out, "description", &card.description);
    label(out, "tags", &card.tags.join(", "));
    label(out, "image", if card.has_image { "yes" } else { "no" });
}

fn card_lines(card: &StyleCard, inner: usize, theme: &Theme) -> Vec<CardLine> {
    let mut lines = Vec::with_capacity(4);

    let star = if card.favorite { "★ " } else { "" };
    let sref_room = inner.saturating_sub(star.chars().count());
    let mut sref_line = String::new();
    if card.favorite {
        sref_line.push_str(&Theme::fg(&theme.colors.favorite_fg));
        sref_line.push_str(star);
    }
    let accent = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
    sref_line.push_str(&accent);
    let sref_width = if card.sref_code.chars().count() <= sref_room {
        push_highlighted(&mut sref_line, &card.sref_code, &card.highlight_ranges, theme, &accent);
        card.sref_code.chars().count()
    } else {
        let shortened = truncate(&card.sref_code, sref_room);
        let width = shortened.chars().count();
        sref_line.push_str(&shortened);
        width
    };
    sref_line.push_str(Theme::reset());
    lines.push(CardLine {
        styled: sref_line,
        width: star.chars().count() + sref_width,
    });

    lines.push(CardLine::plain(truncate(&card.category_label, inner), &theme.colors.text_dim));

    if !card.description.is_empty() {
        lines.push(CardLine::plain(truncate(&card.description, inner), &theme.colors.text_normal));
    }

    if !card.tags.is_empty() {
        let tags = card
            .tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(CardLine::plain(truncate(&tags, inner), &theme.colors.text_dim));
    }

    lines
}

fn boxed(lines: Vec<CardLine>, inner: usize, theme: &Theme) -> Vec<String> {
    let border = Theme::fg(&theme.colors.border);
    let reset = Theme::reset();

    let mut boxed = Vec::with_capacity(lines.len() + 2);
    boxed.push(format!("{border}┌{}┐{reset}", "─".repeat(inner + 2)));
    for line in lines {
        let padding = " ".repeat(inner.saturating_sub(line.width));
        boxed.push(format!("{border}│{reset} {}{padding} {border}│{reset}", line.styled));
    }
    boxed.push(format!("{border}└{}┘{reset}", "─".repeat(inner + 2)));
    boxed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(sref: &str, favorite: bool) -> StyleCard {
        StyleCard {
            id: "x".to_string(),
            sref_code: sref.to_string(),
            category_label: "Anime".to_string(),
            description: "soft pastel".to_string(),
            tags: vec!["soft".to_string()],
            favorite,
            has_image: false,
            highlight_ranges: Vec::new(),
        }
    }

    #[test]
    fn narrow_terminal_stacks_cards() {
        let theme = Theme::from_name("dark").unwrap();
        let mut out = String::new();
        render_cards(&mut out, &[card("--sref 1", true), card("--sref 2", false)], LayoutMode::Landscape, &theme, 50);

        assert_eq!(out.matches('┌').count(), 2);
        assert_eq!(out.lines().filter(|l| l.contains('┌')).count(), 2);
        assert!(out.contains("★"));
        assert!(out.contains("#soft"));
    }

    #[test]
    fn wide_terminal_places_cards_side_by_side() {
        let theme = Theme::from_name("dark").unwrap();
        let mut out = String::new();
        render_cards(&mut out, &[card("--sref 1", false), card("--sref 2", false)], LayoutMode::Portrait, &theme, 120);

        assert_eq!(out.lines().filter(|l| l.contains('┌')).count(), 1);
    }
}
