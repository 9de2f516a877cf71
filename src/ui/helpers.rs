//! Shared rendering utilities.
//!
//! Low-level helpers used by several components: search match ranges,
//! highlighted text, and width-aware truncation. All indices are char
//! indices, never byte offsets, so multi-byte text renders correctly.
//!
//! # Example
//!
//! ```rust
//! use sref_studio::ui::helpers::highlight_ranges;
//!
//! assert_eq!(highlight_ranges("--sref 4242", "42"), vec![(7, 9), (9, 11)]);
//! ```

use crate::ui::theme::Theme;

/// Char ranges of every non-overlapping case-insensitive occurrence of
/// `needle` in `text`. `needle` must already be lowercase.
#[must_use]
pub fn highlight_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let haystack: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
    if haystack.len() != text.chars().count() {
        // Lowercasing changed the length; positions would not line up.
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

/// Appends `text` to `out` with the given ranges highlighted.
///
/// `restore` is the escape sequence re-applied after each highlight so the
/// surrounding style continues.
pub fn push_highlighted(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current = 0;

    for &(start, end) in ranges {
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        if start > current {
            out.extend(&chars[current..start]);
        }

        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current = end;
    }

    if current < chars.len() {
        out.extend(&chars[current..]);
    }
}

/// Truncates to `width` chars, ending with `...` when shortened.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// A horizontal rule of `cols` box-drawing characters.
#[must_use]
pub fn rule(theme: &Theme, cols: usize) -> String {
    format!("{}{}{}", Theme::fg(&theme.colors.border), "─".repeat(cols), Theme::reset())
}
