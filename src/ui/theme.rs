//! Theme management and ANSI escape sequence generation.
//!
//! Two palettes ship with the binary, `light` and `dark`, both defined as
//! TOML. A custom palette can be loaded from a TOML file in the same format.
//! [`ThemeMode::Auto`] resolves to one of the built-ins using the terminal's
//! `COLORFGBG` hint.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#f5f5f7"
//! text_normal = "#f5f5f7"
//! text_dim = "#8e8e93"
//! border = "#3a3a3c"
//! accent = "#0a84ff"
//! favorite_fg = "#ffd60a"
//! match_highlight_fg = "#1c1c1e"
//! match_highlight_bg = "#ffd60a"
//! empty_state_fg = "#64d2ff"
//! success_fg = "#30d158"
//! error_fg = "#ff453a"
//! info_fg = "#64d2ff"
//! ```
//!
//! # Example
//!
//! ```rust
//! use sref_studio::ui::theme::Theme;
//!
//! let theme = Theme::from_name("dark").unwrap();
//! let line = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(line.starts_with("\u{1b}[1m"));
//! assert_eq!(theme.name, "dark");
//! ```

use crate::domain::error::{Result, StudioError};
use crate::domain::preferences::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme for terminal rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex color for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text: dates, tags, hints.
    pub text_dim: String,
    pub border: String,

    /// Sref codes, active filter badge and preview blocks.
    pub accent: String,
    pub favorite_fg: String,

    /// Search match highlight.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    pub success_fg: String,
    pub error_fg: String,
    pub info_fg: String,
}

impl Theme {
    /// Loads a built-in palette: `light` or `dark`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "light" => include_str!("../../themes/light.toml"),
            "dark" => include_str!("../../themes/dark.toml"),
            _ => return None,
        };

        toml::from_str(toml_str)
            .map_err(|e| tracing::warn!(theme = name, error = %e, "built-in theme failed to parse"))
            .ok()
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| StudioError::Config(format!("failed to read theme file {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| StudioError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// Built-in palette for a theme preference.
    #[must_use]
    pub fn for_mode(mode: ThemeMode) -> Self {
        let name = if mode.is_dark(terminal_prefers_dark()) {
            "dark"
        } else {
            "light"
        };
        Self::from_name(name).unwrap_or_else(Self::monochrome)
    }

    /// Palette that uses the terminal's own colors, with bold and dim only.
    fn monochrome() -> Self {
        let none = String::new();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: none.clone(),
                header_bg: None,
                text_normal: none.clone(),
                text_dim: none.clone(),
                border: none.clone(),
                accent: none.clone(),
                favorite_fg: none.clone(),
                match_highlight_fg: none.clone(),
                match_highlight_bg: none.clone(),
                empty_state_fg: none.clone(),
                success_fg: none.clone(),
                error_fg: none.clone(),
                info_fg: none,
            },
        }
    }

    fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some((r, g, b))
    }

    /// 24-bit foreground escape for a hex color. Empty for invalid colors.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |(r, g, b)| format!("\u{001b}[38;2;{r};{g};{b}m"))
    }

    /// 24-bit background escape for a hex color. Empty for invalid colors.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |(r, g, b)| format!("\u{001b}[48;2;{r};{g};{b}m"))
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}

/// Reads the `COLORFGBG` hint (`"fg;bg"`) set by many terminals. Unknown
/// values are treated as dark.
fn terminal_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| value.rsplit(';').next().and_then(|bg| bg.trim().parse::<u8>().ok()))
        .map_or(true, |bg| bg < 7 || bg == 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_palettes_parse() {
        assert_eq!(Theme::from_name("light").map(|t| t.name).as_deref(), Some("light"));
        assert_eq!(Theme::from_name("dark").map(|t| t.name).as_deref(), Some("dark"));
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn explicit_modes_ignore_terminal_hint() {
        assert_eq!(Theme::for_mode(ThemeMode::Light).name, "light");
        assert_eq!(Theme::for_mode(ThemeMode::Dark).name, "dark");
    }

    #[test]
    fn invalid_hex_produces_no_escape() {
        assert_eq!(Theme::fg("#fff"), "");
        assert_eq!(Theme::fg("#zzzzzz"), "");
        assert_eq!(Theme::bg("#000000"), "\u{1b}[48;2;0;0;0m");
    }

    #[test]
    fn custom_theme_loads_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("custom.toml");
        let mut custom = Theme::from_name("dark").unwrap();
        custom.name = "custom".to_string();
        std::fs::write(&path, toml::to_string(&custom).unwrap()).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap(), custom);
        assert!(matches!(
            Theme::from_file(temp.path().join("missing.toml")),
            Err(StudioError::Config(_))
        ));
    }
}
