//! Display preferences persisted as bare tokens.

use crate::domain::error::StudioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color theme selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the terminal / system preference.
    #[default]
    Auto,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    /// Next mode in the light → dark → auto cycle.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Auto,
            Self::Auto => Self::Light,
        }
    }

    /// Resolves `Auto` against whether the environment prefers dark.
    #[must_use]
    pub const fn is_dark(self, prefers_dark: bool) -> bool {
        match self {
            Self::Light => false,
            Self::Dark => true,
            Self::Auto => prefers_dark,
        }
    }
}

/// Card layout of the style library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Landscape,
    Square,
    Portrait,
}

impl LayoutMode {
    pub const ALL: [Self; 3] = [Self::Landscape, Self::Square, Self::Portrait];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Square => "square",
            Self::Portrait => "portrait",
        }
    }

    /// Card width in terminal columns for this layout.
    #[must_use]
    pub const fn card_width(self) -> usize {
        match self {
            Self::Landscape => 48,
            Self::Square => 32,
            Self::Portrait => 24,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            other => Err(StudioError::Validation(format!("unknown theme '{other}'"))),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landscape" => Ok(Self::Landscape),
            "square" => Ok(Self::Square),
            "portrait" => Ok(Self::Portrait),
            other => Err(StudioError::Validation(format!("unknown layout '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycles_through_all_modes() {
        let start = ThemeMode::Light;
        assert_eq!(start.cycle(), ThemeMode::Dark);
        assert_eq!(start.cycle().cycle(), ThemeMode::Auto);
        assert_eq!(start.cycle().cycle().cycle(), start);
    }

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!(" Dark ".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!("PORTRAIT".parse::<LayoutMode>().unwrap(), LayoutMode::Portrait);
        assert!("wide".parse::<LayoutMode>().is_err());
    }
}
