//! Theme and layout preferences.
//!
//! Each preference lives under its own key as a bare token. Writes are
//! independent of each other and of the library. Unknown or missing tokens
//! read as the default.

use crate::domain::error::Result;
use crate::domain::preferences::{LayoutMode, ThemeMode};
use crate::storage::models::{LAYOUT_KEY, THEME_KEY};
use crate::storage::KeyValueStore;
use std::str::FromStr;

#[derive(Debug)]
pub struct Preferences<S: KeyValueStore> {
    backend: S,
    theme: ThemeMode,
    layout: LayoutMode,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn load(backend: S) -> Self {
        let theme = read_token(&backend, THEME_KEY);
        let layout = read_token(&backend, LAYOUT_KEY);
        tracing::debug!(%theme, %layout, "preferences loaded");
        Self {
            backend,
            theme,
            layout,
        }
    }

    #[must_use]
    pub const fn theme(&self) -> ThemeMode {
        self.theme
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutMode {
        self.layout
    }

    /// Sets and persists the theme.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the token cannot be written; the new
    /// theme still applies for this session.
    pub fn set_theme(&mut self, theme: ThemeMode) -> Result<()> {
        self.theme = theme;
        self.backend.set(THEME_KEY, theme.as_str())
    }

    /// Advances the theme one step and persists it.
    ///
    /// # Errors
    ///
    /// See [`Preferences::set_theme`].
    pub fn cycle_theme(&mut self) -> Result<ThemeMode> {
        let next = self.theme.cycle();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Sets and persists the card layout.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the token cannot be written; the new
    /// layout still applies for this session.
    pub fn set_layout(&mut self, layout: LayoutMode) -> Result<()> {
        self.layout = layout;
        self.backend.set(LAYOUT_KEY, layout.as_str())
    }
}

fn read_token<T, S>(backend: &S, key: &str) -> T
where
    T: FromStr + Default,
    S: KeyValueStore,
{
    match backend.get(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unknown preference token, using default");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "preference unavailable, using default");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn defaults_when_nothing_stored() {
        let prefs = Preferences::load(MemoryStore::new());
        assert_eq!(prefs.theme(), ThemeMode::Auto);
        assert_eq!(prefs.layout(), LayoutMode::Landscape);
    }

    #[test]
    fn values_persist_as_bare_tokens() {
        let backend = MemoryStore::new();
        let mut prefs = Preferences::load(backend.clone());

        assert_eq!(prefs.cycle_theme().unwrap(), ThemeMode::Light);
        prefs.set_layout(LayoutMode::Square).unwrap();

        assert_eq!(backend.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(backend.get(LAYOUT_KEY).unwrap().as_deref(), Some("square"));

        let reloaded = Preferences::load(backend);
        assert_eq!(reloaded.theme(), ThemeMode::Light);
        assert_eq!(reloaded.layout(), LayoutMode::Square);
    }

    #[test]
    fn garbage_token_reads_as_default() {
        let mut backend = MemoryStore::new();
        backend.set(THEME_KEY, "\"sepia\"").unwrap();
        assert_eq!(Preferences::load(backend).theme(), ThemeMode::Auto);
    }

    #[test]
    fn failed_write_still_applies_in_memory() {
        let mut prefs = Preferences::load(MemoryStore::unavailable());
        assert!(prefs.set_layout(LayoutMode::Portrait).is_err());
        assert_eq!(prefs.layout(), LayoutMode::Portrait);
    }
}
