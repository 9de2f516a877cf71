//! sref-studio: a prompt builder and style-reference library for image
//! generation prompts.
//!
//! sref-studio provides:
//! - Deterministic prompt assembly from base prompt, extras, camera movement,
//!   style reference, aspect ratio and raw parameters
//! - Built-in presets and a bounded history of saved prompts
//! - A persisted library of `--sref` style codes with categories, tags,
//!   favorites, search, sorting, import and export
//! - Theme and layout preferences, persisted across runs

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI frontend (main.rs)                             │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Command table
//! │  - Command handling                                 │  ← UI state
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Library Layer │   │ Query Layer   │
//! │ (ui/)         │   │ (library/)    │   │ (query/)      │
//! │ - Rendering   │   │ - Styles      │   │ - Filter      │
//! │ - Theming     │   │ - History     │   │ - Sort        │
//! │ - Components  │   │ - Preferences │   │ - Stats       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage Layer (storage/)                           │
//! │  - Key-value backend trait, JSON files, memory      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory (infrastructure/)                 │
//! │  - Prompt grammar, presets, records (domain/)       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Configuration comes from a TOML file or a string map:
//!
//! ```toml
//! data_dir = "~/.local/share/sref-studio"
//! trace_level = "debug"
//! log_file = true
//! seed_samples = true
//!
//! [features]
//! dropdown_merge = true
//! history_list = true
//! layout_toggle = true
//! ```
//!
//! # Examples
//!
//! ```rust
//! use sref_studio::{App, Command, FeatureFlags};
//! use sref_studio::storage::MemoryStore;
//!
//! let mut app = App::new(MemoryStore::new(), FeatureFlags::default());
//!
//! for (name, arg) in [("set-field", Some("base-prompt=a cat")), ("set-field", Some("style-ref=123"))] {
//!     app.dispatch(&Command::from_action(name, arg)?);
//! }
//! app.dispatch(&Command::Generate);
//!
//! assert_eq!(app.state().output.as_deref(), Some("a cat --sref 123 --ar 9:16"));
//! # Ok::<(), sref_studio::StudioError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod library;
pub mod query;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{Action, App, Command, NotifyLevel, UiState};
pub use domain::{Result, StudioError};
pub use ui::Theme;

use crate::domain::preferences::ThemeMode;
use crate::storage::{FileStore, KeyValueStore, STYLE_LIBRARY_KEY};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Optional behaviors that differ between builds of the original tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Picking a style from the library merges it into the style-ref field
    /// instead of replacing it.
    pub dropdown_merge: bool,

    /// Saved prompts can be listed and deleted.
    pub history_list: bool,

    /// The card layout can be changed.
    pub layout_toggle: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            dropdown_merge: true,
            history_list: true,
            layout_toggle: true,
        }
    }
}

/// Application configuration.
///
/// # Example
///
/// ```toml
/// data_dir = "~/styles"
/// trace_level = "debug"
/// theme_file = "~/.config/sref-studio/theme.toml"
///
/// [features]
/// layout_toggle = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the JSON files. Tilde-expanded.
    ///
    /// Default: see [`infrastructure::get_data_dir`].
    pub data_dir: Option<String>,

    /// Tracing level. `RUST_LOG` takes precedence.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"warn"`
    pub trace_level: Option<String>,

    /// Write logs to a rotating file in the data directory instead of stderr.
    pub log_file: bool,

    /// Seed the sample styles into a library that has never been saved.
    pub seed_samples: bool,

    pub features: FeatureFlags,

    /// Path to a custom TOML palette. Overrides the theme preference.
    pub theme_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            trace_level: None,
            log_file: false,
            seed_samples: true,
            features: FeatureFlags::default(),
            theme_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - Values are trimmed; empty values count as absent
    /// - `log_file`, `seed_samples`, `dropdown_merge`, `history_list`,
    ///   `layout_toggle`: `true/false`, `yes/no`, `on/off`, `1/0`; anything
    ///   else keeps the default
    /// - `data_dir`, `trace_level`, `theme_file`: taken verbatim
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use sref_studio::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("seed_samples".to_string(), "no".to_string());
    /// map.insert("layout_toggle".to_string(), "off".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert!(!config.seed_samples);
    /// assert!(!config.features.layout_toggle);
    /// assert!(config.features.history_list);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        config.apply_map(map);
        config
    }

    /// Overrides only the keys present in `map`, with the same rules as
    /// [`Config::from_map`]. Unknown keys are logged and ignored.
    pub fn apply_map(&mut self, map: &BTreeMap<String, String>) {
        for (key, value) in map {
            let text = Some(value.trim().to_string()).filter(|s| !s.is_empty());
            let flag = parse_bool(value);
            match key.as_str() {
                "data_dir" => self.data_dir = text.or_else(|| self.data_dir.take()),
                "trace_level" => self.trace_level = text.or_else(|| self.trace_level.take()),
                "theme_file" => self.theme_file = text.or_else(|| self.theme_file.take()),
                "log_file" => self.log_file = flag.unwrap_or(self.log_file),
                "seed_samples" => self.seed_samples = flag.unwrap_or(self.seed_samples),
                "dropdown_merge" => self.features.dropdown_merge = flag.unwrap_or(self.features.dropdown_merge),
                "history_list" => self.features.history_list = flag.unwrap_or(self.features.history_list),
                "layout_toggle" => self.features.layout_toggle = flag.unwrap_or(self.features.layout_toggle),
                _ => tracing::warn!(key = %key, "unknown config key ignored"),
            }
        }
    }

    /// Reads configuration from a TOML file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StudioError::Config(format!("cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| StudioError::Config(format!("invalid config {}: {e}", path.display())))
    }

    /// Data directory with `~` expanded, or the platform default.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(infrastructure::get_data_dir, |dir| PathBuf::from(infrastructure::expand_tilde(dir)))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Opens the file store and loads the application.
///
/// Seeds the sample styles when `seed_samples` is set and no library has
/// ever been saved in the data directory.
///
/// # Errors
///
/// Returns [`StudioError::StorageUnavailable`] if the data directory cannot be
/// created.
///
/// # Example
///
/// ```rust
/// use sref_studio::{initialize, Config};
///
/// let dir = tempfile::tempdir()?;
/// let config = Config {
///     data_dir: Some(dir.path().display().to_string()),
///     ..Default::default()
/// };
///
/// let app = initialize(&config)?;
/// assert_eq!(app.library().len(), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn initialize(config: &Config) -> Result<App<FileStore>> {
    let data_dir = config.resolved_data_dir();
    tracing::debug!(data_dir = %data_dir.display(), features = ?config.features, "initializing sref-studio");

    let store = FileStore::new(data_dir)?;
    let first_start = matches!(store.get(STYLE_LIBRARY_KEY), Ok(None));

    let mut app = App::new(store, config.features);

    if config.seed_samples && first_start && app.library_mut().seed_samples() {
        tracing::info!("seeded sample styles");
    }

    Ok(app)
}

/// Resolves the palette: `theme_file` if it loads, else the built-in palette
/// for `mode`.
#[must_use]
pub fn load_theme(config: &Config, mode: ThemeMode) -> Theme {
    config.theme_file.as_ref().map_or_else(
        || Theme::for_mode(mode),
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using built-in");
                Theme::for_mode(mode)
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn map_values_are_trimmed_with_fallbacks() {
        let map: BTreeMap<String, String> = [
            ("data_dir", "  /tmp/styles "),
            ("trace_level", "   "),
            ("log_file", "maybe"),
            ("dropdown_merge", "0"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);

        assert_eq!(config.data_dir.as_deref(), Some("/tmp/styles"));
        assert_eq!(config.trace_level, None);
        assert!(!config.log_file);
        assert!(!config.features.dropdown_merge);
        assert!(config.seed_samples);
    }

    #[test]
    fn apply_map_overrides_only_present_keys() {
        let mut config = Config {
            data_dir: Some("/srv/styles".to_string()),
            seed_samples: false,
            ..Config::default()
        };
        let map: BTreeMap<String, String> = [("history_list", "off"), ("data_dir", " ")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        config.apply_map(&map);

        assert_eq!(config.data_dir.as_deref(), Some("/srv/styles"));
        assert!(!config.seed_samples);
        assert!(!config.features.history_list);
    }

    #[test]
    fn toml_file_overrides_only_given_keys() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "trace_level = \"debug\"\n[features]\nhistory_list = false\n").unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert!(!config.features.history_list);
        assert!(config.features.dropdown_merge);
        assert!(config.seed_samples);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "seed_samples = \"lots\"").unwrap();

        assert!(matches!(Config::from_file(&path), Err(StudioError::Config(_))));
    }

    #[test]
    fn samples_seed_only_on_first_start() {
        let temp = tempdir().unwrap();
        let config = Config {
            data_dir: Some(temp.path().display().to_string()),
            ..Config::default()
        };

        let mut app = initialize(&config).unwrap();
        for id in app.library().records().iter().map(|r| r.id.clone()).collect::<Vec<_>>() {
            app.dispatch(&Command::Delete(id));
        }

        let restarted = initialize(&config).unwrap();
        assert!(restarted.library().is_empty());
    }

    #[test]
    fn missing_theme_file_falls_back() {
        let config = Config {
            theme_file: Some("/definitely/not/here.toml".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config, ThemeMode::Dark).name, "dark");
    }
}
