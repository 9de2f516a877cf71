//! Command handling and state transition logic.
//!
//! Every user operation is a [`Command`]. Commands are resolved by name
//! through a static table ([`Command::from_action`]) so a frontend can bind
//! buttons, key presses or CLI subcommands to the same names without any
//! global dispatch.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. A frontend resolves a [`Command`]
//! 2. [`App::handle`] pattern-matches it
//! 3. State mutations occur via `UiState` and the persisted collections
//! 4. [`Action`]s are collected and returned for execution
//!
//! [`App::dispatch`] wraps `handle` for frontends: any error becomes an
//! error notification and the app keeps running.
//!
//! # Example
//!
//! ```rust
//! use sref_studio::app::{Action, App, Command};
//! use sref_studio::storage::MemoryStore;
//! use sref_studio::FeatureFlags;
//!
//! let mut app = App::new(MemoryStore::new(), FeatureFlags::default());
//! app.dispatch(&Command::from_action("load-preset", Some("cinematic"))?);
//! let actions = app.dispatch(&Command::Generate);
//! assert!(app.state().output.is_some());
//! assert!(actions.contains(&Action::Render));
//! # Ok::<(), sref_studio::StudioError>(())
//! ```

use crate::app::modes::NotifyLevel;
use crate::app::{Action, UiState};
use crate::domain::error::{Result, StudioError};
use crate::domain::preferences::LayoutMode;
use crate::domain::prompt::{assemble, merge_base_prompt, merge_style_ref, PromptField};
use crate::domain::style::StyleInput;
use crate::library::{Preferences, PromptHistory, RecordStore};
use crate::query::{CategoryFilter, SortKey};
use crate::storage::models::export_file_name;
use crate::storage::KeyValueStore;
use crate::FeatureFlags;

/// User operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Assembles the prompt fields into the output.
    Generate,
    /// Resets every prompt field and the output.
    Clear,
    /// Saves the current output to the prompt history.
    Save,
    /// Copies the current output.
    Copy,
    LoadPreset(String),
    /// Merges a suggested base prompt into the base-prompt field.
    SelectBasePrompt(String),
    /// Merges a style reference picked from the library into the style-ref
    /// field.
    SelectStyleRef(String),
    SetField {
        field: PromptField,
        value: String,
    },

    /// Opens the style form on an existing record.
    OpenEdit(String),
    /// Opens the style form on a blank style.
    NewStyle,
    /// Commits the style form: updates the record being edited, or creates
    /// a new one.
    SaveStyle(StyleInput),
    CancelEdit,
    Delete(String),
    ToggleFavorite(String),
    CopySref(String),

    SetFilter(CategoryFilter),
    /// Restricts the library view to favorites on top of the category filter.
    SetFavoritesOnly(bool),
    SetSort(SortKey),
    SetSearch(String),

    /// Replaces the library with an export document.
    Import(Vec<u8>),
    /// Deletes every style and the stored library.
    ResetLibrary,
    Export,

    DeleteHistory(i64),
    SetLayout(LayoutMode),
    CycleTheme,
}

type CommandBuilder = fn(Option<&str>) -> Result<Command>;

/// Command names and how to build each from an optional argument.
static COMMAND_TABLE: &[(&str, CommandBuilder)] = &[
    ("generate", |_| Ok(Command::Generate)),
    ("clear", |_| Ok(Command::Clear)),
    ("save", |_| Ok(Command::Save)),
    ("copy", |_| Ok(Command::Copy)),
    ("load-preset", |arg| Ok(Command::LoadPreset(required(arg, "preset")?.to_string()))),
    ("select-base-prompt", |arg| {
        Ok(Command::SelectBasePrompt(required(arg, "base prompt")?.to_string()))
    }),
    ("select-style-ref", |arg| {
        Ok(Command::SelectStyleRef(required(arg, "style ref")?.to_string()))
    }),
    ("set-field", |arg| {
        let raw = required(arg, "field")?;
        let (name, value) = raw.split_once('=').unwrap_or((raw, ""));
        let field = PromptField::from_name(name.trim())
            .ok_or_else(|| StudioError::Validation(format!("unknown field '{}'", name.trim())))?;
        Ok(Command::SetField {
            field,
            value: value.to_string(),
        })
    }),
    ("open-edit", |arg| Ok(Command::OpenEdit(required(arg, "id")?.to_string()))),
    ("new-style", |_| Ok(Command::NewStyle)),
    ("save-style", |arg| Ok(Command::SaveStyle(StyleInput::new(required(arg, "sref")?)))),
    ("cancel-edit", |_| Ok(Command::CancelEdit)),
    ("delete", |arg| Ok(Command::Delete(required(arg, "id")?.to_string()))),
    ("toggle-favorite", |arg| Ok(Command::ToggleFavorite(required(arg, "id")?.to_string()))),
    ("copy-sref", |arg| Ok(Command::CopySref(required(arg, "id")?.to_string()))),
    ("set-filter", |arg| Ok(Command::SetFilter(arg.unwrap_or("all").parse()?))),
    ("set-favorites-only", |arg| {
        let raw = arg.unwrap_or("true").trim();
        match raw {
            "true" | "on" | "1" => Ok(Command::SetFavoritesOnly(true)),
            "false" | "off" | "0" => Ok(Command::SetFavoritesOnly(false)),
            _ => Err(StudioError::Validation(format!("expected on or off, got '{raw}'"))),
        }
    }),
    ("set-sort", |arg| Ok(Command::SetSort(arg.unwrap_or("recent").parse()?))),
    ("set-search", |arg| Ok(Command::SetSearch(arg.unwrap_or_default().to_string()))),
    ("import", |arg| Ok(Command::Import(required(arg, "document")?.as_bytes().to_vec()))),
    ("export", |_| Ok(Command::Export)),
    ("reset-library", |_| Ok(Command::ResetLibrary)),
    ("delete-history", |arg| {
        let raw = required(arg, "id")?;
        let id = raw
            .trim()
            .parse()
            .map_err(|_| StudioError::Validation(format!("invalid history id '{raw}'")))?;
        Ok(Command::DeleteHistory(id))
    }),
    ("set-layout", |arg| Ok(Command::SetLayout(required(arg, "layout")?.parse()?))),
    ("cycle-theme", |_| Ok(Command::CycleTheme)),
];

fn required<'a>(arg: Option<&'a str>, what: &'static str) -> Result<&'a str> {
    arg.filter(|value| !value.trim().is_empty())
        .ok_or(StudioError::MissingRequiredField(what))
}

impl Command {
    /// Resolves a command by its action name.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::NotFound`] for an unknown name, or the
    /// argument's parse error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sref_studio::app::Command;
    /// use sref_studio::query::SortKey;
    ///
    /// let command = Command::from_action("set-sort", Some("name"))?;
    /// assert_eq!(command, Command::SetSort(SortKey::Name));
    /// # Ok::<(), sref_studio::StudioError>(())
    /// ```
    pub fn from_action(name: &str, arg: Option<&str>) -> Result<Self> {
        let (_, build) = COMMAND_TABLE
            .iter()
            .find(|(action, _)| *action == name)
            .ok_or_else(|| StudioError::NotFound(format!("command '{name}'")))?;
        build(arg)
    }

    /// Every action name in the table.
    pub fn names() -> impl Iterator<Item = &'static str> {
        COMMAND_TABLE.iter().map(|(name, _)| *name)
    }

    /// The action name of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Clear => "clear",
            Self::Save => "save",
            Self::Copy => "copy",
            Self::LoadPreset(_) => "load-preset",
            Self::SelectBasePrompt(_) => "select-base-prompt",
            Self::SelectStyleRef(_) => "select-style-ref",
            Self::SetField { .. } => "set-field",
            Self::OpenEdit(_) => "open-edit",
            Self::NewStyle => "new-style",
            Self::SaveStyle(_) => "save-style",
            Self::CancelEdit => "cancel-edit",
            Self::Delete(_) => "delete",
            Self::ToggleFavorite(_) => "toggle-favorite",
            Self::CopySref(_) => "copy-sref",
            Self::SetFilter(_) => "set-filter",
            Self::SetFavoritesOnly(_) => "set-favorites-only",
            Self::SetSort(_) => "set-sort",
            Self::SetSearch(_) => "set-search",
            Self::Import(_) => "import",
            Self::Export => "export",
            Self::ResetLibrary => "reset-library",
            Self::DeleteHistory(_) => "delete-history",
            Self::SetLayout(_) => "set-layout",
            Self::CycleTheme => "cycle-theme",
        }
    }
}

/// The application: UI state plus the three persisted collections.
///
/// Each collection owns its own handle onto the backend.
#[derive(Debug)]
pub struct App<S: KeyValueStore + Clone> {
    state: UiState,
    library: RecordStore<S>,
    history: PromptHistory<S>,
    preferences: Preferences<S>,
    features: FeatureFlags,
}

impl<S: KeyValueStore + Clone> App<S> {
    /// Loads all collections from `backend`.
    pub fn new(backend: S, features: FeatureFlags) -> Self {
        let library = RecordStore::load(backend.clone());
        let history = PromptHistory::load(backend.clone());
        let preferences = Preferences::load(backend);

        let state = UiState {
            layout: preferences.layout(),
            theme: preferences.theme(),
            ..UiState::default()
        };

        Self {
            state,
            library,
            history,
            preferences,
            features,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &UiState {
        &self.state
    }

    #[must_use]
    pub const fn library(&self) -> &RecordStore<S> {
        &self.library
    }

    /// Mutable access for startup tasks such as seeding samples.
    pub fn library_mut(&mut self) -> &mut RecordStore<S> {
        &mut self.library
    }

    #[must_use]
    pub const fn history(&self) -> &PromptHistory<S> {
        &self.history
    }

    #[must_use]
    pub const fn preferences(&self) -> &Preferences<S> {
        &self.preferences
    }

    #[must_use]
    pub const fn features(&self) -> FeatureFlags {
        self.features
    }

    /// Runs a command and returns the actions to execute.
    ///
    /// Errors are reported to the user as an error notification instead of
    /// being returned. Use [`App::handle`] to observe them directly.
    pub fn dispatch(&mut self, command: &Command) -> Vec<Action> {
        self.handle(command).unwrap_or_else(|e| {
            tracing::warn!(command = command.name(), kind = e.kind(), error = %e, "command failed");
            vec![Action::notify(NotifyLevel::Error, e.to_string())]
        })
    }

    /// Runs a command, mutating state, and returns the actions to execute.
    ///
    /// # Errors
    ///
    /// Returns the domain error of the failed operation. State is left as it
    /// was before the command whenever the operation itself fails.
    #[allow(clippy::too_many_lines)]
    pub fn handle(&mut self, command: &Command) -> Result<Vec<Action>> {
        let _span = tracing::debug_span!("handle_command", command = command.name()).entered();

        match command {
            Command::Generate => {
                let prompt = assemble(&self.state.prompt)?;
                tracing::debug!(len = prompt.len(), "prompt generated");
                self.state.output = Some(prompt);
                Ok(vec![
                    Action::Render,
                    Action::notify(NotifyLevel::Success, "Prompt generated"),
                ])
            }
            Command::Clear => {
                self.state.prompt.clear();
                self.state.output = None;
                Ok(vec![
                    Action::Render,
                    Action::notify(NotifyLevel::Info, "All fields cleared"),
                ])
            }
            Command::Save => {
                let output = self.current_output()?.to_string();
                let entry = self.history.append(&output)?;
                tracing::debug!(id = entry.id, "prompt saved to history");
                Ok(vec![
                    Action::Render,
                    Action::notify(NotifyLevel::Success, "Prompt saved"),
                ])
            }
            Command::Copy => {
                let output = self.current_output()?.to_string();
                Ok(vec![
                    Action::CopyToClipboard(output),
                    Action::notify(NotifyLevel::Success, "Prompt copied to clipboard"),
                ])
            }
            Command::LoadPreset(name) => {
                let preset = self.state.prompt.load_preset(name)?;
                Ok(vec![
                    Action::Render,
                    Action::notify(NotifyLevel::Success, format!("{} preset loaded", preset.label)),
                ])
            }
            Command::SelectBasePrompt(chosen) => {
                let merged = if self.features.dropdown_merge {
                    merge_base_prompt(&self.state.prompt.base_prompt, chosen)
                } else {
                    chosen.clone()
                };
                self.state.prompt.set(PromptField::BasePrompt, merged);
                Ok(vec![Action::Render])
            }
            Command::SelectStyleRef(chosen) => {
                let current = &self.state.prompt.style_ref;
                let merged = if self.features.dropdown_merge {
                    merge_style_ref(current, chosen)
                } else {
                    chosen.clone()
                };
                self.state.prompt.set(PromptField::StyleRef, merged);
                Ok(vec![Action::Render])
            }
            Command::SetField { field, value } => {
                self.state.prompt.set(*field, value.clone());
                Ok(vec![Action::Render])
            }
            Command::OpenEdit(id) => {
                let record = self
                    .library
                    .get(id)
                    .ok_or_else(|| StudioError::NotFound(format!("style '{id}'")))?;
                self.state.open_edit_form(record);
                Ok(vec![Action::Render])
            }
            Command::NewStyle => {
                self.state.open_new_form();
                Ok(vec![Action::Render])
            }
            Command::SaveStyle(input) => self.save_style(input.clone()),
            Command::CancelEdit => {
                self.state.close_form();
                Ok(vec![Action::Render])
            }
            Command::Delete(id) => {
                if self.library.delete(id)? {
                    if self.state.editing_id.as_deref() == Some(id.as_str()) {
                        self.state.close_form();
                    }
                    Ok(vec![
                        Action::Render,
                        Action::notify(NotifyLevel::Success, "Style deleted"),
                    ])
                } else {
                    Ok(vec![Action::notify(NotifyLevel::Info, format!("No style with id '{id}'"))])
                }
            }
            Command::ToggleFavorite(id) => {
                let record = self.library.toggle_favorite(id)?;
                let message = if record.favorite {
                    "Added to favorites"
                } else {
                    "Removed from favorites"
                };
                Ok(vec![Action::Render, Action::notify(NotifyLevel::Success, message)])
            }
            Command::CopySref(id) => {
                let record = self
                    .library
                    .get(id)
                    .ok_or_else(|| StudioError::NotFound(format!("style '{id}'")))?;
                Ok(vec![
                    Action::CopyToClipboard(record.sref_code.clone()),
                    Action::notify(NotifyLevel::Success, format!("{} copied", record.sref_code)),
                ])
            }
            Command::SetFilter(filter) => {
                self.state.filter = *filter;
                Ok(vec![Action::Render])
            }
            Command::SetFavoritesOnly(only) => {
                self.state.favorites_only = *only;
                Ok(vec![Action::Render])
            }
            Command::SetSort(sort) => {
                self.state.sort = *sort;
                Ok(vec![Action::Render])
            }
            Command::SetSearch(term) => {
                self.state.search.clone_from(term);
                Ok(vec![Action::Render])
            }
            Command::Import(blob) => {
                let count = self.library.import_all(blob)?.len();
                Ok(vec![
                    Action::Render,
                    Action::notify(NotifyLevel::Success, format!("Imported {count} styles")),
                ])
            }
            Command::ResetLibrary => {
                let removed = self.library.reset()?;
                self.state.close_form();
                Ok(vec![
                    Action::Render,
                    Action::notify(NotifyLevel::Success, format!("Removed {removed} styles")),
                ])
            }
            Command::Export => {
                let contents = self.library.export_all()?;
                let file_name = export_file_name(chrono::Utc::now().timestamp_millis());
                Ok(vec![
                    Action::Download { file_name, contents },
                    Action::notify(NotifyLevel::Success, "Library exported"),
                ])
            }
            Command::DeleteHistory(id) => {
                self.require_feature(self.features.history_list, "history list")?;
                if self.history.delete(*id)? {
                    Ok(vec![
                        Action::Render,
                        Action::notify(NotifyLevel::Success, "Saved prompt deleted"),
                    ])
                } else {
                    Ok(vec![Action::notify(NotifyLevel::Info, format!("No saved prompt with id {id}"))])
                }
            }
            Command::SetLayout(layout) => {
                self.require_feature(self.features.layout_toggle, "layout toggle")?;
                self.state.layout = *layout;
                let written = self.preferences.set_layout(*layout);
                Ok(preference_changed(written))
            }
            Command::CycleTheme => {
                let next = self.preferences.theme().cycle();
                self.state.theme = next;
                let written = self.preferences.set_theme(next);
                Ok(preference_changed(written))
            }
        }
    }

    fn save_style(&mut self, input: StyleInput) -> Result<Vec<Action>> {
        let (record, message) = match self.state.editing_id.clone() {
            Some(id) => (self.library.update(&id, input)?, "Style updated"),
            None => (self.library.create(input)?, "Style added"),
        };
        tracing::debug!(id = %record.id, "style saved");
        self.state.close_form();
        Ok(vec![Action::Render, Action::notify(NotifyLevel::Success, message)])
    }

    fn current_output(&self) -> Result<&str> {
        self.state
            .output
            .as_deref()
            .ok_or(StudioError::MissingRequiredField("generated prompt"))
    }

    fn require_feature(&self, enabled: bool, name: &str) -> Result<()> {
        if enabled {
            Ok(())
        } else {
            tracing::debug!(feature = name, features = ?self.features, "feature disabled");
            Err(StudioError::Validation(format!("{name} is disabled")))
        }
    }
}

fn preference_changed(written: Result<()>) -> Vec<Action> {
    if let Err(e) = written {
        tracing::warn!(error = %e, "failed to persist preference, keeping it for this session");
    }
    vec![Action::Render]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preferences::ThemeMode;
    use crate::storage::MemoryStore;

    fn app() -> App<MemoryStore> {
        App::new(MemoryStore::new(), FeatureFlags::default())
    }

    fn run(app: &mut App<MemoryStore>, name: &str, arg: Option<&str>) -> Vec<Action> {
        let command = Command::from_action(name, arg).unwrap();
        app.dispatch(&command)
    }

    fn has_error(actions: &[Action]) -> bool {
        actions
            .iter()
            .any(|a| matches!(a, Action::Notify { level: NotifyLevel::Error, .. }))
    }

    #[test]
    fn every_table_name_round_trips_through_name() {
        for name in Command::names() {
            let arg = match name {
                "set-field" => Some("base-prompt=x"),
                "delete-history" => Some("1"),
                "set-layout" => Some("square"),
                "set-filter" => Some("all"),
                "set-sort" => Some("name"),
                "set-favorites-only" => Some("on"),
                _ => Some("x"),
            };
            let command = Command::from_action(name, arg).unwrap();
            assert_eq!(command.name(), name);
        }
    }

    #[test]
    fn unknown_command_and_missing_argument_fail() {
        assert!(matches!(
            Command::from_action("explode", None),
            Err(StudioError::NotFound(_))
        ));
        assert!(matches!(
            Command::from_action("load-preset", None),
            Err(StudioError::MissingRequiredField("preset"))
        ));
    }

    #[test]
    fn generate_from_fields() {
        let mut app = app();
        run(&mut app, "set-field", Some("base-prompt=a cat"));
        run(&mut app, "set-field", Some("style-ref=123"));

        run(&mut app, "generate", None);

        assert_eq!(app.state().output.as_deref(), Some("a cat --sref 123 --ar 9:16"));
    }

    #[test]
    fn generate_without_base_prompt_notifies_error() {
        let mut app = app();
        let actions = run(&mut app, "generate", None);
        assert!(has_error(&actions));
        assert!(app.state().output.is_none());
    }

    #[test]
    fn save_and_copy_require_output() {
        let mut app = app();
        assert!(has_error(&run(&mut app, "save", None)));
        assert!(has_error(&run(&mut app, "copy", None)));
        assert!(app.history().entries().is_empty());

        run(&mut app, "load-preset", Some("portrait"));
        run(&mut app, "generate", None);
        run(&mut app, "save", None);
        let actions = run(&mut app, "copy", None);

        let output = app.state().output.clone().unwrap();
        assert_eq!(app.history().entries()[0].text, output);
        assert!(actions.contains(&Action::CopyToClipboard(output)));
    }

    #[test]
    fn select_style_ref_merges_or_replaces_by_feature() {
        let mut merging = app();
        run(&mut merging, "select-style-ref", Some("--sref 1"));
        run(&mut merging, "select-style-ref", Some("--sref 2"));
        assert_eq!(merging.state().prompt.style_ref, "--sref 1, 2");

        let mut replacing = App::new(
            MemoryStore::new(),
            FeatureFlags {
                dropdown_merge: false,
                ..FeatureFlags::default()
            },
        );
        run(&mut replacing, "select-style-ref", Some("--sref 1"));
        run(&mut replacing, "select-style-ref", Some("--sref 2"));
        assert_eq!(replacing.state().prompt.style_ref, "--sref 2");
    }

    #[test]
    fn select_base_prompt_appends_then_generates() {
        let mut app = app();
        run(&mut app, "select-base-prompt", Some("misty forest"));
        run(&mut app, "select-base-prompt", Some("golden hour"));
        assert_eq!(app.state().prompt.base_prompt, "misty forest, golden hour");

        run(&mut app, "generate", None);
        assert_eq!(
            app.state().output.as_deref(),
            Some("misty forest, golden hour --ar 9:16")
        );

        let mut replacing = App::new(
            MemoryStore::new(),
            FeatureFlags {
                dropdown_merge: false,
                ..FeatureFlags::default()
            },
        );
        run(&mut replacing, "select-base-prompt", Some("misty forest"));
        run(&mut replacing, "select-base-prompt", Some("golden hour"));
        assert_eq!(replacing.state().prompt.base_prompt, "golden hour");
    }

    #[test]
    fn style_form_creates_then_edits() {
        let mut app = app();

        app.dispatch(&Command::NewStyle);
        app.dispatch(&Command::SaveStyle(StyleInput::new("777").with_description("first")));
        assert_eq!(app.library().len(), 1);
        assert!(app.state().form.is_none());

        let id = app.library().records()[0].id.clone();
        run(&mut app, "open-edit", Some(id.as_str()));
        app.dispatch(&Command::SaveStyle(StyleInput::new("888")));

        assert_eq!(app.library().len(), 1);
        assert_eq!(app.library().records()[0].sref_code, "--sref 888");
    }

    #[test]
    fn invalid_style_keeps_form_open() {
        let mut app = app();
        app.dispatch(&Command::NewStyle);

        let actions = app.dispatch(&Command::SaveStyle(StyleInput::new("")));

        assert!(has_error(&actions));
        assert!(app.state().form.is_some());
        assert!(app.library().is_empty());
    }

    #[test]
    fn export_then_import_through_commands() {
        let mut app = app();
        app.dispatch(&Command::SaveStyle(StyleInput::new("1")));
        app.dispatch(&Command::SaveStyle(StyleInput::new("2")));
        let before = app.library().records().to_vec();

        let actions = app.dispatch(&Command::Export);
        let Some(Action::Download { file_name, contents }) = actions.first().cloned() else {
            panic!("expected a download, got {actions:?}");
        };
        assert!(file_name.starts_with("sref-library-"));

        let id = before[0].id.clone();
        run(&mut app, "delete", Some(id.as_str()));
        app.dispatch(&Command::Import(contents));

        assert_eq!(app.library().records(), before.as_slice());
    }

    #[test]
    fn reset_library_clears_store_and_form() {
        let mut app = app();
        app.library_mut().seed_samples();
        let id = app.library().records()[0].id.clone();
        run(&mut app, "open-edit", Some(id.as_str()));

        let actions = run(&mut app, "reset-library", None);

        assert!(!has_error(&actions));
        assert!(app.library().is_empty());
        assert_eq!(app.state().form, None);
        assert_eq!(app.library().backend().get(crate::storage::STYLE_LIBRARY_KEY).unwrap(), None);
    }

    #[test]
    fn gated_commands_fail_when_disabled() {
        let mut app = App::new(
            MemoryStore::new(),
            FeatureFlags {
                dropdown_merge: true,
                history_list: false,
                layout_toggle: false,
            },
        );

        assert!(has_error(&run(&mut app, "delete-history", Some("1"))));
        assert!(has_error(&run(&mut app, "set-layout", Some("portrait"))));
        assert_eq!(app.state().layout, LayoutMode::Landscape);
    }

    #[test]
    fn theme_and_layout_persist_across_restart() {
        let backend = MemoryStore::new();
        let mut app = App::new(backend.clone(), FeatureFlags::default());

        run(&mut app, "cycle-theme", None);
        run(&mut app, "set-layout", Some("portrait"));

        let restarted = App::new(backend, FeatureFlags::default());
        assert_eq!(restarted.state().theme, ThemeMode::Light);
        assert_eq!(restarted.state().layout, LayoutMode::Portrait);
    }

    #[test]
    fn filter_sort_and_search_update_state() {
        let mut app = app();
        run(&mut app, "set-filter", Some("favorites"));
        run(&mut app, "set-sort", Some("category"));
        run(&mut app, "set-search", Some("noir"));
        run(&mut app, "set-favorites-only", None);

        let options = app.state().query_options();
        assert!(options.favorites_only);
        assert_eq!(options.filter, CategoryFilter::Favorites);
        assert_eq!(options.sort, SortKey::Category);
        assert_eq!(options.search, "noir");

        assert!(Command::from_action("set-favorites-only", Some("sometimes")).is_err());
    }
}
