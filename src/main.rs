//! Command-line frontend.
//!
//! Every subcommand is translated into one or more [`Command`]s from the
//! library's command table and run through [`App::dispatch`]. The resulting
//! [`Action`]s are performed here:
//!
//! - `Notify` → styled line on stderr (error notifications set a failing exit code)
//! - `CopyToClipboard` → the text on stdout
//! - `Download` → file written to `--out` or the current directory
//! - `Render` → ignored; each subcommand prints its view once at the end
//!
//! # Examples
//!
//! ```text
//! sref-studio generate "a cat" --sref 123 --ar "--ar 16:9" --save
//! sref-studio preset cinematic
//! sref-studio style add 2720573889 --category cinematic --tags "moody, film"
//! sref-studio style list --search film --sort name
//! sref-studio export --out ~/backups
//! sref-studio --set dropdown_merge=off generate "a cat" --use-style 1
//! sref-studio theme cycle
//! ```

#![allow(clippy::multiple_crate_versions)]

use clap::{Args, Parser, Subcommand};
use sref_studio::app::{Action, App, Command, NotifyLevel};
use sref_studio::domain::{Category, StyleInput, PRESETS};
use sref_studio::observability::init_tracing;
use sref_studio::storage::KeyValueStore;
use sref_studio::ui::{render_history, render_library, render_notification, render_prompt, render_style_detail};
use sref_studio::{initialize, load_theme, Config, Result, StudioError, Theme};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_COLUMNS: usize = 100;

/// Build image-generation prompts and keep a library of `--sref` styles.
#[derive(Parser, Debug)]
#[command(name = "sref-studio")]
#[command(about = "Build image-generation prompts and manage a library of --sref styles")]
#[command(version)]
struct Cli {
    /// Override the data directory for this invocation
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<String>,

    /// Read configuration from a TOML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tracing level (trace, debug, info, warn, error)
    #[arg(long = "trace-level", global = true)]
    trace_level: Option<String>,

    /// Write logs to a rotating file in the data directory
    #[arg(long = "log-file", global = true)]
    log_file: bool,

    /// Override a config key, e.g. `--set layout_toggle=off` (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    set: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a prompt from fields and/or a preset
    Generate(GenerateArgs),

    /// List presets, or show the prompt a preset produces
    Preset {
        /// Preset name
        name: Option<String>,
    },

    /// List or delete saved prompts
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Manage the style library
    Style {
        #[command(subcommand)]
        action: StyleAction,
    },

    /// Replace the library with an exported JSON document
    Import {
        file: PathBuf,
    },

    /// Write the library to sref-library-<ms>.json
    Export {
        /// Target directory or file path
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show or cycle the theme (light, dark, auto)
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Show or set the card layout (landscape, square, portrait)
    Layout {
        mode: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Base prompt
    prompt: Option<String>,

    /// Merge a suggestion into the base prompt (repeatable)
    #[arg(long = "append-base", value_name = "TEXT")]
    append_base: Vec<String>,

    /// Start from a preset; explicit fields override it
    #[arg(long)]
    preset: Option<String>,

    /// Additional prompt text
    #[arg(long)]
    additional: Option<String>,

    /// Camera movement
    #[arg(long)]
    camera: Option<String>,

    /// Style reference, with or without the --sref prefix
    #[arg(long, allow_hyphen_values = true)]
    sref: Option<String>,

    /// Merge the sref code of a library style (repeatable)
    #[arg(long = "use-style", value_name = "ID")]
    use_style: Vec<String>,

    /// Aspect ratio, e.g. "--ar 16:9"
    #[arg(long, allow_hyphen_values = true)]
    ar: Option<String>,

    /// Raw trailing parameters, e.g. "--v 6"
    #[arg(long, allow_hyphen_values = true)]
    params: Option<String>,

    /// Save the result to the history
    #[arg(long)]
    save: bool,

    /// Copy the result
    #[arg(long)]
    copy: bool,

    /// Print the live preview instead of the bare prompt
    #[arg(long)]
    preview: bool,
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    List,
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum StyleAction {
    /// Add a style
    Add {
        #[arg(allow_hyphen_values = true)]
        sref: String,
        #[command(flatten)]
        fields: StyleFields,
        /// Mark as favorite
        #[arg(long)]
        favorite: bool,
    },
    /// Edit a style; omitted fields keep their value
    Edit {
        id: String,
        #[arg(long, allow_hyphen_values = true)]
        sref: Option<String>,
        #[command(flatten)]
        fields: StyleFields,
    },
    Delete {
        id: String,
    },
    /// Toggle the favorite flag
    Fav {
        id: String,
    },
    /// Print a style's sref code
    Copy {
        id: String,
    },
    List {
        /// all, favorites or a category
        #[arg(long)]
        filter: Option<String>,
        /// recent, name, category or favorites
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Only favorites, combined with --filter
        #[arg(long)]
        favorites: bool,
    },
    Show {
        id: String,
    },
    /// Delete every style; samples return on the next start when seeding is on
    Reset,
}

#[derive(Args, Debug, Default)]
struct StyleFields {
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,
    /// Image data URI
    #[arg(long)]
    image: Option<String>,
}

impl StyleFields {
    fn apply(self, mut input: StyleInput) -> Result<StyleInput> {
        if let Some(category) = self.category {
            input.category = category.parse::<Category>()?;
        }
        if let Some(description) = self.description {
            input.description = description;
        }
        if let Some(tags) = self.tags {
            input = input.with_tags(&tags);
        }
        if let Some(image) = self.image {
            input = input.with_image(image);
        }
        Ok(input)
    }
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Cycle,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sref-studio: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    match run(cli.command, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "command aborted");
            eprintln!("sref-studio: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Config file (or defaults), then `--set` pairs, then the dedicated flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut overrides = BTreeMap::new();
    for pair in &cli.set {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| StudioError::Config(format!("expected KEY=VALUE, got '{pair}'")))?;
        overrides.insert(key.trim().to_string(), value.to_string());
    }
    if let Some(dir) = &cli.data_dir {
        overrides.insert("data_dir".to_string(), dir.clone());
    }
    if let Some(level) = &cli.trace_level {
        overrides.insert("trace_level".to_string(), level.clone());
    }
    if cli.log_file {
        overrides.insert("log_file".to_string(), "true".to_string());
    }

    match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_map(&overrides);
            Ok(config)
        }
        None => Ok(Config::from_map(&overrides)),
    }
}

fn run(command: Commands, config: &Config) -> Result<bool> {
    let app = initialize(config)?;
    let theme = load_theme(config, app.state().theme);
    let mut frontend = Frontend::new(app, theme);

    match command {
        Commands::Generate(args) => frontend.generate(args)?,
        Commands::Preset { name } => frontend.preset(name.as_deref())?,
        Commands::History { action } => frontend.history(action.unwrap_or(HistoryAction::List))?,
        Commands::Style { action } => frontend.style(action)?,
        Commands::Import { file } => {
            let blob = std::fs::read(&file)?;
            frontend.run_all([Command::Import(blob)])?;
        }
        Commands::Export { out } => {
            frontend.out = out;
            frontend.run_all([Command::Export])?;
        }
        Commands::Theme { action } => {
            if matches!(action, Some(ThemeAction::Cycle)) {
                frontend.run_all([Command::CycleTheme])?;
                frontend.theme = load_theme(config, frontend.app.state().theme);
            }
            println!("{}", frontend.app.state().theme);
        }
        Commands::Layout { mode } => {
            if let Some(mode) = mode {
                let command = Command::from_action("set-layout", Some(&mode))?;
                frontend.run_all([command])?;
            }
            println!("{}", frontend.app.state().layout);
        }
    }

    Ok(!frontend.failed)
}

/// Owns the app for one invocation and performs its actions.
struct Frontend<S: KeyValueStore + Clone> {
    app: App<S>,
    theme: Theme,
    cols: usize,
    /// Export target.
    out: Option<PathBuf>,
    failed: bool,
}

impl<S: KeyValueStore + Clone> Frontend<S> {
    fn new(app: App<S>, theme: Theme) -> Self {
        let cols = std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(DEFAULT_COLUMNS);

        Self {
            app,
            theme,
            cols,
            out: None,
            failed: false,
        }
    }

    /// Dispatches commands in order, stopping at the first error notification.
    fn run_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Result<()> {
        for command in commands {
            let actions = self.app.dispatch(&command);
            self.perform(actions)?;
            if self.failed {
                break;
            }
        }
        Ok(())
    }

    fn perform(&mut self, actions: Vec<Action>) -> Result<()> {
        for action in actions {
            match action {
                Action::Notify { level, message } => {
                    self.failed |= level.is_error();
                    eprintln!("{}", render_notification(level, &message, &self.theme));
                }
                Action::CopyToClipboard(text) => println!("{text}"),
                Action::Download { file_name, contents } => {
                    let path = download_path(self.out.as_deref(), &file_name);
                    std::fs::write(&path, contents)?;
                    tracing::info!(path = %path.display(), "export written");
                    println!("{}", path.display());
                }
                Action::Render => {}
            }
        }
        Ok(())
    }

    fn generate(&mut self, args: GenerateArgs) -> Result<()> {
        let mut commands = Vec::new();

        if let Some(preset) = args.preset {
            commands.push(Command::LoadPreset(preset));
        }
        for (name, value) in [
            ("base-prompt", args.prompt),
            ("additional-prompt", args.additional),
            ("camera-movement", args.camera),
            ("style-ref", args.sref),
            ("aspect-ratio", args.ar),
            ("additional-params", args.params),
        ] {
            if let Some(value) = value {
                commands.push(Command::from_action("set-field", Some(&format!("{name}={value}")))?);
            }
        }
        commands.extend(args.append_base.into_iter().map(Command::SelectBasePrompt));
        for id in args.use_style {
            let record = self
                .app
                .library()
                .get(&id)
                .ok_or_else(|| StudioError::NotFound(format!("style '{id}'")))?;
            commands.push(Command::SelectStyleRef(record.sref_code.clone()));
        }
        commands.push(Command::Generate);
        if args.save {
            commands.push(Command::Save);
        }
        if args.copy {
            commands.push(Command::Copy);
        }

        self.run_all(commands)?;
        if self.failed {
            return Ok(());
        }

        if args.preview {
            print!("{}", render_prompt(&self.app.state().compute_prompt_view(), &self.theme));
        } else if !args.copy {
            if let Some(output) = &self.app.state().output {
                println!("{output}");
            }
        }
        Ok(())
    }

    fn preset(&mut self, name: Option<&str>) -> Result<()> {
        let Some(name) = name else {
            for preset in PRESETS {
                println!(
                    "{}{:<10}{} {}",
                    Theme::bold(),
                    preset.name,
                    Theme::reset(),
                    preset.base_prompt
                );
            }
            return Ok(());
        };

        self.run_all([Command::LoadPreset(name.to_string()), Command::Generate])?;
        if !self.failed {
            print!("{}", render_prompt(&self.app.state().compute_prompt_view(), &self.theme));
        }
        Ok(())
    }

    fn history(&mut self, action: HistoryAction) -> Result<()> {
        match action {
            HistoryAction::List => {
                if !self.app.features().history_list {
                    self.perform(vec![Action::notify(NotifyLevel::Error, "history list is disabled")])?;
                    return Ok(());
                }
                let vm = self.app.state().compute_history_view(self.app.history().entries());
                print!("{}", render_history(&vm, &self.theme, self.cols));
            }
            HistoryAction::Delete { id } => {
                let command = Command::from_action("delete-history", Some(&id))?;
                self.run_all([command])?;
            }
        }
        Ok(())
    }

    fn style(&mut self, action: StyleAction) -> Result<()> {
        match action {
            StyleAction::Add { sref, fields, favorite } => {
                let mut input = fields.apply(StyleInput::new(sref))?;
                if favorite {
                    input = input.with_favorite(true);
                }
                self.run_all([Command::NewStyle, Command::SaveStyle(input)])?;
            }
            StyleAction::Edit { id, sref, fields } => {
                self.run_all([Command::OpenEdit(id)])?;
                if let Some(form) = self.app.state().form.clone() {
                    let mut input = fields.apply(form)?;
                    if let Some(sref) = sref {
                        input.sref_code = sref;
                    }
                    self.run_all([Command::SaveStyle(input)])?;
                }
            }
            StyleAction::Delete { id } => self.run_all([Command::Delete(id)])?,
            StyleAction::Fav { id } => self.run_all([Command::ToggleFavorite(id)])?,
            StyleAction::Copy { id } => self.run_all([Command::CopySref(id)])?,
            StyleAction::Reset => self.run_all([Command::ResetLibrary])?,
            StyleAction::List {
                filter,
                sort,
                search,
                favorites,
            } => {
                let mut commands = vec![
                    Command::from_action("set-filter", filter.as_deref())?,
                    Command::from_action("set-sort", sort.as_deref())?,
                    Command::SetFavoritesOnly(favorites),
                ];
                if let Some(search) = search {
                    commands.push(Command::SetSearch(search));
                }
                self.run_all(commands)?;
                print!("{}", self.library_screen());
            }
            StyleAction::Show { id } => {
                let vm = self
                    .app
                    .state()
                    .compute_library_view(self.app.library().records(), now_ms());
                let card = vm
                    .cards
                    .iter()
                    .find(|card| card.id == id)
                    .ok_or_else(|| StudioError::NotFound(format!("style '{id}'")))?;
                print!("{}", render_style_detail(card, &self.theme));
            }
        }
        Ok(())
    }

    fn library_screen(&self) -> String {
        let vm = self
            .app
            .state()
            .compute_library_view(self.app.library().records(), now_ms());
        render_library(&vm, &self.theme, self.cols)
    }
}

fn download_path(out: Option<&Path>, file_name: &str) -> PathBuf {
    match out {
        Some(out) if out.is_dir() => out.join(file_name),
        Some(out) => out.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use sref_studio::storage::MemoryStore;
    use sref_studio::FeatureFlags;
    use tempfile::tempdir;

    fn frontend() -> Frontend<MemoryStore> {
        Frontend::new(App::new(MemoryStore::new(), FeatureFlags::default()), Theme::default())
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_args_override_config() {
        let cli = Cli::parse_from([
            "sref-studio",
            "--data-dir",
            "/tmp/styles",
            "--trace-level",
            "debug",
            "style",
            "list",
        ]);
        let config = load_config(&cli).unwrap();

        assert_eq!(config.data_dir.as_deref(), Some("/tmp/styles"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert!(config.seed_samples);
    }

    #[test]
    fn set_pairs_reach_config_and_flags_win() {
        let cli = Cli::parse_from([
            "sref-studio",
            "--set",
            "history_list=off",
            "--set",
            "data_dir=/srv/a",
            "--data-dir",
            "/srv/b",
            "theme",
        ]);
        let config = load_config(&cli).unwrap();

        assert!(!config.features.history_list);
        assert_eq!(config.data_dir.as_deref(), Some("/srv/b"));

        let bad = Cli::parse_from(["sref-studio", "--set", "history_list", "theme"]);
        assert!(matches!(load_config(&bad), Err(StudioError::Config(_))));
    }

    #[test]
    fn generate_args_accept_flag_like_values() {
        let cli = Cli::parse_from(["sref-studio", "generate", "a cat", "--ar", "--ar 16:9", "--params", "--v 6"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.ar.as_deref(), Some("--ar 16:9"));
        assert_eq!(args.params.as_deref(), Some("--v 6"));
    }

    #[test]
    fn generate_and_save() {
        let mut frontend = frontend();
        frontend
            .generate(GenerateArgs {
                prompt: Some("a cat".to_string()),
                sref: Some("123".to_string()),
                save: true,
                ..GenerateArgs::default()
            })
            .unwrap();

        assert!(!frontend.failed);
        assert_eq!(frontend.app.state().output.as_deref(), Some("a cat --sref 123 --ar 9:16"));
        assert_eq!(frontend.app.history().entries().len(), 1);
    }

    #[test]
    fn append_base_merges_after_prompt() {
        let mut frontend = frontend();
        frontend
            .generate(GenerateArgs {
                prompt: Some("a lighthouse".to_string()),
                append_base: vec!["stormy sea".to_string()],
                ..GenerateArgs::default()
            })
            .unwrap();

        assert_eq!(
            frontend.app.state().output.as_deref(),
            Some("a lighthouse, stormy sea --ar 9:16")
        );
    }

    #[test]
    fn failed_generate_stops_before_save() {
        let mut frontend = frontend();
        frontend
            .generate(GenerateArgs {
                save: true,
                ..GenerateArgs::default()
            })
            .unwrap();

        assert!(frontend.failed);
        assert!(frontend.app.history().entries().is_empty());
    }

    #[test]
    fn style_add_then_edit_keeps_untouched_fields() {
        let mut frontend = frontend();
        frontend
            .style(StyleAction::Add {
                sref: "42".to_string(),
                fields: StyleFields {
                    category: Some("anime".to_string()),
                    description: Some("cel shading".to_string()),
                    ..StyleFields::default()
                },
                favorite: true,
            })
            .unwrap();
        let id = frontend.app.library().records()[0].id.clone();

        frontend
            .style(StyleAction::Edit {
                id: id.clone(),
                sref: None,
                fields: StyleFields {
                    tags: Some("flat, bold".to_string()),
                    ..StyleFields::default()
                },
            })
            .unwrap();

        let record = frontend.app.library().get(&id).unwrap();
        assert_eq!(record.sref_code, "--sref 42");
        assert_eq!(record.category, Category::Anime);
        assert_eq!(record.description, "cel shading");
        assert_eq!(record.tags, vec!["flat", "bold"]);
        assert!(record.favorite);
    }

    #[test]
    fn unknown_category_is_rejected_before_dispatch() {
        let mut frontend = frontend();
        let result = frontend.style(StyleAction::Add {
            sref: "42".to_string(),
            fields: StyleFields {
                category: Some("baroque-ish".to_string()),
                ..StyleFields::default()
            },
            favorite: false,
        });

        assert!(result.is_err());
        assert!(frontend.app.library().is_empty());
    }

    #[test]
    fn export_writes_into_directory() {
        let temp = tempdir().unwrap();
        let mut frontend = frontend();
        frontend.app.library_mut().seed_samples();
        frontend.out = Some(temp.path().to_path_buf());

        frontend.run_all([Command::Export]).unwrap();

        let written: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
        let name = written[0].as_ref().unwrap().file_name();
        assert!(name.to_string_lossy().starts_with("sref-library-"));
    }

    #[test]
    fn download_path_uses_file_when_not_a_directory() {
        assert_eq!(
            download_path(Some(Path::new("/nonexistent/backup.json")), "sref-library-1.json"),
            PathBuf::from("/nonexistent/backup.json")
        );
        assert_eq!(download_path(None, "sref-library-1.json"), PathBuf::from("sref-library-1.json"));
    }
}
