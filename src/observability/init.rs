//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the log inside the data directory.
pub const LOG_FILE_NAME: &str = "sref-studio.log";

/// Initializes the global tracing subscriber.
///
/// Sets up a `tracing-subscriber` registry with:
/// 1. An `EnvFilter`: `RUST_LOG` if set, else `config.trace_level`, else `warn`
/// 2. A `fmt` layer writing to `<data_dir>/sref-studio.log` (rotating) when
///    `config.log_file` is set, or to stderr otherwise
///
/// # Initialization Behavior
///
/// - Falls back to stderr if the data directory cannot be created
/// - Idempotent: safe to call multiple times (only first call takes effect)
///
/// # Example
///
/// ```rust
/// use sref_studio::observability::init_tracing;
/// use sref_studio::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.clone().unwrap_or_else(|| "warn".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_writer = config.log_file.then(|| config.resolved_data_dir()).and_then(|dir| {
        std::fs::create_dir_all(&dir)
            .map(|()| FileWriter::new(dir.join(LOG_FILE_NAME)))
            .ok()
    });

    let file_layer = file_writer.clone().map(|writer| {
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(move || writer.clone())
    });

    let stderr_layer = file_writer
        .is_none()
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}
