//! Structured logging through `tracing`.
//!
//! Every storage and store operation opens a `debug_span!` and logs with the
//! `tracing` macros. This module installs the subscriber that collects them.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → stderr | rotating log file
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"warn"`
//!
//! With `log_file = true` output goes to `<data_dir>/sref-studio.log`, rotated
//! at 5 MB with 3 backups.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer

pub mod file_writer;
pub mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
