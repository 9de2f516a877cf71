//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where persisted data and logs live.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, DATA_DIR_ENV};
