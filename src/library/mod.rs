//! Persisted collections.
//!
//! Each collection owns one backend handle and one storage key, keeps the
//! authoritative copy in memory, and writes its full snapshot back after
//! every mutation.
//!
//! # Modules
//!
//! - `store`: [`RecordStore`], the style library
//! - `history`: [`PromptHistory`], the last ten generated prompts
//! - `preferences`: [`Preferences`], theme and layout tokens

pub mod history;
pub mod preferences;
pub mod store;

pub use history::PromptHistory;
pub use preferences::Preferences;
pub use store::RecordStore;
