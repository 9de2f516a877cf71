//! Application layer coordinating state, commands, and actions.
//!
//! This module sits between the frontend (`main.rs`) and the domain, library
//! and query layers. Frontends send [`Command`]s; the [`App`] mutates its
//! [`UiState`] and persisted collections and answers with [`Action`]s.
//!
//! # Architecture
//!
//! ```text
//! Frontend → Command → App::handle → State / Store Mutations → Actions → Effects
//!    ↑                                                             │
//!    └───────────────────── Render / Notify ───────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the handler
//! - [`handler`]: Command table and the [`App`] coordinator
//! - [`modes`]: Form mode and notification levels
//! - [`state`]: Transient UI state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{App, Command};
pub use modes::{FormMode, NotifyLevel};
pub use state::UiState;
