//! Composable UI component renderers.
//!
//! Each component appends ANSI-styled text for one part of a screen to a
//! `String` buffer. Screens are assembled in [`crate::ui::renderer`].
//!
//! # Components
//!
//! - `header`: Title bar, stats line, filter badges and search bar
//! - `cards`: Style card grid and single-card detail
//! - `prompt`: Live preview blocks and generated output
//! - `history`: Saved prompt table
//! - `empty`: Empty state message

mod cards;
mod empty;
mod header;
mod history;
mod prompt;

pub use cards::{render_card_detail, render_cards};
pub use empty::render_empty_state;
pub use header::{render_badges, render_header, render_search_bar, render_stats};
pub use history::render_history_rows;
pub use prompt::render_prompt;
