//! Read-only views over the style library.
//!
//! Everything here is a pure function of a record slice and a set of options;
//! nothing mutates or persists.
//!
//! # Examples
//!
//! ```
//! use sref_studio::query::{query, CategoryFilter, QueryOptions, SortKey};
//! use sref_studio::domain::style::sample_styles;
//!
//! let records = sample_styles(0);
//! let options = QueryOptions {
//!     filter: CategoryFilter::All,
//!     search: "ANIME".to_string(),
//!     sort: SortKey::Name,
//!     ..QueryOptions::default()
//! };
//! let visible = query(&records, &options);
//! assert!(visible.iter().all(|r| r.matches_search("anime")));
//! ```

pub mod filter;
pub mod sort;
pub mod stats;

pub use filter::{count, query, CategoryFilter, QueryOptions};
pub use sort::SortKey;
pub use stats::{category_counts, LibraryStats};
