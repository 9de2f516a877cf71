//! Category filtering and search.

use crate::domain::error::StudioError;
use crate::domain::style::{Category, StyleRecord};
use crate::query::sort::SortKey;
use std::fmt;
use std::str::FromStr;

/// Which slice of the library is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Favorites,
    Category(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, record: &StyleRecord) -> bool {
        match self {
            Self::All => true,
            Self::Favorites => record.favorite,
            Self::Category(category) => record.category == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "favorites" => Ok(Self::Favorites),
            other => other.parse().map(Self::Category),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Favorites => f.write_str("favorites"),
            Self::Category(category) => f.write_str(category.as_str()),
        }
    }
}

/// Parameters for a library query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub filter: CategoryFilter,
    /// Additionally restrict to favorites, whatever the filter.
    pub favorites_only: bool,
    pub search: String,
    pub sort: SortKey,
}

/// Records passing the filter, favorites flag and search term, in sort order.
///
/// Pure: the input slice is never reordered.
#[must_use]
pub fn query<'a>(records: &'a [StyleRecord], options: &QueryOptions) -> Vec<&'a StyleRecord> {
    let _span = tracing::debug_span!(
        "query",
        total = records.len(),
        filter = %options.filter,
        sort = %options.sort
    )
    .entered();

    let needle = options.search.trim().to_lowercase();

    let mut visible: Vec<&StyleRecord> = records
        .iter()
        .filter(|record| options.filter.matches(record))
        .filter(|record| !options.favorites_only || record.favorite)
        .filter(|record| record.matches_search(&needle))
        .collect();

    options.sort.apply(&mut visible);

    tracing::debug!(visible = visible.len(), "query applied");
    visible
}

/// Number of records passing `filter`.
#[must_use]
pub fn count(records: &[StyleRecord], filter: CategoryFilter) -> usize {
    records.iter().filter(|record| filter.matches(record)).count()
}
