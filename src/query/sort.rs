//! Result ordering.

use crate::domain::error::StudioError;
use crate::domain::style::StyleRecord;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Sort order for library results. All orders are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first.
    #[default]
    Recent,
    /// Sref code, ascending.
    Name,
    /// Category token, ascending.
    Category,
    /// Favorites first.
    Favorites,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::Recent, Self::Name, Self::Category, Self::Favorites];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Name => "name",
            Self::Category => "category",
            Self::Favorites => "favorites",
        }
    }

    pub fn apply(self, records: &mut [&StyleRecord]) {
        match self {
            Self::Recent => records.sort_by_key(|r| Reverse(r.created_at)),
            Self::Name => records.sort_by_cached_key(|r| r.sref_code.to_lowercase()),
            Self::Category => records.sort_by_key(|r| r.category.as_str()),
            Self::Favorites => records.sort_by_key(|r| !r.favorite),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StudioError::Validation(format!("unknown sort key '{}'", s.trim())))
    }
}
