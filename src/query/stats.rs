//! Library statistics and per-category badge counts.

use crate::domain::style::{Category, StyleRecord};
use std::collections::{BTreeMap, BTreeSet};

/// Summary figures shown above the library.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub total: usize,
    /// Created within the last seven days.
    pub recent: usize,
    /// Distinct categories in use.
    pub categories: usize,
    pub favorites: usize,
}

impl LibraryStats {
    #[must_use]
    pub fn compute(records: &[StyleRecord], now_ms: i64) -> Self {
        let categories: BTreeSet<Category> = records.iter().map(|r| r.category).collect();
        Self {
            total: records.len(),
            recent: records.iter().filter(|r| r.is_recent(now_ms)).count(),
            categories: categories.len(),
            favorites: records.iter().filter(|r| r.favorite).count(),
        }
    }
}

/// Record count for every category, including empty ones.
#[must_use]
pub fn category_counts(records: &[StyleRecord]) -> BTreeMap<Category, usize> {
    let mut counts: BTreeMap<Category, usize> = Category::ALL.iter().map(|c| (*c, 0)).collect();
    for record in records {
        *counts.entry(record.category).or_default() += 1;
    }
    counts
}
