//! Per-category change counts and per-mod status for presenting a diff

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use super::DiffResult;

/// How a single mod name differs between the two sides, seen from `own`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModStatus {
    /// Only `own` has it
    Unique,
    /// Only the other side has it
    Missing,
    /// `own` holds a newer version the other side lacks
    UpdateProvider,
    /// The other side holds a newer version `own` lacks
    UpdateConsumer,
    /// `own` has several versions installed
    Duplicate,
}

impl ModStatus {
    /// Short label used in listings
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::Missing => "missing",
            Self::UpdateProvider => "update available",
            Self::UpdateConsumer => "outdated",
            Self::Duplicate => "duplicate",
        }
    }

    /// Status of every changed mod in a shared `category`, sorted by name
    ///
    /// When a name matches several lists the first applicable status in
    /// declaration order wins. Names that are only duplicated on the other
    /// side have nothing to show from `own`'s point of view and are left out.
    #[must_use]
    pub fn classify(own: &DiffResult, other: &DiffResult, category: &str) -> Vec<(String, Self)> {
        let mut statuses: BTreeMap<String, Self> = BTreeMap::new();

        let mut offer = |name: &str, status: Self| {
            statuses
                .entry(name.to_string())
                .and_modify(|current| *current = (*current).min(status))
                .or_insert(status);
        };

        for collection in own.unique_in(category) {
            offer(&collection.name, Self::Unique);
        }
        for collection in other.unique_in(category) {
            offer(&collection.name, Self::Missing);
        }
        for record in own.updates_in(category) {
            offer(&record.candidate.name, Self::UpdateProvider);
        }
        for record in other.updates_in(category) {
            offer(&record.candidate.name, Self::UpdateConsumer);
        }
        for collection in own.duplicates_in(category) {
            offer(&collection.name, Self::Duplicate);
        }

        statuses.into_iter().collect()
    }
}

impl fmt::Display for ModStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of changes per shared category across both sides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    /// Uniques, updates and duplicates of both sides, per category
    pub changes_per_category: BTreeMap<String, usize>,
}

impl DiffSummary {
    /// Summarise a pair of results produced by the same diff
    ///
    /// Only categories present on both sides are counted.
    #[must_use]
    pub fn new(own: &DiffResult, other: &DiffResult) -> Self {
        let unique: BTreeSet<&str> = own
            .unique_categories
            .iter()
            .chain(&other.unique_categories)
            .map(String::as_str)
            .collect();

        let mut changes_per_category = BTreeMap::new();
        for result in [own, other] {
            let counts = result
                .unique_per_category
                .iter()
                .map(|(category, mods)| (category, mods.len()))
                .chain(
                    result
                        .updates_per_category
                        .iter()
                        .map(|(category, records)| (category, records.len())),
                )
                .chain(
                    result
                        .duplicates_per_category
                        .iter()
                        .map(|(category, mods)| (category, mods.len())),
                );

            for (category, count) in counts {
                if !unique.contains(category.as_str()) {
                    *changes_per_category.entry(category.clone()).or_insert(0) += count;
                }
            }
        }

        Self {
            changes_per_category,
        }
    }

    /// Categories with at least one change
    pub fn changed_categories(&self) -> impl Iterator<Item = &str> {
        self.changes_per_category
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(category, _)| category.as_str())
    }

    /// Total number of changes across categories
    #[must_use]
    pub fn total(&self) -> usize {
        self.changes_per_category.values().sum()
    }
}
