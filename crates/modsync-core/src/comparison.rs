//! Cross-inventory classification
//!
//! Comparing two inventories yields one [`DiffResult`] per side:
//! - categories only that side has
//! - mods only that side has, within categories both sides share
//! - mods that side holds in more than one version (duplicates)
//! - mods whose highest known version lives only on that side (updates)
//!
//! The two results are mirror images of each other. Everything is ordered
//! by name so repeated comparisons of the same trees render identically.

mod duplicates;
mod matching;
mod summary;

#[cfg(test)]
mod integration_tests;

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Serialize, Serializer};
use tracing::debug;

pub use summary::{DiffSummary, ModStatus};

use crate::error::VersionParseError;
use crate::model::{Inventory, Mod, ModCollection};

/// A mod whose highest version this side can provide to the other side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRecord {
    /// The highest version as it exists on this side
    pub candidate: Mod,
    /// The other side's collection, which lacks that version
    pub stale: ModCollection,
}

impl UpdateRecord {
    fn new(provider: &ModCollection, highest: &str, stale: &ModCollection) -> Self {
        Self {
            candidate: Mod {
                name: provider.name.clone(),
                version: highest.to_string(),
                folder_name: provider.folder_for(highest),
                size_bytes: provider.size_bytes,
            },
            stale: stale.clone(),
        }
    }
}

/// A mod left out of classification because a version could not be ordered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedMod {
    /// Category holding the mod
    pub category: String,
    /// Canonical mod name
    pub name: String,
    /// Why ordering failed
    #[serde(serialize_with = "serialize_display")]
    pub error: VersionParseError,
}

/// Classification of one side of a comparison
///
/// Maps only hold categories with at least one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    /// Categories this side has and the other lacks
    pub unique_categories: Vec<String>,
    /// Per shared category, mods this side has and the other lacks
    pub unique_per_category: BTreeMap<String, Vec<ModCollection>>,
    /// Per category, mods installed here in more than one version
    pub duplicates_per_category: BTreeMap<String, Vec<ModCollection>>,
    /// Per shared category, newest versions only this side holds
    pub updates_per_category: BTreeMap<String, Vec<UpdateRecord>>,
    /// Mods that could not be classified
    pub skipped: Vec<SkippedMod>,
}

impl DiffResult {
    /// Mods unique to this side in `category`
    #[must_use]
    pub fn unique_in(&self, category: &str) -> &[ModCollection] {
        self.unique_per_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Duplicate installs on this side in `category`
    #[must_use]
    pub fn duplicates_in(&self, category: &str) -> &[ModCollection] {
        self.duplicates_per_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Updates this side provides in `category`
    #[must_use]
    pub fn updates_in(&self, category: &str) -> &[UpdateRecord] {
        self.updates_per_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of unique mods across categories
    #[must_use]
    pub fn unique_mod_count(&self) -> usize {
        self.unique_per_category.values().map(Vec::len).sum()
    }

    /// Number of duplicate collections across categories
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicates_per_category.values().map(Vec::len).sum()
    }

    /// Number of update records across categories
    #[must_use]
    pub fn update_count(&self) -> usize {
        self.updates_per_category.values().map(Vec::len).sum()
    }

    /// Whether this side has nothing the other side lacks
    ///
    /// Duplicates do not count; they are a local matter of one side.
    #[must_use]
    pub fn is_in_sync(&self) -> bool {
        self.unique_categories.is_empty()
            && self.unique_per_category.is_empty()
            && self.updates_per_category.is_empty()
    }

    /// Bytes a resolve run would push from this side
    ///
    /// Every installed version of a unique mod is copied, so all of them
    /// count. `own` must be the inventory this result was computed for.
    #[must_use]
    pub fn transfer_bytes(&self, own: &Inventory) -> u64 {
        let categories: u64 = self
            .unique_categories
            .iter()
            .map(|category| own.category_bytes(category))
            .sum();
        let mods: u64 = self
            .unique_per_category
            .values()
            .flatten()
            .map(ModCollection::installed_bytes)
            .sum();
        categories + mods
    }

    fn push_unique(&mut self, category: &str, collection: &ModCollection) {
        self.unique_per_category
            .entry(category.to_string())
            .or_default()
            .push(collection.clone());
    }

    fn push_duplicate(&mut self, category: &str, collection: &ModCollection) {
        self.duplicates_per_category
            .entry(category.to_string())
            .or_default()
            .push(collection.clone());
    }

    fn push_update(&mut self, category: &str, record: UpdateRecord) {
        self.updates_per_category
            .entry(category.to_string())
            .or_default()
            .push(record);
    }

    fn push_skipped(&mut self, category: &str, name: &str, error: VersionParseError) {
        self.skipped.push(SkippedMod {
            category: category.to_string(),
            name: name.to_string(),
            error,
        });
    }
}

/// Compare two inventories
///
/// Returns `(own, other)`: what `own` has that `other` lacks, and the
/// mirror image.
#[must_use]
pub fn diff(own: &Inventory, other: &Inventory) -> (DiffResult, DiffResult) {
    let mut own_result = DiffResult {
        unique_categories: unique_categories(own, other),
        ..DiffResult::default()
    };
    let mut other_result = DiffResult {
        unique_categories: unique_categories(other, own),
        ..DiffResult::default()
    };

    duplicates::collect(own, &mut own_result);
    duplicates::collect(other, &mut other_result);

    for (category, own_mods) in own.categories() {
        if let Some(other_mods) = other.category(category) {
            matching::match_category(
                category,
                own_mods,
                other_mods,
                &mut own_result,
                &mut other_result,
            );
        }
    }

    debug!(
        own_unique_categories = own_result.unique_categories.len(),
        other_unique_categories = other_result.unique_categories.len(),
        own_unique_mods = own_result.unique_mod_count(),
        other_unique_mods = other_result.unique_mod_count(),
        own_updates = own_result.update_count(),
        other_updates = other_result.update_count(),
        "diff complete"
    );

    (own_result, other_result)
}

/// Categories of `a` missing from `b`, sorted
fn unique_categories(a: &Inventory, b: &Inventory) -> Vec<String> {
    a.category_names()
        .filter(|name| b.category(name).is_none())
        .map(str::to_string)
        .collect()
}

fn serialize_display<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    serializer.collect_str(value)
}
