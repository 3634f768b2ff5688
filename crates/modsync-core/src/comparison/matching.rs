//! Name-level matching within a category both sides share

use tracing::warn;

use crate::model::{Category, ModCollection};
use crate::version::max_version;

use super::{DiffResult, UpdateRecord};

/// Classify every mod of one shared category
///
/// Names present on one side only become uniques of that side. Names
/// present on both sides are compared by their version sets.
pub(super) fn match_category(
    category: &str,
    own_mods: &Category,
    other_mods: &Category,
    own_result: &mut DiffResult,
    other_result: &mut DiffResult,
) {
    for (name, own_mod) in own_mods {
        match other_mods.get(name) {
            Some(other_mod) => {
                compare_versions(category, own_mod, other_mod, own_result, other_result);
            }
            None => own_result.push_unique(category, own_mod),
        }
    }

    for (name, other_mod) in other_mods {
        if !own_mods.contains_key(name) {
            other_result.push_unique(category, other_mod);
        }
    }
}

/// Decide which side, if any, holds a version the other should receive
///
/// Only the single highest version across both sides matters. If both
/// sides hold it, differing lower versions are left to duplicate handling.
fn compare_versions(
    category: &str,
    own_mod: &ModCollection,
    other_mod: &ModCollection,
    own_result: &mut DiffResult,
    other_result: &mut DiffResult,
) {
    let own_versions = own_mod.version_set();
    let other_versions = other_mod.version_set();

    if own_versions == other_versions {
        return;
    }

    let highest = match max_version(own_versions.union(&other_versions).copied()) {
        Ok(highest) => highest,
        Err(error) => {
            warn!(category, name = %own_mod.name, %error, "cannot order versions");
            own_result.push_skipped(category, &own_mod.name, error.clone());
            other_result.push_skipped(category, &other_mod.name, error);
            return;
        }
    };

    match (own_versions.contains(highest), other_versions.contains(highest)) {
        (true, false) => {
            own_result.push_update(category, UpdateRecord::new(own_mod, highest, other_mod));
        }
        (false, true) => {
            other_result.push_update(category, UpdateRecord::new(other_mod, highest, own_mod));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Inventory, Mod};
    use crate::version::CATEGORY_MARKER;

    fn category(folders: &[&str]) -> Category {
        let mut inventory = Inventory::new("/x");
        inventory.ensure_category("c");
        for folder in folders {
            inventory.insert("c", Mod::parse(folder, CATEGORY_MARKER));
        }
        inventory["c"].clone()
    }

    #[test]
    fn test_same_highest_on_both_sides_is_not_an_update() {
        let own = category(&["ModX 1.0.0", "ModX 2.0.0"]);
        let other = category(&["ModX 2.0.0"]);

        let (mut own_result, mut other_result) = (DiffResult::default(), DiffResult::default());
        match_category("c", &own, &other, &mut own_result, &mut other_result);

        assert!(own_result.updates_per_category.is_empty());
        assert!(other_result.updates_per_category.is_empty());
    }

    #[test]
    fn test_update_uses_provider_folder_and_size() {
        let mut own = category(&["CH ModX 1.0.0"]);
        own.get_mut("ModX").unwrap().size_bytes = 42;
        let other = category(&["ModX 0.5.0"]);

        let (mut own_result, mut other_result) = (DiffResult::default(), DiffResult::default());
        match_category("c", &own, &other, &mut own_result, &mut other_result);

        let record = &own_result.updates_in("c")[0];
        assert_eq!(record.candidate.version, "1.0.0");
        assert_eq!(record.candidate.folder_name, "CH ModX 1.0.0");
        assert_eq!(record.candidate.size_bytes, 42);
        assert_eq!(record.stale.versions, vec!["0.5.0"]);
        assert!(other_result.updates_per_category.is_empty());
    }

    #[test]
    fn test_unorderable_versions_are_skipped_on_both_sides() {
        let own = category(&["ModX"]);
        let other = category(&["ModX 1.0.0"]);

        let (mut own_result, mut other_result) = (DiffResult::default(), DiffResult::default());
        match_category("c", &own, &other, &mut own_result, &mut other_result);

        assert_eq!(own_result.skipped.len(), 1);
        assert_eq!(other_result.skipped.len(), 1);
        assert!(own_result.updates_per_category.is_empty());
    }

    #[test]
    fn test_uniques_sorted_by_name() {
        let own = category(&["Zulu 1.0.0", "Alpha 1.0.0", "Shared 1.0.0"]);
        let other = category(&["Shared 1.0.0", "Mike 1.0.0"]);

        let (mut own_result, mut other_result) = (DiffResult::default(), DiffResult::default());
        match_category("c", &own, &other, &mut own_result, &mut other_result);

        let own_names: Vec<_> = own_result.unique_in("c").iter().map(|m| m.name.as_str()).collect();
        let other_names: Vec<_> =
            other_result.unique_in("c").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(own_names, vec!["Alpha", "Zulu"]);
        assert_eq!(other_names, vec!["Mike"]);
    }
}
