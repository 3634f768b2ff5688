//! Duplicate detection within one inventory

use crate::model::Inventory;
use crate::version::max_version;

use super::DiffResult;

/// Record every collection with more than one installed version
///
/// Runs over all of the side's categories, shared or not. A collection
/// whose versions cannot be ordered is reported as skipped instead, since
/// there is no way to tell which version to keep.
pub(super) fn collect(inventory: &Inventory, result: &mut DiffResult) {
    for (category, mods) in inventory.categories() {
        for collection in mods.values().filter(|c| c.is_duplicate()) {
            match max_version(collection.versions.iter().map(String::as_str)) {
                Ok(_) => result.push_duplicate(category, collection),
                Err(error) => result.push_skipped(category, &collection.name, error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VersionParseError;
    use crate::model::Mod;
    use crate::version::CATEGORY_MARKER;

    #[test]
    fn test_collect_only_multi_version() {
        let mut inventory = Inventory::new("/a");
        inventory.insert("skins", Mod::parse("ModA 1.0.0", CATEGORY_MARKER));
        inventory.insert("skins", Mod::parse("ModA 2.0.0", CATEGORY_MARKER));
        inventory.insert("skins", Mod::parse("ModB 1.0.0", CATEGORY_MARKER));

        let mut result = DiffResult::default();
        collect(&inventory, &mut result);

        let names: Vec<_> = result.duplicates_in("skins").iter().map(|c| &c.name).collect();
        assert_eq!(names, vec!["ModA"]);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_unversioned_duplicate_is_skipped() {
        let mut inventory = Inventory::new("/a");
        inventory.insert("skins", Mod::parse("ModA", CATEGORY_MARKER));
        inventory.insert("skins", Mod::parse("ModA 1.0.0", CATEGORY_MARKER));

        let mut result = DiffResult::default();
        collect(&inventory, &mut result);

        assert!(result.duplicates_per_category.is_empty());
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].name, "ModA");
        assert_eq!(result.skipped[0].error, VersionParseError::Empty);
    }
}
