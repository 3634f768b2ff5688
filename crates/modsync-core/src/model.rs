//! Inventory of one scanned root: categories, mod collections and the
//! installed versions behind each collection.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Index;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::version::FolderName;

/// A single installed mod folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mod {
    /// Canonical name, version and category marker removed
    pub name: String,
    /// Dotted version, empty if the folder name has none
    pub version: String,
    /// Folder name exactly as found on disk
    pub folder_name: String,
    /// Recursive byte size of the folder
    pub size_bytes: u64,
}

impl Mod {
    /// Parse a folder name, leaving the size at zero
    #[must_use]
    pub fn parse(folder_name: &str, marker: &str) -> Self {
        let folder = FolderName::parse(folder_name);
        Self {
            name: folder.canonical_name(marker),
            version: folder.version,
            folder_name: folder_name.to_string(),
            size_bytes: 0,
        }
    }
}

/// All installed versions of one mod name within one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModCollection {
    /// Canonical mod name
    pub name: String,
    /// Installed versions in scan order, never repeated
    pub versions: Vec<String>,
    /// Folder name of the first version seen
    pub folder_name: String,
    /// Size of the first version's folder only
    pub size_bytes: u64,
    #[serde(skip)]
    template: FolderName,
    #[serde(skip)]
    folders: Vec<String>,
    #[serde(skip)]
    sizes: Vec<u64>,
}

impl ModCollection {
    /// Start a collection from its first installed version
    #[must_use]
    pub fn new(first: Mod) -> Self {
        let template = FolderName::parse(&first.folder_name);
        Self {
            name: first.name,
            versions: vec![first.version],
            folders: vec![first.folder_name.clone()],
            sizes: vec![first.size_bytes],
            folder_name: first.folder_name,
            size_bytes: first.size_bytes,
            template,
        }
    }

    /// Record another installed version
    ///
    /// `size_bytes` keeps describing the first version only; later sizes
    /// count towards [`Self::installed_bytes`]. Returns `false` if the
    /// version is already installed.
    pub fn push_version(&mut self, version: &str, folder_name: &str, size_bytes: u64) -> bool {
        if self.has_version(version) {
            return false;
        }
        self.versions.push(version.to_string());
        self.folders.push(folder_name.to_string());
        self.sizes.push(size_bytes);
        true
    }

    /// Combined size of every installed version's folder
    #[must_use]
    pub fn installed_bytes(&self) -> u64 {
        self.sizes.iter().sum()
    }

    /// Whether more than one version is installed
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.versions.len() > 1
    }

    /// Whether `version` is installed
    #[must_use]
    pub fn has_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }

    /// Installed versions as a set
    #[must_use]
    pub fn version_set(&self) -> BTreeSet<&str> {
        self.versions.iter().map(String::as_str).collect()
    }

    /// Installed versions paired with their folder names, in scan order
    pub fn installed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.versions
            .iter()
            .map(String::as_str)
            .zip(self.folders.iter().map(String::as_str))
    }

    /// Folder name holding `version`
    ///
    /// Installed versions resolve to the folder recorded during the scan.
    /// Any other version is derived from the first folder's name.
    #[must_use]
    pub fn folder_for(&self, version: &str) -> String {
        self.versions
            .iter()
            .position(|v| v == version)
            .map_or_else(|| self.template.with_version(version), |idx| {
                self.folders[idx].clone()
            })
    }
}

/// Mod collections of one category, keyed by canonical name
pub type Category = BTreeMap<String, ModCollection>;

/// Everything installed under one root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    root: PathBuf,
    categories: BTreeMap<String, Category>,
}

/// Headline numbers for one inventory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    /// Number of categories
    pub categories: usize,
    /// Number of distinct mod names across categories
    pub mods: usize,
    /// Number of installed versions across all mods
    pub versions: usize,
    /// Sum of every collection's recorded size
    pub total_bytes: u64,
}

impl Inventory {
    /// An empty inventory for `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            categories: BTreeMap::new(),
        }
    }

    /// Root directory this inventory describes
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All categories, sorted by name
    #[must_use]
    pub const fn categories(&self) -> &BTreeMap<String, Category> {
        &self.categories
    }

    /// Category names, sorted
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// One category, if present
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// One collection, if present
    #[must_use]
    pub fn get(&self, category: &str, name: &str) -> Option<&ModCollection> {
        self.categories.get(category)?.get(name)
    }

    /// Whether the inventory has no categories at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Register a category, empty if it is new
    pub fn ensure_category(&mut self, category: &str) -> &mut Category {
        self.categories.entry(category.to_string()).or_default()
    }

    /// Add an installed mod to a category
    ///
    /// A mod whose name is already known becomes another version of that
    /// collection. Returns `false` if that exact version was already there.
    pub fn insert(&mut self, category: &str, installed: Mod) -> bool {
        let collections = self.ensure_category(category);
        match collections.get_mut(&installed.name) {
            Some(collection) => collection.push_version(
                &installed.version,
                &installed.folder_name,
                installed.size_bytes,
            ),
            None => {
                collections.insert(installed.name.clone(), ModCollection::new(installed));
                true
            }
        }
    }

    /// Path of a category directory
    #[must_use]
    pub fn category_path(&self, category: &str) -> PathBuf {
        self.root.join(category)
    }

    /// Path of a mod folder inside a category
    #[must_use]
    pub fn mod_path(&self, category: &str, folder_name: &str) -> PathBuf {
        self.root.join(category).join(folder_name)
    }

    /// Size of every installed version in a category
    #[must_use]
    pub fn category_bytes(&self, category: &str) -> u64 {
        self.category(category)
            .map_or(0, |mods| mods.values().map(ModCollection::installed_bytes).sum())
    }

    /// Headline numbers
    #[must_use]
    pub fn stats(&self) -> InventoryStats {
        self.categories
            .values()
            .flat_map(BTreeMap::values)
            .fold(
                InventoryStats {
                    categories: self.categories.len(),
                    ..InventoryStats::default()
                },
                |mut stats, collection| {
                    stats.mods += 1;
                    stats.versions += collection.versions.len();
                    stats.total_bytes += collection.size_bytes;
                    stats
                },
            )
    }
}

impl Index<&str> for Inventory {
    type Output = Category;

    fn index(&self, category: &str) -> &Self::Output {
        &self.categories[category]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::CATEGORY_MARKER;

    fn installed(folder: &str, size: u64) -> Mod {
        Mod {
            size_bytes: size,
            ..Mod::parse(folder, CATEGORY_MARKER)
        }
    }

    #[test]
    fn test_first_seen_size_wins() {
        let mut inventory = Inventory::new("/mods");
        assert!(inventory.insert("skins", installed("ModA 1.0.0", 100)));
        assert!(inventory.insert("skins", installed("ModA 2.0.0", 900)));

        let collection = &inventory["skins"]["ModA"];
        assert_eq!(collection.versions, vec!["1.0.0", "2.0.0"]);
        assert_eq!(collection.size_bytes, 100);
        assert_eq!(collection.installed_bytes(), 1000);
        assert_eq!(collection.folder_name, "ModA 1.0.0");
        assert!(collection.is_duplicate());
    }

    #[test]
    fn test_repeated_version_not_recorded() {
        let mut inventory = Inventory::new("/mods");
        inventory.insert("skins", installed("ModA 1.0.0", 1));
        assert!(!inventory.insert("skins", installed("CH ModA 1.0.0", 1)));
        assert_eq!(inventory["skins"]["ModA"].versions, vec!["1.0.0"]);
    }

    #[test]
    fn test_folder_for_uses_recorded_folder() {
        let mut inventory = Inventory::new("/mods");
        inventory.insert("skins", installed("ModA 1.0.0", 1));
        inventory.insert("skins", installed("CH ModA 2.0.0", 1));

        let collection = &inventory["skins"]["ModA"];
        assert_eq!(collection.folder_for("2.0.0"), "CH ModA 2.0.0");
        assert_eq!(collection.folder_for("3.0.0"), "ModA 3.0.0");
    }

    #[test]
    fn test_stats() {
        let mut inventory = Inventory::new("/mods");
        inventory.insert("skins", installed("ModA 1.0.0", 10));
        inventory.insert("skins", installed("ModA 1.1.0", 10));
        inventory.insert("terrain", installed("Map 3.0.0", 5));
        inventory.ensure_category("empty");

        let stats = inventory.stats();
        assert_eq!(stats.categories, 3);
        assert_eq!(stats.mods, 2);
        assert_eq!(stats.versions, 3);
        assert_eq!(stats.total_bytes, 15);
        assert_eq!(inventory.category_bytes("skins"), 20);
        assert_eq!(inventory.category_bytes("missing"), 0);
    }

    #[test]
    fn test_paths() {
        let inventory = Inventory::new("/mods");
        assert_eq!(inventory.category_path("skins"), PathBuf::from("/mods/skins"));
        assert_eq!(
            inventory.mod_path("skins", "ModA 1.0.0"),
            PathBuf::from("/mods/skins/ModA 1.0.0")
        );
    }
}
