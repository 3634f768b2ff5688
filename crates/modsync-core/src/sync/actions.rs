//! Reconcile action planning

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::comparison::{DiffResult, SkippedMod, diff};
use crate::model::Inventory;
use crate::version::max_version;

/// One filesystem step of a reconcile run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReconcileAction {
    /// Copy a whole category directory to the other root
    CopyCategory {
        /// Category name
        category: String,
        /// Existing category directory
        source: PathBuf,
        /// Category directory to create
        dest: PathBuf,
    },
    /// Copy one installed version of a mod missing on the other side
    CopyMod {
        /// Category holding the mod
        category: String,
        /// Canonical mod name
        name: String,
        /// Existing mod folder
        source: PathBuf,
        /// Mod folder to create
        dest: PathBuf,
    },
    /// Copy the newest version of a mod next to a stale one
    CopyUpdate {
        /// Category holding the mod
        category: String,
        /// Canonical mod name
        name: String,
        /// Version being copied
        version: String,
        /// Existing mod folder
        source: PathBuf,
        /// Mod folder to create
        dest: PathBuf,
    },
    /// Delete a superseded version of a duplicated mod
    DeleteVersion {
        /// Category holding the mod
        category: String,
        /// Canonical mod name
        name: String,
        /// Version being removed
        version: String,
        /// Folder to delete
        path: PathBuf,
    },
    /// Delete a category the source side does not have
    DeleteCategory {
        /// Category name
        category: String,
        /// Directory to delete
        path: PathBuf,
    },
    /// Delete one installed version of a mod the source side does not have
    DeleteMod {
        /// Category holding the mod
        category: String,
        /// Canonical mod name
        name: String,
        /// Folder to delete
        path: PathBuf,
    },
}

impl ReconcileAction {
    /// Whether this action copies data
    #[must_use]
    pub const fn is_copy(&self) -> bool {
        matches!(
            self,
            Self::CopyCategory { .. } | Self::CopyMod { .. } | Self::CopyUpdate { .. }
        )
    }

    /// Source and destination of a copy
    #[must_use]
    pub fn copy_paths(&self) -> Option<(&Path, &Path)> {
        match self {
            Self::CopyCategory { source, dest, .. }
            | Self::CopyMod { source, dest, .. }
            | Self::CopyUpdate { source, dest, .. } => Some((source.as_path(), dest.as_path())),
            _ => None,
        }
    }

    /// Path removed by a delete
    #[must_use]
    pub fn delete_path(&self) -> Option<&Path> {
        match self {
            Self::DeleteVersion { path, .. }
            | Self::DeleteCategory { path, .. }
            | Self::DeleteMod { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }
}

impl fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CopyCategory {
                category,
                source,
                dest,
            } => write!(
                f,
                "copy category {category}: {} -> {}",
                source.display(),
                dest.display()
            ),
            Self::CopyMod {
                category,
                name,
                source,
                dest,
            } => write!(
                f,
                "copy {name} ({category}): {} -> {}",
                source.display(),
                dest.display()
            ),
            Self::CopyUpdate {
                category,
                name,
                version,
                source,
                dest,
            } => write!(
                f,
                "copy {name} {version} ({category}): {} -> {}",
                source.display(),
                dest.display()
            ),
            Self::DeleteVersion {
                category,
                name,
                version,
                path,
            } => write!(f, "delete {name} {version} ({category}): {}", path.display()),
            Self::DeleteCategory { category, path } => {
                write!(f, "delete category {category}: {}", path.display())
            }
            Self::DeleteMod {
                category,
                name,
                path,
            } => write!(f, "delete {name} ({category}): {}", path.display()),
        }
    }
}

/// Builds reconcile plans from a pair of inventories
///
/// The diff is computed once, when the planner is created. Planning never
/// touches the filesystem.
#[derive(Debug, Clone)]
pub struct ReconcilePlanner<'a> {
    own: &'a Inventory,
    other: &'a Inventory,
    own_diff: DiffResult,
    other_diff: DiffResult,
}

impl<'a> ReconcilePlanner<'a> {
    /// Diff two inventories and keep the results for planning
    #[must_use]
    pub fn new(own: &'a Inventory, other: &'a Inventory) -> Self {
        let (own_diff, other_diff) = diff(own, other);
        Self {
            own,
            other,
            own_diff,
            other_diff,
        }
    }

    /// Diff results for `(own, other)`
    #[must_use]
    pub const fn diffs(&self) -> (&DiffResult, &DiffResult) {
        (&self.own_diff, &self.other_diff)
    }

    /// Mods left out of classification on either side
    pub fn skipped(&self) -> impl Iterator<Item = &SkippedMod> {
        self.own_diff.skipped.iter().chain(&self.other_diff.skipped)
    }

    /// Delete every version but the highest of each duplicated mod, on both
    /// sides
    #[must_use]
    pub fn plan_duplicates(&self) -> Vec<ReconcileAction> {
        let mut actions = Vec::new();
        plan_deduplication(self.own, &self.own_diff, &mut actions);
        plan_deduplication(self.other, &self.other_diff, &mut actions);
        actions
    }

    /// Copy what each side lacks, in both directions
    ///
    /// Unique categories are planned before unique mods. Nothing is ever
    /// deleted and update records are not acted on.
    #[must_use]
    pub fn plan_resolve(&self) -> Vec<ReconcileAction> {
        let mut actions = Vec::new();
        plan_category_copies(self.own, self.other, &self.own_diff, &mut actions);
        plan_category_copies(self.other, self.own, &self.other_diff, &mut actions);
        plan_mod_copies(self.own, self.other, &self.own_diff, &mut actions);
        plan_mod_copies(self.other, self.own, &self.other_diff, &mut actions);
        actions
    }

    /// Copy the highest version of each updated mod into the stale side
    ///
    /// The stale versions stay in place and show up as duplicates on the
    /// next diff.
    #[must_use]
    pub fn plan_updates(&self) -> Vec<ReconcileAction> {
        let mut actions = Vec::new();
        plan_update_copies(self.own, self.other, &self.own_diff, &mut actions);
        plan_update_copies(self.other, self.own, &self.other_diff, &mut actions);
        actions
    }

    /// Make `other` receive everything unique to `own`
    ///
    /// With `delete_unique`, categories and mods only `other` has are
    /// deleted after the copies.
    #[must_use]
    pub fn plan_push(&self, delete_unique: bool) -> Vec<ReconcileAction> {
        let mut actions = Vec::new();
        plan_category_copies(self.own, self.other, &self.own_diff, &mut actions);
        plan_mod_copies(self.own, self.other, &self.own_diff, &mut actions);

        if delete_unique {
            for category in &self.other_diff.unique_categories {
                actions.push(ReconcileAction::DeleteCategory {
                    category: category.clone(),
                    path: self.other.category_path(category),
                });
            }
            for (category, collections) in &self.other_diff.unique_per_category {
                for collection in collections {
                    for (_, folder) in collection.installed() {
                        actions.push(ReconcileAction::DeleteMod {
                            category: category.clone(),
                            name: collection.name.clone(),
                            path: self.other.mod_path(category, folder),
                        });
                    }
                }
            }
        }

        actions
    }
}

fn plan_deduplication(
    inventory: &Inventory,
    result: &DiffResult,
    actions: &mut Vec<ReconcileAction>,
) {
    for (category, collections) in &result.duplicates_per_category {
        for collection in collections {
            // Unorderable collections were already reported as skipped.
            let Ok(highest) = max_version(collection.versions.iter().map(String::as_str)) else {
                continue;
            };

            for (version, folder) in collection.installed() {
                if version == highest {
                    continue;
                }
                actions.push(ReconcileAction::DeleteVersion {
                    category: category.clone(),
                    name: collection.name.clone(),
                    version: version.to_string(),
                    path: inventory.mod_path(category, folder),
                });
            }
        }
    }
}

fn plan_category_copies(
    from: &Inventory,
    to: &Inventory,
    result: &DiffResult,
    actions: &mut Vec<ReconcileAction>,
) {
    for category in &result.unique_categories {
        actions.push(ReconcileAction::CopyCategory {
            category: category.clone(),
            source: from.category_path(category),
            dest: to.category_path(category),
        });
    }
}

fn plan_mod_copies(
    from: &Inventory,
    to: &Inventory,
    result: &DiffResult,
    actions: &mut Vec<ReconcileAction>,
) {
    for (category, collections) in &result.unique_per_category {
        for collection in collections {
            for (_, folder) in collection.installed() {
                actions.push(ReconcileAction::CopyMod {
                    category: category.clone(),
                    name: collection.name.clone(),
                    source: from.mod_path(category, folder),
                    dest: to.mod_path(category, folder),
                });
            }
        }
    }
}

fn plan_update_copies(
    from: &Inventory,
    to: &Inventory,
    result: &DiffResult,
    actions: &mut Vec<ReconcileAction>,
) {
    for (category, records) in &result.updates_per_category {
        for record in records {
            let folder = &record.candidate.folder_name;
            actions.push(ReconcileAction::CopyUpdate {
                category: category.clone(),
                name: record.candidate.name.clone(),
                version: record.candidate.version.clone(),
                source: from.mod_path(category, folder),
                dest: to.mod_path(category, folder),
            });
        }
    }
}
