use std::path::Path;

use modsync_core::{Inventory, diff, format_gib};

use super::CommandOptions;

pub struct Status;

impl Status {
    pub fn execute(options: &CommandOptions) -> anyhow::Result<()> {
        let workspace = options.load_workspace()?;

        Self::print_root("Primary", &workspace.roots.primary, &workspace.primary);
        Self::print_root("Secondary", &workspace.roots.secondary, &workspace.secondary);

        let (primary, secondary) = diff(&workspace.primary, &workspace.secondary);
        let duplicates = primary.duplicate_count() + secondary.duplicate_count();

        println!();
        if primary.is_in_sync() && secondary.is_in_sync() {
            println!("Status: ✓ In sync");
        } else {
            let categories = primary.unique_categories.len() + secondary.unique_categories.len();
            let changes = primary.unique_mod_count()
                + secondary.unique_mod_count()
                + primary.update_count()
                + secondary.update_count();
            println!("Status: ✗ Out of sync ({categories} unique categories, {changes} mod changes)");
            println!(
                "To transfer: {} to secondary, {} to primary",
                format_gib(primary.transfer_bytes(&workspace.primary)),
                format_gib(secondary.transfer_bytes(&workspace.secondary))
            );
        }
        if duplicates > 0 {
            println!("Duplicates: {duplicates} (run `modsync dedupe`)");
        }

        Ok(())
    }

    fn print_root(label: &str, path: &Path, inventory: &Inventory) {
        let stats = inventory.stats();
        println!("{label}: {}", path.display());
        println!(
            "  Installed Mods: {} ({}) in {} categories",
            stats.mods,
            format_gib(stats.total_bytes),
            stats.categories
        );
    }
}
