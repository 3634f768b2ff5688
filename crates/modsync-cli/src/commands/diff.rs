use modsync_core::{DiffResult, DiffSummary, ModStatus, diff};

use super::CommandOptions;

pub struct Diff;

impl Diff {
    pub fn execute(json: bool, options: &CommandOptions) -> anyhow::Result<()> {
        let workspace = options.load_workspace()?;
        let (primary, secondary) = diff(&workspace.primary, &workspace.secondary);

        if json {
            let output = serde_json::json!({
                "primary": primary,
                "secondary": secondary,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if primary.is_in_sync()
            && secondary.is_in_sync()
            && primary.duplicates_per_category.is_empty()
            && secondary.duplicates_per_category.is_empty()
            && primary.skipped.is_empty()
        {
            println!("No differences");
            return Ok(());
        }

        Self::print_unique_categories("primary", &primary);
        Self::print_unique_categories("secondary", &secondary);

        let summary = DiffSummary::new(&primary, &secondary);
        for category in summary.changed_categories() {
            println!(
                "\n[{category}] {} changes",
                summary.changes_per_category[category]
            );
            for (name, status) in ModStatus::classify(&primary, &secondary, category) {
                println!("  {name:<40} {}", Self::describe(status));
            }
            for collection in secondary.duplicates_in(category) {
                println!("  {:<40} duplicate in secondary", collection.name);
            }
        }

        if !primary.skipped.is_empty() || !secondary.skipped.is_empty() {
            println!("\nSkipped:");
            for skipped in primary.skipped.iter().chain(&secondary.skipped) {
                println!("  {} ({}): {}", skipped.name, skipped.category, skipped.error);
            }
        }

        Ok(())
    }

    fn print_unique_categories(label: &str, result: &DiffResult) {
        for category in &result.unique_categories {
            println!("Category only in {label}: {category}");
            for collection in result.duplicates_in(category) {
                println!(
                    "  {:<40} duplicate in {label} ({})",
                    collection.name,
                    collection.versions.join(", ")
                );
            }
        }
    }

    const fn describe(status: ModStatus) -> &'static str {
        match status {
            ModStatus::Unique => "only in primary",
            ModStatus::Missing => "only in secondary",
            ModStatus::UpdateProvider => "newer in primary",
            ModStatus::UpdateConsumer => "newer in secondary",
            ModStatus::Duplicate => "duplicate in primary",
        }
    }
}
