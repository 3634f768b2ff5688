use modsync_core::ReconcilePlanner;

use super::CommandOptions;
use crate::cli::Side;

pub struct Push;

impl Push {
    pub fn execute(to: Side, delete_unique: bool, options: &CommandOptions) -> anyhow::Result<()> {
        let workspace = options.load_workspace()?;
        let (source, dest) = match to {
            Side::Primary => (&workspace.secondary, &workspace.primary),
            Side::Secondary => (&workspace.primary, &workspace.secondary),
        };

        if options.verbose {
            eprintln!(
                "Pushing {} -> {}",
                source.root().display(),
                dest.root().display()
            );
        }

        let planner = ReconcilePlanner::new(source, dest);
        options.run_plan(&planner, &planner.plan_push(delete_unique))
    }
}
