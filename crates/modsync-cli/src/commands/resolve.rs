use modsync_core::ReconcilePlanner;

use super::CommandOptions;

pub struct Resolve;

impl Resolve {
    pub fn execute(updates: bool, options: &CommandOptions) -> anyhow::Result<()> {
        let workspace = options.load_workspace()?;
        let planner = ReconcilePlanner::new(&workspace.primary, &workspace.secondary);

        let mut actions = planner.plan_resolve();
        if updates {
            actions.extend(planner.plan_updates());
        } else if options.verbose {
            let (primary, secondary) = planner.diffs();
            let pending = primary.update_count() + secondary.update_count();
            if pending > 0 {
                eprintln!("{pending} newer versions not copied (use --updates)");
            }
        }

        options.run_plan(&planner, &actions)
    }
}
