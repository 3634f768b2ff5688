use modsync_core::ReconcilePlanner;

use super::CommandOptions;

pub struct Dedupe;

impl Dedupe {
    pub fn execute(options: &CommandOptions) -> anyhow::Result<()> {
        let workspace = options.load_workspace()?;
        let planner = ReconcilePlanner::new(&workspace.primary, &workspace.secondary);

        options.run_plan(&planner, &planner.plan_duplicates())
    }
}
