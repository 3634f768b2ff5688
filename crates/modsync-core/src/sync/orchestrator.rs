//! Reconcile orchestration: diff, plan and execute in one call

use tracing::{info, warn};

use super::ReconcileReport;
use super::actions::{ReconcileAction, ReconcilePlanner};
use super::executor::ReconcileExecutor;
use crate::error::Result;
use crate::model::Inventory;
use crate::status::StatusSink;

/// Delete every superseded version of every duplicated mod on both sides
///
/// The highest version of each duplicated mod stays. Deletion is
/// unconditional; any confirmation is the caller's business.
///
/// # Errors
///
/// Returns an error at the first failed delete, carrying how many deletes
/// completed.
pub fn delete_duplicates(
    own: &Inventory,
    other: &Inventory,
    sink: &mut dyn StatusSink,
) -> Result<ReconcileReport> {
    run("delete duplicates", own, other, sink, ReconcilePlanner::plan_duplicates)
}

/// Copy unique categories and unique mods to the side that lacks them
///
/// Copies go both ways and never overwrite. Updates are left alone; see
/// [`apply_updates`].
///
/// # Errors
///
/// Returns an error at the first failed or refused copy, carrying how many
/// copies completed.
pub fn resolve(
    own: &Inventory,
    other: &Inventory,
    sink: &mut dyn StatusSink,
) -> Result<ReconcileReport> {
    run("resolve", own, other, sink, ReconcilePlanner::plan_resolve)
}

/// Copy the newest version of each updated mod into the stale side
///
/// Stale versions are kept; running [`delete_duplicates`] afterwards
/// removes them.
///
/// # Errors
///
/// Returns an error at the first failed or refused copy.
pub fn apply_updates(
    own: &Inventory,
    other: &Inventory,
    sink: &mut dyn StatusSink,
) -> Result<ReconcileReport> {
    run("apply updates", own, other, sink, ReconcilePlanner::plan_updates)
}

/// Push everything unique to `source` into `dest`
///
/// With `delete_unique`, categories and mods only `dest` has are deleted
/// afterwards so `dest` mirrors `source` at the mod level.
///
/// # Errors
///
/// Returns an error at the first failed copy or delete.
pub fn sync_one_way(
    source: &Inventory,
    dest: &Inventory,
    delete_unique: bool,
    sink: &mut dyn StatusSink,
) -> Result<ReconcileReport> {
    run("one-way sync", source, dest, sink, |planner| {
        planner.plan_push(delete_unique)
    })
}

fn run<'a, F>(
    label: &str,
    own: &'a Inventory,
    other: &'a Inventory,
    sink: &mut dyn StatusSink,
    plan: F,
) -> Result<ReconcileReport>
where
    F: FnOnce(&ReconcilePlanner<'a>) -> Vec<ReconcileAction>,
{
    let planner = ReconcilePlanner::new(own, other);

    for skipped in planner.skipped() {
        warn!(
            category = %skipped.category,
            name = %skipped.name,
            error = %skipped.error,
            "skipping mod"
        );
        sink.status(&format!(
            "skipping {} in {}: {}",
            skipped.name, skipped.category, skipped.error
        ));
    }

    let actions = plan(&planner);
    info!(
        operation = label,
        own = %own.root().display(),
        other = %other.root().display(),
        planned = actions.len(),
        "starting reconcile"
    );

    ReconcileExecutor::default().execute(&actions, sink)
}
