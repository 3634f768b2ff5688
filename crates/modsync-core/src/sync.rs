//! Filesystem reconciliation between two roots
//!
//! Every run is split in two steps. A [`ReconcilePlanner`] turns a diff into
//! a list of [`ReconcileAction`]s without touching the disk, and a
//! [`ReconcileExecutor`] carries them out in order, stopping at the first
//! failure. The free functions in this module chain both steps.

mod actions;
mod executor;
mod orchestrator;
mod reporting;


use serde::Serialize;

pub use actions::{ReconcileAction, ReconcilePlanner};
pub use executor::ReconcileExecutor;
pub use orchestrator::{apply_updates, delete_duplicates, resolve, sync_one_way};
pub use reporting::SyncReporter;

/// Outcome of an executed plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Directories and files copied
    pub copied: usize,
    /// Directories and files deleted
    pub deleted: usize,
    /// Bytes written by copies
    pub bytes_copied: u64,
    /// Actions that completed, in execution order
    pub actions: Vec<ReconcileAction>,
}

impl ReconcileReport {
    /// Total number of completed operations
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.copied + self.deleted
    }

    /// Whether nothing was done
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_operations() == 0
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: Self) {
        self.copied += other.copied;
        self.deleted += other.deleted;
        self.bytes_copied += other.bytes_copied;
        self.actions.extend(other.actions);
    }
}
