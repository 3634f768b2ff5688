//! # modsync-core
//!
//! Inventory, diff and reconcile engine for versioned mod directories.
//!
//! Two roots each hold category sub-directories, and every category holds
//! installed mod folders named like `CH Some Mod 1.2.0`. This library scans
//! a root into an [`Inventory`], compares two inventories with [`diff`], and
//! reconciles them by deleting superseded duplicate versions
//! ([`delete_duplicates`]) or copying what one side is missing ([`resolve`]).
//!
//! Callers own the inventories; every operation is a plain function of its
//! arguments. Progress lines are reported through a [`StatusSink`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comparison;
pub mod config;
pub mod error;
pub mod model;
pub mod scanner;
pub mod status;
pub mod sync;
pub mod version;

pub use comparison::{DiffResult, DiffSummary, ModStatus, SkippedMod, UpdateRecord, diff};
pub use config::Config;
pub use error::{Error, Operation, Result, ScanWarning, VersionParseError};
pub use model::{Category, Inventory, InventoryStats, Mod, ModCollection};
pub use scanner::{ScanOptions, ScanOutcome, Scanner};
pub use status::{NullSink, StatusSink, format_gib};
pub use sync::{
    ReconcileAction, ReconcileExecutor, ReconcilePlanner, ReconcileReport, SyncReporter,
    apply_updates, delete_duplicates, resolve, sync_one_way,
};
pub use version::{FolderName, Version, max_version, parse_name_and_version};
