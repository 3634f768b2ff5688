//! Common types and utilities for command execution

use std::path::{Path, PathBuf};

use anyhow::Context;
use modsync_core::config::{ConfigManager, ConfigValidator, Roots};
use modsync_core::sync::{ReconcileAction, ReconcileExecutor, ReconcilePlanner, SyncReporter};
use modsync_core::{Inventory, Scanner};

use crate::interactive::Confirmer;

/// Execution options shared by every command
pub struct CommandOptions<'a> {
    /// Enable verbose output
    pub verbose: bool,
    /// Preview changes without applying (dry-run)
    pub dry_run: bool,
    /// Skip confirmation prompts
    pub yes: bool,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Primary root given on the command line
    pub primary: Option<PathBuf>,
    /// Secondary root given on the command line
    pub secondary: Option<PathBuf>,
}

/// Both roots, scanned
pub struct Workspace {
    /// Resolved root paths
    pub roots: Roots,
    /// Inventory of the primary root
    pub primary: Inventory,
    /// Inventory of the secondary root
    pub secondary: Inventory,
}

impl CommandOptions<'_> {
    /// Load configuration, resolve both roots and scan them
    pub fn load_workspace(&self) -> anyhow::Result<Workspace> {
        let config = ConfigManager::load(self.config_path)?
            .with_overrides(self.primary.clone(), self.secondary.clone());
        let roots = ConfigValidator::resolve_roots(&config)?;
        let scanner = Scanner::new(config.scan_options()?);

        let verbose = self.verbose;
        let mut sink = |line: &str| {
            if verbose {
                eprintln!("{line}");
            }
        };

        let primary = scanner
            .scan(&roots.primary, &mut sink)
            .context("Failed to scan primary root")?
            .inventory;
        let secondary = scanner
            .scan(&roots.secondary, &mut sink)
            .context("Failed to scan secondary root")?
            .inventory;

        Ok(Workspace {
            roots,
            primary,
            secondary,
        })
    }

    /// Show, confirm and execute a plan
    pub fn run_plan(
        &self,
        planner: &ReconcilePlanner<'_>,
        actions: &[ReconcileAction],
    ) -> anyhow::Result<()> {
        for skipped in planner.skipped() {
            eprintln!(
                "Warning: skipping {} in {}: {}",
                skipped.name, skipped.category, skipped.error
            );
        }

        if actions.is_empty() {
            println!("Nothing to do");
            return Ok(());
        }

        if self.dry_run {
            ReconcileExecutor::new(true).execute(actions, &mut |line: &str| println!("{line}"))?;
            return Ok(());
        }

        print!("{}", SyncReporter::describe_plan(actions));

        if !self.yes && !Confirmer::confirm("Proceed?")? {
            println!("Cancelled, no changes made.");
            return Ok(());
        }

        let report = ReconcileExecutor::new(false)
            .execute(actions, &mut |line: &str| println!("{line}"))
            .context("Reconcile stopped")?;

        println!("{}", SyncReporter::generate_summary(&report));
        Ok(())
    }
}
