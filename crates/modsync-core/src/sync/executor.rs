//! Reconcile plan executor

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use super::ReconcileReport;
use super::actions::ReconcileAction;
use crate::error::{Error, Operation, Result};
use crate::status::StatusSink;

/// Executes reconcile actions in order
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileExecutor {
    dry_run: bool,
}

impl ReconcileExecutor {
    /// Create a new executor
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Execute a plan, stopping at the first failure
    ///
    /// A copy never writes into an existing path. In dry-run mode each
    /// action is only announced through the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationExists`] or [`Error::Filesystem`] with the
    /// number of actions that completed before the failure.
    pub fn execute(
        &self,
        actions: &[ReconcileAction],
        sink: &mut dyn StatusSink,
    ) -> Result<ReconcileReport> {
        let planned = actions.len();
        let mut report = ReconcileReport::default();

        for (completed, action) in actions.iter().enumerate() {
            if self.dry_run {
                sink.status(&format!("[DRY RUN] Would {action}"));
                continue;
            }

            sink.status(&action.to_string());
            Self::execute_one(action, completed, planned, &mut report)?;
            report.actions.push(action.clone());
        }

        info!(
            copied = report.copied,
            deleted = report.deleted,
            bytes = report.bytes_copied,
            dry_run = self.dry_run,
            "reconcile finished"
        );

        Ok(report)
    }

    fn execute_one(
        action: &ReconcileAction,
        completed: usize,
        planned: usize,
        report: &mut ReconcileReport,
    ) -> Result<()> {
        if let Some((source, dest)) = action.copy_paths() {
            if dest.symlink_metadata().is_ok() {
                return Err(Error::DestinationExists {
                    origin: source.to_path_buf(),
                    dest: dest.to_path_buf(),
                    completed,
                    planned,
                });
            }

            let bytes = copy_entry(source, dest).map_err(|source_err| Error::Filesystem {
                operation: Operation::Copy,
                path: source.to_path_buf(),
                dest: Some(dest.to_path_buf()),
                completed,
                planned,
                source: source_err,
            })?;

            debug!(source = %source.display(), dest = %dest.display(), bytes, "copied");
            report.copied += 1;
            report.bytes_copied += bytes;
        } else if let Some(path) = action.delete_path() {
            remove_entry(path).map_err(|source| Error::Filesystem {
                operation: Operation::Delete,
                path: path.to_path_buf(),
                dest: None,
                completed,
                planned,
                source,
            })?;

            debug!(path = %path.display(), "deleted");
            report.deleted += 1;
        }

        Ok(())
    }

    /// Copy a file or a directory tree without following symlinks
    ///
    /// Symlinks are recreated with their original target. Returns the number
    /// of bytes written by regular file copies.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry cannot be read or written, or if the tree
    /// holds something that is neither a file, a directory nor a symlink.
    pub fn copy_tree(source: &Path, dest: &Path) -> io::Result<u64> {
        let mut bytes = 0;

        for entry in WalkDir::new(source)
            .follow_links(false)
            .follow_root_links(false)
        {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(io::Error::other)?;
            let target = if relative.as_os_str().is_empty() {
                dest.to_path_buf()
            } else {
                dest.join(relative)
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                fs::create_dir_all(&target)?;
            } else if file_type.is_file() {
                bytes += fs::copy(entry.path(), &target)?;
            } else if file_type.is_symlink() {
                copy_symlink(entry.path(), &target)?;
            } else {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("cannot copy special file {}", entry.path().display()),
                ));
            }
        }

        Ok(bytes)
    }
}

/// Copy a mod folder, a lone mod file, or a whole category
fn copy_entry(source: &Path, dest: &Path) -> io::Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    ReconcileExecutor::copy_tree(source, dest)
}

#[cfg(unix)]
fn copy_symlink(link: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(link)?, dest)
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, _dest: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot copy symlink {}", link.display()),
    ))
}

fn remove_entry(path: &Path) -> io::Result<()> {
    if path.symlink_metadata()?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
