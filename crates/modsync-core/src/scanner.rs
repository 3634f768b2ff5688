//! Directory scanning for mod roots
//!
//! A root holds one directory per category, and each category holds one
//! entry per installed mod version:
//!
//! ```text
//! root/
//!   aircraft/
//!     CH F-16C Viper 2.1.0/
//!     CH F-16C Viper 2.0.0/
//!   terrain/
//!     Marianas Extras 1.0.0/
//! ```
//!
//! Only the two top levels are listed; each mod entry is then measured
//! recursively.

mod filters;
mod size;


use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use filters::EntryFilter;
pub use size::{MeasuredSize, measure};
use tracing::{debug, info, warn};

use crate::error::{Error, Result, ScanWarning};
use crate::model::{Inventory, Mod};
use crate::status::StatusSink;
use crate::version::CATEGORY_MARKER;

/// Settings that shape a scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Marker stripped from the front of mod names
    pub marker: String,
    /// Entries whose name starts with this are hidden
    pub hidden_prefix: String,
    /// Configured ignore patterns
    pub filter: EntryFilter,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            marker: CATEGORY_MARKER.to_string(),
            hidden_prefix: ".".to_string(),
            filter: EntryFilter::new(),
        }
    }
}

/// Result of a scan with any non-fatal warnings
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Complete inventory of the root
    pub inventory: Inventory,
    /// Warnings encountered while scanning
    pub warnings: Vec<ScanWarning>,
}

impl ScanOutcome {
    /// Whether the root held no categories
    #[must_use]
    pub fn found_nothing(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ScanWarning::EmptyRoot { .. }))
    }
}

/// A visible entry of a listed directory
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Main scanner coordinator
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    /// Create a new scanner with the given options
    #[must_use]
    pub const fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Options this scanner was built with
    #[must_use]
    pub const fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Build a complete inventory of `root`
    ///
    /// Empty roots and empty categories are reported as warnings, not
    /// errors. Every call produces a fresh inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the root or one of its categories cannot be
    /// listed.
    pub fn scan(&self, root: &Path, sink: &mut dyn StatusSink) -> Result<ScanOutcome> {
        let mut inventory = Inventory::new(root);
        let mut warnings = Vec::new();

        sink.status(&format!("scanning {}", root.display()));

        let entries = self
            .list(root, root, &mut warnings, sink)
            .map_err(|source| Error::RootNotFound {
                path: root.to_path_buf(),
                source,
            })?;

        let mut categories = Vec::new();
        for entry in entries {
            if entry.is_dir {
                categories.push(entry);
            } else {
                Self::report(
                    &mut warnings,
                    sink,
                    ScanWarning::NotADirectory { path: entry.path },
                );
            }
        }

        if categories.is_empty() {
            Self::report(
                &mut warnings,
                sink,
                ScanWarning::EmptyRoot {
                    root: root.to_path_buf(),
                },
            );
            return Ok(ScanOutcome {
                inventory,
                warnings,
            });
        }

        for category in categories {
            self.scan_category(root, &category, &mut inventory, &mut warnings, sink)?;
        }

        let stats = inventory.stats();
        info!(
            root = %root.display(),
            categories = stats.categories,
            mods = stats.mods,
            versions = stats.versions,
            bytes = stats.total_bytes,
            "scan complete"
        );

        Ok(ScanOutcome {
            inventory,
            warnings,
        })
    }

    fn scan_category(
        &self,
        root: &Path,
        category: &Entry,
        inventory: &mut Inventory,
        warnings: &mut Vec<ScanWarning>,
        sink: &mut dyn StatusSink,
    ) -> Result<()> {
        let entries = self
            .list(root, &category.path, warnings, sink)
            .map_err(|source| Error::Scan {
                path: category.path.clone(),
                source,
            })?;

        inventory.ensure_category(&category.name);

        if entries.is_empty() {
            Self::report(
                warnings,
                sink,
                ScanWarning::EmptyCategory {
                    category: category.name.clone(),
                },
            );
            return Ok(());
        }

        for entry in entries {
            let mut installed = Mod::parse(&entry.name, &self.options.marker);

            let measured = measure(&entry.path);
            for reason in measured.errors {
                Self::report(
                    warnings,
                    sink,
                    ScanWarning::Unreadable {
                        path: entry.path.clone(),
                        reason,
                    },
                );
            }
            installed.size_bytes = measured.bytes;

            debug!(
                category = %category.name,
                name = %installed.name,
                version = %installed.version,
                bytes = installed.size_bytes,
                "found mod"
            );

            if !inventory.insert(&category.name, installed) {
                Self::report(
                    warnings,
                    sink,
                    ScanWarning::RepeatedVersion {
                        category: category.name.clone(),
                        folder: entry.name,
                    },
                );
            }
        }

        Ok(())
    }

    /// List the visible entries of `dir`, sorted by name
    ///
    /// Ignore patterns are matched against paths relative to `root`.
    fn list(
        &self,
        root: &Path,
        dir: &Path,
        warnings: &mut Vec<ScanWarning>,
        sink: &mut dyn StatusSink,
    ) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            let Ok(name) = entry.file_name().into_string() else {
                Self::report(
                    warnings,
                    sink,
                    ScanWarning::Unreadable {
                        path,
                        reason: "name is not valid UTF-8".to_string(),
                    },
                );
                continue;
            };

            if self.is_hidden(&name) {
                continue;
            }

            let is_dir = path.is_dir();
            let relative = path.strip_prefix(root).unwrap_or(&path);
            if self.options.filter.is_ignored(relative, is_dir) {
                Self::report(
                    warnings,
                    sink,
                    ScanWarning::Ignored {
                        relative: relative.to_path_buf(),
                    },
                );
                continue;
            }

            entries.push(Entry { name, path, is_dir });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn is_hidden(&self, name: &str) -> bool {
        let prefix = self.options.hidden_prefix.as_str();
        !prefix.is_empty() && name.starts_with(prefix)
    }

    fn report(warnings: &mut Vec<ScanWarning>, sink: &mut dyn StatusSink, warning: ScanWarning) {
        warn!(%warning, "scan warning");
        sink.status(&warning.to_string());
        warnings.push(warning);
    }
}

/// Scan `root` with default options
///
/// # Errors
///
/// Returns an error if the root or one of its categories cannot be listed.
pub fn scan(root: &Path, sink: &mut dyn StatusSink) -> Result<Inventory> {
    Scanner::default().scan(root, sink).map(|outcome| outcome.inventory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ScanOptions::default();
        assert_eq!(options.marker, "CH ");
        assert_eq!(options.hidden_prefix, ".");
    }
}
