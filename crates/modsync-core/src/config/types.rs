//! Configuration types and structures

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::scanner::{EntryFilter, ScanOptions};
use crate::version::CATEGORY_MARKER;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Primary mod root, usually the game's saved-games directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<PathBuf>,

    /// Secondary mod root, usually on removable media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<PathBuf>,

    /// Marker stripped from the front of mod names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_marker: Option<String>,

    /// Gitignore-style patterns for categories and mods to leave alone
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Config {
    /// Effective category marker
    #[must_use]
    pub fn marker(&self) -> &str {
        self.category_marker.as_deref().unwrap_or(CATEGORY_MARKER)
    }

    /// Replace configured roots with the ones given on the command line
    #[must_use]
    pub fn with_overrides(mut self, primary: Option<PathBuf>, secondary: Option<PathBuf>) -> Self {
        if primary.is_some() {
            self.primary = primary;
        }
        if secondary.is_some() {
            self.secondary = secondary;
        }
        self
    }

    /// Scanner settings derived from this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an ignore pattern does not compile.
    pub fn scan_options(&self) -> anyhow::Result<ScanOptions> {
        Ok(ScanOptions {
            marker: self.marker().to_string(),
            filter: EntryFilter::with_patterns(&self.ignore)?,
            ..ScanOptions::default()
        })
    }
}
