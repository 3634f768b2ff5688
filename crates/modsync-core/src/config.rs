//! Configuration file parsing, merging, and validation
//!
//! This module handles:
//! - Config file discovery from the CLI flag, the working tree and the user
//!   config directory
//! - TOML parsing with serde
//! - Config merging with precedence rules
//! - Validation of roots, marker and ignore patterns
//!
//! Settings are only ever read here.

mod discovery;
mod merge;
mod types;
mod validation;

#[cfg(test)]
mod integration_tests;

use std::path::Path;

pub use discovery::{ConfigDiscovery, ConfigFiles, PROJECT_FILE};
pub use merge::ConfigMerger;
pub use types::Config;
pub use validation::{ConfigValidator, Roots};

/// Coordinates discovery, parsing, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all sources
    ///
    /// Roots may still be unset afterwards; they are checked by
    /// [`ConfigValidator::resolve_roots`] once command line overrides have
    /// been applied.
    ///
    /// # Errors
    ///
    /// Returns an error if config files are invalid or cannot be read.
    pub fn load(cli_config_path: Option<&Path>) -> anyhow::Result<Config> {
        let files = ConfigDiscovery::discover(cli_config_path);
        let merged = ConfigMerger::merge(&files)?;
        ConfigValidator::validate(&merged)?;
        Ok(merged)
    }
}
