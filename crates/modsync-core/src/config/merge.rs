//! Configuration merging with precedence rules
//!
//! # Merging Semantics
//!
//! - **Roots and marker**: the highest-precedence file that sets a value
//!   wins; lower files only fill values left unset
//! - **Ignore patterns**: additive, all patterns from all files are combined
//!
//! Relative roots are resolved against the directory of the file that
//! names them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use super::discovery::ConfigFiles;
use super::types::Config;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple config files with precedence rules
    ///
    /// Precedence order (highest to lowest):
    /// 1. CLI config
    /// 2. `.modsync.toml`
    /// 3. Global config
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> anyhow::Result<Config> {
        let mut merged = Config::default();

        // Lowest precedence first, so later files override.
        for path in [&files.global, &files.project, &files.cli]
            .into_iter()
            .flatten()
        {
            Self::merge_into(&mut merged, path)?;
        }

        Ok(merged)
    }

    /// Load and merge a single config file into the existing config
    fn merge_into(base: &mut Config, path: &Path) -> anyhow::Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "loaded config file");

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        if let Some(primary) = config.primary {
            base.primary = Some(relative_to(dir, primary));
        }
        if let Some(secondary) = config.secondary {
            base.secondary = Some(relative_to(dir, secondary));
        }
        if config.category_marker.is_some() {
            base.category_marker = config.category_marker;
        }
        base.ignore.extend(config.ignore);

        Ok(())
    }
}

fn relative_to(dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_merge_empty_config() {
        let config = ConfigMerger::merge(&ConfigFiles::default()).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_merge_precedence() {
        let tmp = TempDir::new().unwrap();

        let global = tmp.path().join("global.toml");
        fs::write(
            &global,
            r#"
primary = "/global/primary"
secondary = "/global/secondary"
ignore = ["*.tmp"]
"#,
        )
        .unwrap();

        let project = tmp.path().join("project.toml");
        fs::write(
            &project,
            r#"
primary = "/project/primary"
ignore = ["*.log"]
"#,
        )
        .unwrap();

        let files = ConfigFiles {
            cli: None,
            project: Some(project),
            global: Some(global),
        };

        let config = ConfigMerger::merge(&files).unwrap();

        assert_eq!(config.primary, Some(PathBuf::from("/project/primary")));
        assert_eq!(config.secondary, Some(PathBuf::from("/global/secondary")));
        assert!(config.ignore.contains(&"*.tmp".to_string()));
        assert!(config.ignore.contains(&"*.log".to_string()));
    }

    #[test]
    fn test_merge_relative_root() {
        let tmp = TempDir::new().unwrap();
        let cli = tmp.path().join("modsync.toml");
        fs::write(&cli, r#"secondary = "usb/Mods""#).unwrap();

        let files = ConfigFiles {
            cli: Some(cli),
            ..ConfigFiles::default()
        };

        let config = ConfigMerger::merge(&files).unwrap();

        assert_eq!(config.secondary, Some(tmp.path().join("usb/Mods")));
    }

    #[test]
    fn test_merge_missing_file() {
        let tmp = TempDir::new().unwrap();
        let files = ConfigFiles {
            cli: Some(tmp.path().join("missing.toml")),
            ..ConfigFiles::default()
        };

        let err = ConfigMerger::merge(&files).unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_merge_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let cli = tmp.path().join("broken.toml");
        fs::write(&cli, "primary = [").unwrap();

        let files = ConfigFiles {
            cli: Some(cli),
            ..ConfigFiles::default()
        };

        let err = ConfigMerger::merge(&files).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
