//! Configuration validation and error reporting

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::Config;

/// Both roots, canonicalised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    /// Primary root
    pub primary: PathBuf,
    /// Secondary root
    pub secondary: PathBuf,
}

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(config: &Config) -> anyhow::Result<()> {
        let blank_marker = config
            .category_marker
            .as_deref()
            .is_some_and(|marker| !marker.is_empty() && marker.trim().is_empty());
        if blank_marker {
            anyhow::bail!("Category marker cannot be only whitespace");
        }

        for pattern in &config.ignore {
            if pattern.trim().is_empty() {
                anyhow::bail!("Ignore pattern cannot be empty");
            }
        }

        Ok(())
    }

    /// Check that both roots are set, exist and differ
    ///
    /// # Errors
    ///
    /// Returns an error if a root is missing, cannot be resolved, or both
    /// roots name the same directory.
    pub fn resolve_roots(config: &Config) -> anyhow::Result<Roots> {
        let primary = Self::canonical_root("primary", config.primary.as_deref())?;
        let secondary = Self::canonical_root("secondary", config.secondary.as_deref())?;

        if primary == secondary {
            anyhow::bail!(
                "Primary and secondary roots are the same directory: {}",
                primary.display()
            );
        }

        Ok(Roots { primary, secondary })
    }

    fn canonical_root(label: &str, path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = path.with_context(|| {
            format!("No {label} root configured (set `{label}` in .modsync.toml or pass --{label})")
        })?;

        dunce::canonicalize(path)
            .with_context(|| format!("Failed to resolve {label} root: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_empty_config() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_whitespace_marker() {
        let config = Config {
            category_marker: Some("   ".to_string()),
            ..Config::default()
        };

        let result = ConfigValidator::validate(&config);

        assert!(result.unwrap_err().to_string().contains("only whitespace"));
    }

    #[test]
    fn test_validate_empty_marker_allowed() {
        let config = Config {
            category_marker: Some(String::new()),
            ..Config::default()
        };

        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_pattern() {
        let mut config = Config::default();
        config.ignore.push("   ".to_string());

        let result = ConfigValidator::validate(&config);

        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_resolve_roots() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();

        let config = Config {
            primary: Some(tmp.path().join("a")),
            secondary: Some(tmp.path().join("b")),
            ..Config::default()
        };

        let roots = ConfigValidator::resolve_roots(&config).unwrap();

        assert!(roots.primary.ends_with("a"));
        assert!(roots.secondary.ends_with("b"));
    }

    #[test]
    fn test_resolve_roots_missing() {
        let err = ConfigValidator::resolve_roots(&Config::default()).unwrap_err();

        assert!(err.to_string().contains("No primary root configured"));
    }

    #[test]
    fn test_resolve_roots_same_directory() {
        let tmp = TempDir::new().unwrap();
        let config = Config {
            primary: Some(tmp.path().to_path_buf()),
            secondary: Some(tmp.path().join(".").join("")),
            ..Config::default()
        };

        let err = ConfigValidator::resolve_roots(&config).unwrap_err();

        assert!(err.to_string().contains("same directory"));
    }
}
