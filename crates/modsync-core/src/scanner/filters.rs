//! Gitignore-style filtering of categories and mod folders

use std::path::Path;

use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Excludes entries matching configured ignore patterns
///
/// Patterns are matched against paths relative to the scanned root, so
/// `skins` names a category and `skins/Old*` names mods inside it.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    gitignore: Option<Gitignore>,
}

impl EntryFilter {
    /// A filter that excludes nothing
    #[must_use]
    pub const fn new() -> Self {
        Self { gitignore: None }
    }

    /// Build a filter from ignore patterns
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is invalid.
    pub fn with_patterns(patterns: &[String]) -> anyhow::Result<Self> {
        if patterns.is_empty() {
            return Ok(Self::new());
        }

        let mut builder = GitignoreBuilder::new("");
        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .with_context(|| format!("Invalid ignore pattern: '{pattern}'"))?;
        }

        let gitignore = builder.build().context("Failed to compile ignore patterns")?;

        Ok(Self {
            gitignore: Some(gitignore),
        })
    }

    /// Whether the entry at `relative` should be skipped
    #[must_use]
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        self.gitignore
            .as_ref()
            .is_some_and(|gi| gi.matched(relative, is_dir).is_ignore())
    }
}
