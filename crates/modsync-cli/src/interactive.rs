//! Interactive confirmation for destructive runs

use anyhow::{Context, Result};
use dialoguer::Confirm;

/// Asks the user before a plan is executed
pub struct Confirmer;

impl Confirmer {
    /// Ask a yes/no question, defaulting to no
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be used for prompting.
    pub fn confirm(prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Failed to show prompt (use --yes when not running in a terminal)")
    }
}
