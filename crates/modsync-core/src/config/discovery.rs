//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// Name of the per-directory config file
pub const PROJECT_FILE: &str = ".modsync.toml";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// `.modsync.toml` in the working directory or one of its parents
    pub project: Option<PathBuf>,
    /// `modsync/config.toml` in the user config directory
    pub global: Option<PathBuf>,
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files
    ///
    /// A path given on the command line is kept even if it does not exist,
    /// so that reading it reports the mistake.
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        let project = std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_project_file(&dir));

        ConfigFiles {
            cli: cli_path.map(Path::to_path_buf),
            project,
            global: Self::find_global_config(),
        }
    }

    /// Find `.modsync.toml` in `start` or one of its parent directories
    pub fn find_project_file(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Find the global config in the user config directory
    fn find_global_config() -> Option<PathBuf> {
        let global_config = dirs::config_dir()?.join("modsync").join("config.toml");
        global_config.is_file().then_some(global_config)
    }
}
