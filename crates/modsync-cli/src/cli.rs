use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Versioned mod directory synchronization tool
///
/// Compare two mod roots, remove superseded duplicate versions and copy
/// whatever one side is missing
#[derive(Parser, Debug)]
#[command(name = "modsync")]
#[command(about, long_about = None, version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Preview changes without executing (dry-run)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the primary root
    #[arg(long, global = true, value_name = "PATH", env = "MODSYNC_PRIMARY")]
    pub primary: Option<PathBuf>,

    /// Override the secondary root
    #[arg(long, global = true, value_name = "PATH", env = "MODSYNC_SECONDARY")]
    pub secondary: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show installed mods per root and whether the roots are in sync
    Status,

    /// Display uniques, updates and duplicates of both roots
    Diff {
        /// Emit both classifications as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete every version but the newest of each duplicated mod
    Dedupe,

    /// Copy unique categories and mods to the root that lacks them
    Resolve {
        /// Also copy newer versions next to stale ones
        #[arg(long)]
        updates: bool,
    },

    /// Copy everything unique to one root into the other
    Push {
        /// Root that receives the copies
        #[arg(long, value_enum)]
        to: Side,

        /// Also delete what only the receiving root has
        #[arg(long)]
        delete_unique: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// The primary root
    Primary,
    /// The secondary root
    Secondary,
}
