//! Error types for the modsync engine

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias using the engine [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal engine errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A version string could not be ordered
    #[error(transparent)]
    VersionParse(#[from] VersionParseError),

    /// The root directory of a scan could not be listed
    #[error("Failed to read root directory {path}")]
    RootNotFound {
        /// Root that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A category directory could not be listed
    #[error("Failed to scan {path}")]
    Scan {
        /// Directory being listed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A copy or delete failed part way through a reconcile run
    #[error(
        "Failed to {operation} {} ({completed} of {planned} operations completed)",
        describe_paths(.path, .dest.as_ref())
    )]
    Filesystem {
        /// Operation that failed
        operation: Operation,
        /// Source path for copies, target path for deletes
        path: PathBuf,
        /// Destination path for copies
        dest: Option<PathBuf>,
        /// Operations that finished before the failure
        completed: usize,
        /// Operations in the plan
        planned: usize,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A copy target is already occupied
    #[error(
        "Refusing to copy {} to {}: destination already exists ({completed} of {planned} operations completed)",
        .origin.display(),
        .dest.display()
    )]
    DestinationExists {
        /// Copy source
        origin: PathBuf,
        /// Occupied destination
        dest: PathBuf,
        /// Operations that finished before the failure
        completed: usize,
        /// Operations in the plan
        planned: usize,
    },
}

impl Error {
    /// Number of planned operations that completed before this error, if
    /// the error came from a reconcile run
    #[must_use]
    pub const fn completed(&self) -> Option<usize> {
        match self {
            Self::Filesystem { completed, .. } | Self::DestinationExists { completed, .. } => {
                Some(*completed)
            }
            _ => None,
        }
    }
}

fn describe_paths(path: &std::path::Path, dest: Option<&PathBuf>) -> String {
    match dest {
        Some(dest) => format!("{} to {}", path.display(), dest.display()),
        None => path.display().to_string(),
    }
}

/// Filesystem operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Recursive copy
    Copy,
    /// Recursive delete
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => f.write_str("copy"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// A version string that cannot take part in ordering
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    /// Folder had no recognisable version
    #[error("empty version string")]
    Empty,

    /// A dot-separated component was empty, e.g. `1..2`
    #[error("version {version:?} has an empty component")]
    EmptyComponent {
        /// Offending version
        version: String,
    },

    /// A component was not an unsigned integer
    #[error("version {version:?} has non-numeric component {component:?}")]
    NotNumeric {
        /// Offending version
        version: String,
        /// Component that failed to parse
        component: String,
    },

    /// No versions were supplied
    #[error("no versions to compare")]
    NoVersions,
}

/// Non-fatal conditions met while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// The root holds no categories
    EmptyRoot {
        /// Scanned root
        root: PathBuf,
    },
    /// A category holds no mods
    EmptyCategory {
        /// Category name
        category: String,
    },
    /// A root-level entry is not a directory and cannot be a category
    NotADirectory {
        /// Offending path
        path: PathBuf,
    },
    /// An entry matched a configured ignore pattern
    Ignored {
        /// Path relative to the root
        relative: PathBuf,
    },
    /// Two folders in one category parse to the same name and version
    RepeatedVersion {
        /// Category name
        category: String,
        /// Folder that was not recorded
        folder: String,
    },
    /// An entry's size could not be fully measured
    Unreadable {
        /// Entry being measured
        path: PathBuf,
        /// Error description
        reason: String,
    },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRoot { root } => write!(f, "no mods found in {}", root.display()),
            Self::EmptyCategory { category } => write!(f, "no mods found in \"{category}\""),
            Self::NotADirectory { path } => {
                write!(f, "skipping {}: not a directory", path.display())
            }
            Self::Ignored { relative } => write!(f, "ignoring {}", relative.display()),
            Self::RepeatedVersion { category, folder } => {
                write!(f, "\"{folder}\" in \"{category}\" repeats an installed version")
            }
            Self::Unreadable { path, reason } => {
                write!(f, "could not measure {}: {reason}", path.display())
            }
        }
    }
}
