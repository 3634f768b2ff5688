//! Mod folder names carry a dotted `major.minor.patch` version somewhere in
//! the name, usually at the end and sometimes behind a category marker:
//! `CH F-16C Viper 2.1.0`. This module splits such a name into its parts
//! and orders versions numerically.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::VersionParseError;

/// Marker some mod authors put in front of the mod name
pub const CATEGORY_MARKER: &str = "CH ";

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").expect("version pattern is valid"));

/// A folder name split around its first `d.d.d` version token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FolderName {
    /// Text before the version
    pub prefix: String,
    /// The version token, empty if the name has none
    pub version: String,
    /// Text after the version
    pub suffix: String,
}

impl FolderName {
    /// Split a raw folder name
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match VERSION_PATTERN.find(raw) {
            Some(found) => Self {
                prefix: raw[..found.start()].to_string(),
                version: found.as_str().to_string(),
                suffix: raw[found.end()..].to_string(),
            },
            None => Self {
                prefix: raw.to_string(),
                version: String::new(),
                suffix: String::new(),
            },
        }
    }

    /// Folder name this mod would have at another version
    ///
    /// A name without a version token has nowhere to put one and is
    /// returned unchanged.
    #[must_use]
    pub fn with_version(&self, version: &str) -> String {
        if self.version.is_empty() {
            return self.to_string();
        }
        format!("{}{version}{}", self.prefix, self.suffix)
    }

    /// Mod name with the version and the leading `marker` removed
    #[must_use]
    pub fn canonical_name(&self, marker: &str) -> String {
        let prefix = self.prefix.trim_end();
        let suffix = self.suffix.trim_start();

        let joined = if prefix.is_empty() || suffix.is_empty() {
            format!("{prefix}{suffix}")
        } else {
            format!("{prefix} {suffix}")
        };

        let trimmed = joined.trim();
        let unmarked = if marker.is_empty() {
            trimmed
        } else {
            trimmed.strip_prefix(marker).unwrap_or(trimmed)
        };

        unmarked.trim().to_string()
    }
}

impl fmt::Display for FolderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.version, self.suffix)
    }
}

/// Split a raw folder name into its canonical mod name and version
///
/// The version is the first `d.d.d` match, or empty if there is none.
#[must_use]
pub fn parse_name_and_version(raw: &str) -> (String, String) {
    let folder = FolderName::parse(raw);
    let name = folder.canonical_name(CATEGORY_MARKER);
    (name, folder.version)
}

/// A dotted numeric version
///
/// Ordered component-wise as integers, so `1.10.0` is newer than `1.9.0`.
/// Versions with equal numbers but different text (`1.01.0`, `1.1.0`) are
/// ordered by their text to keep the ordering total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    components: Vec<u64>,
    raw: String,
}

impl Version {
    /// The version exactly as written
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric components
    #[must_use]
    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let components = s
            .split('.')
            .map(|component| {
                if component.is_empty() {
                    return Err(VersionParseError::EmptyComponent {
                        version: s.to_string(),
                    });
                }
                let not_numeric = || VersionParseError::NotNumeric {
                    version: s.to_string(),
                    component: component.to_string(),
                };
                if !component.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(not_numeric());
                }
                component.parse::<u64>().map_err(|_| not_numeric())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            components,
            raw: s.to_string(),
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components
            .cmp(&other.components)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Highest of a set of versions
///
/// Returns the winning input string as written. The result does not depend
/// on input order.
///
/// # Errors
///
/// Returns an error if the set is empty or any version is not a dotted list
/// of unsigned integers.
pub fn max_version<'a, I>(versions: I) -> Result<&'a str, VersionParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(Version, &'a str)> = None;

    for raw in versions {
        let version: Version = raw.parse()?;
        let newer = best.as_ref().is_none_or(|(current, _)| version > *current);
        if newer {
            best = Some((version, raw));
        }
    }

    best.map(|(_, raw)| raw).ok_or(VersionParseError::NoVersions)
}
