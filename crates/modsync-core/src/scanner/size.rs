//! Recursive size measurement for one mod folder

use std::path::Path;

use walkdir::WalkDir;

/// Bytes counted under one entry plus anything that could not be read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasuredSize {
    /// Sum of regular file lengths
    pub bytes: u64,
    /// Descriptions of entries that could not be read
    pub errors: Vec<String>,
}

/// Sum the length of every regular file under `path`
///
/// Symlinks are not followed. A path that is itself a regular file counts
/// its own length. Unreadable entries are skipped and reported in
/// [`MeasuredSize::errors`].
#[must_use]
pub fn measure(path: &Path) -> MeasuredSize {
    let mut measured = MeasuredSize::default();

    for entry in WalkDir::new(path)
        .follow_links(false)
        .follow_root_links(false)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                measured.errors.push(e.to_string());
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => measured.bytes += metadata.len(),
            Err(e) => measured.errors.push(e.to_string()),
        }
    }

    measured
}
