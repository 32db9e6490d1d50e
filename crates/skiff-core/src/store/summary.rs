//! Aggregate statistics over a directory listing.

use std::time::SystemTime;

use crate::fs::entry::FileEntry;

/// Counts, total size, and directory dates for the **currently visible**
/// entries of a listing.
///
/// The counted population is the filtered view: when hidden files are
/// excluded they are not counted here either, so toggling hidden-file
/// visibility changes the summary. The dates describe the listed directory
/// itself, not its children.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorySummary {
    /// Number of visible subdirectories.
    pub directory_count: usize,
    /// Number of visible files.
    pub file_count: usize,
    /// Sum of the visible files' sizes in bytes. Entries without a known
    /// size (directories, stat failures) contribute nothing.
    pub total_size: u64,
    /// Creation time of the directory, when the platform records one.
    pub created: Option<SystemTime>,
    /// Last-modified time of the directory.
    pub modified: Option<SystemTime>,
}

impl DirectorySummary {
    /// Computes a summary over the given (already filtered) entries.
    pub fn compute(
        visible: &[FileEntry],
        created: Option<SystemTime>,
        modified: Option<SystemTime>,
    ) -> Self {
        let directory_count = visible.iter().filter(|e| e.is_dir()).count();
        let file_count = visible.len() - directory_count;
        let total_size = visible.iter().filter_map(FileEntry::size).sum();

        Self {
            directory_count,
            file_count,
            total_size,
            created,
            modified,
        }
    }
}
