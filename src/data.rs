//! Data structures for representing report rows.
//!
//! This module defines the core data structures used throughout `rapidscan`
//! for describing files and directories discovered during traversal.

use crate::platform::RawMetadata;
use crate::utils::to_local_timestamp;
use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;

/// Represents a file or directory entry written to a report.
///
/// # Fields
/// * `path` - The full path of the entry as it was reached during traversal
/// * `kind` - Type of entry (file or directory)
/// * `size` - Size in bytes; always `Some(0)` for directories, `None` when unreadable
/// * `created` - Creation time in local time, whole seconds
/// * `accessed` - Last access time in local time, whole seconds
/// * `modified` - Last write time in local time, whole seconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size: Option<u64>,
    pub created: Option<LocalTimestamp>,
    pub accessed: Option<LocalTimestamp>,
    pub modified: Option<LocalTimestamp>,
}

impl EntryRecord {
    /// Builds the report row for an entry from the metadata the OS returned.
    ///
    /// Directories always report size `0`. Each timestamp is converted to
    /// local time on its own and left empty if it is unset or unconvertible.
    pub fn from_metadata(path: PathBuf, meta: &RawMetadata) -> Self {
        let (kind, size) = if meta.is_dir {
            (EntryKind::Directory, 0)
        } else {
            (EntryKind::File, meta.len)
        };
        Self {
            path,
            kind,
            size: Some(size),
            created: meta.created.and_then(to_local_timestamp),
            accessed: meta.accessed.and_then(to_local_timestamp),
            modified: meta.modified.and_then(to_local_timestamp),
        }
    }

    /// A `File` row carrying only the path, used when metadata could not be read.
    pub fn unreadable(path: PathBuf) -> Self {
        Self {
            path,
            kind: EntryKind::File,
            size: None,
            created: None,
            accessed: None,
            modified: None,
        }
    }
}

/// Represents the type of a reported entry.
///
/// # Variants
/// * `File` - Anything that is not a directory
/// * `Directory` - A directory, including directory links and mount points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Returns the string written to the report's `Type` column.
    ///
    /// # Returns
    /// * `"File"` for `EntryKind::File`
    /// * `"Directory"` for `EntryKind::Directory`
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "File",
            EntryKind::Directory => "Directory",
        }
    }
}

/// A wall-clock timestamp in local time, truncated to whole seconds.
///
/// Displays as `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalTimestamp(NaiveDateTime);

impl LocalTimestamp {
    pub fn new(datetime: NaiveDateTime) -> Self {
        use chrono::Timelike;
        Self(datetime.with_nanosecond(0).unwrap_or(datetime))
    }
}

impl fmt::Display for LocalTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}
