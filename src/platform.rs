//! Filesystem access used by the traversal engine.
//!
//! The engine only needs two primitives: stat a single path, and lazily list
//! the immediate children of a directory. [`FileSystem`] captures both so the
//! engine can run against the real disk ([`OsFileSystem`]) or a test double.
//!
//! Links are never followed for listing purposes. A link (or junction) that
//! points at a directory is reported as a directory and flagged as a reparse
//! point, which the engine lists but does not descend into.

use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Metadata for one filesystem object, as the OS reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMetadata {
    pub is_dir: bool,
    /// Symbolic link, junction or mount point.
    pub is_reparse_point: bool,
    pub len: u64,
    /// Device id, where the platform exposes one. Used to spot mount points.
    pub device: Option<u64>,
    pub created: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

/// One child produced while listing a directory.
///
/// `metadata` is fallible on its own: a child can vanish or become
/// unreadable between being listed and being inspected.
#[derive(Debug)]
pub struct DirChild {
    pub name: OsString,
    pub metadata: io::Result<RawMetadata>,
}

/// The two primitives the traversal engine consumes.
pub trait FileSystem {
    /// Lazy sequence of children. An `Err` item means fetching the next
    /// entry failed and the listing cannot continue.
    type Listing: Iterator<Item = io::Result<DirChild>>;

    fn stat(&self, path: &Path) -> io::Result<RawMetadata>;

    fn list_dir(&self, path: &Path) -> io::Result<Self::Listing>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    type Listing = OsListing;

    fn stat(&self, path: &Path) -> io::Result<RawMetadata> {
        let meta = fs::symlink_metadata(path)?;
        Ok(raw_metadata(path, &meta))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Self::Listing> {
        Ok(OsListing {
            inner: fs::read_dir(path)?,
        })
    }
}

/// Directory cursor over `std::fs::ReadDir`.
#[derive(Debug)]
pub struct OsListing {
    inner: fs::ReadDir,
}

impl Iterator for OsListing {
    type Item = io::Result<DirChild>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(err) => return Some(Err(err)),
        };
        let path = entry.path();
        // On Windows this comes straight from the find data without another call.
        let metadata = entry.metadata().map(|meta| raw_metadata(&path, &meta));
        Some(Ok(DirChild {
            name: entry.file_name(),
            metadata,
        }))
    }
}

fn timestamps(meta: &Metadata) -> (Option<SystemTime>, Option<SystemTime>, Option<SystemTime>) {
    (meta.created().ok(), meta.accessed().ok(), meta.modified().ok())
}

#[cfg(windows)]
fn raw_metadata(_path: &Path, meta: &Metadata) -> RawMetadata {
    use std::os::windows::fs::MetadataExt;
    use windows::Win32::Storage::FileSystem::{
        FILE_ATTRIBUTE_DIRECTORY, FILE_ATTRIBUTE_REPARSE_POINT,
    };

    let attributes = meta.file_attributes();
    let is_dir = attributes & FILE_ATTRIBUTE_DIRECTORY.0 != 0;
    let (created, accessed, modified) = timestamps(meta);
    RawMetadata {
        is_dir,
        is_reparse_point: attributes & FILE_ATTRIBUTE_REPARSE_POINT.0 != 0,
        len: if is_dir { 0 } else { meta.file_size() },
        device: None,
        created,
        accessed,
        modified,
    }
}

#[cfg(unix)]
fn raw_metadata(path: &Path, meta: &Metadata) -> RawMetadata {
    use std::os::unix::fs::MetadataExt;

    let (created, accessed, modified) = timestamps(meta);
    let mut raw = RawMetadata {
        is_dir: meta.is_dir(),
        is_reparse_point: false,
        len: meta.len(),
        device: Some(meta.dev()),
        created,
        accessed,
        modified,
    };

    if meta.file_type().is_symlink() {
        raw.is_reparse_point = true;
        // A link to a directory is a directory row; everything else stays a file.
        if let Ok(target) = fs::metadata(path) {
            if target.is_dir() {
                raw.is_dir = true;
                raw.device = Some(target.dev());
            }
        }
    }

    if raw.is_dir {
        raw.len = 0;
    }
    raw
}

#[cfg(not(any(unix, windows)))]
fn raw_metadata(_path: &Path, meta: &Metadata) -> RawMetadata {
    let (created, accessed, modified) = timestamps(meta);
    let is_dir = meta.is_dir();
    RawMetadata {
        is_dir,
        is_reparse_point: meta.file_type().is_symlink(),
        len: if is_dir { 0 } else { meta.len() },
        device: None,
        created,
        accessed,
        modified,
    }
}
