//! Traversal engine for `rapidscan`.
//!
//! This module handles:
//! - Stat'ing a root and writing its own row
//! - Depth-first listing of every descendant, one row per entry, in the
//!   order the filesystem returns them
//! - Skipping descent into reparse points (links, junctions, mount points)
//! - Containing failures to the subtree or entry where they happen
//!
//! The walk keeps an explicit stack of open directory cursors rather than
//! recursing, so tree depth costs heap frames, not call-stack frames. Rows are
//! handed to a [`RecordSink`] as soon as they are built; nothing is
//! accumulated in memory.
//!
//! The main entry point is [`Scanner::scan`].

use crate::data::{EntryKind, EntryRecord};
use crate::error::ScanWarning;
use crate::platform::{DirChild, FileSystem, RawMetadata};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Destination for report rows.
pub trait RecordSink {
    fn write_record(&mut self, record: &EntryRecord) -> io::Result<()>;
}

impl RecordSink for Vec<EntryRecord> {
    fn write_record(&mut self, record: &EntryRecord) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// What happened while scanning one root.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub files: u64,
    pub directories: u64,
    /// Sum of reported file sizes.
    pub bytes: u64,
    /// Rows the sink accepted.
    pub rows_written: u64,
    pub warnings: Vec<ScanWarning>,
}

impl ScanSummary {
    pub fn entries(&self) -> u64 {
        self.files + self.directories
    }
}

/// Creates the terminal spinner shown while a root is scanned.
///
/// # Errors
/// Returns an error if the progress template is rejected.
pub fn spinner(root: &Path) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✔"])
            .template("{spinner} Scanning {msg}... {pos} entries [{elapsed}]")
            .context("Failed to set progress template")?,
    );
    pb.set_message(root.display().to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// One open directory on the walk stack.
struct Frame<L> {
    path: PathBuf,
    device: Option<u64>,
    listing: L,
}

/// Per-scan bookkeeping: the sink, running totals and diagnostics.
struct Emitter<'a, S> {
    sink: &'a mut S,
    progress: &'a ProgressBar,
    summary: ScanSummary,
}

impl<S: RecordSink> Emitter<'_, S> {
    fn emit(&mut self, record: EntryRecord) {
        match record.kind {
            EntryKind::Directory => self.summary.directories += 1,
            EntryKind::File => {
                self.summary.files += 1;
                self.summary.bytes = self
                    .summary
                    .bytes
                    .saturating_add(record.size.unwrap_or(0));
            }
        }
        match self.sink.write_record(&record) {
            Ok(()) => self.summary.rows_written += 1,
            Err(err) => self.warn(ScanWarning::write_failed(&record.path, &err)),
        }
        self.progress.inc(1);
    }

    fn warn(&mut self, warning: ScanWarning) {
        // Keep log lines from tearing the spinner.
        self.progress.suspend(|| warn!("{}", warning.message));
        self.summary.warnings.push(warning);
    }
}

/// Depth-first, single-threaded scanner over a [`FileSystem`].
pub struct Scanner<'a, F> {
    fs: &'a F,
    progress: ProgressBar,
}

impl<'a, F: FileSystem> Scanner<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports each written row on `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Scans `root` and streams its rows into `sink`.
    ///
    /// Never fails: every problem is logged, recorded in the returned
    /// summary, and confined to the root, subtree or entry it concerns.
    ///
    /// # Behavior
    /// * Missing root: a warning and no rows
    /// * Root whose metadata cannot be read: a warning and a `File` row with empty fields
    /// * File root: its row only
    /// * Directory root: its row, then every reachable descendant
    pub fn scan<S: RecordSink>(&self, root: &Path, sink: &mut S) -> ScanSummary {
        let mut out = Emitter {
            sink,
            progress: &self.progress,
            summary: ScanSummary::default(),
        };

        match self.fs.stat(root) {
            Ok(meta) => {
                out.emit(EntryRecord::from_metadata(root.to_path_buf(), &meta));
                if meta.is_dir {
                    self.walk(root, meta.device, &mut out);
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                out.warn(ScanWarning::root_not_found(root));
            }
            Err(err) => {
                out.warn(ScanWarning::root_unreadable(root, &err));
                out.emit(EntryRecord::unreadable(root.to_path_buf()));
            }
        }

        out.summary
    }

    fn walk<S: RecordSink>(&self, root: &Path, device: Option<u64>, out: &mut Emitter<'_, S>) {
        let mut stack: Vec<Frame<F::Listing>> = Vec::new();
        if let Some(frame) = self.open(root.to_path_buf(), device, out) {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let child = match frame.listing.next() {
                Some(Ok(child)) => child,
                Some(Err(err)) => {
                    out.warn(ScanWarning::enumeration_failed(&frame.path, &err));
                    stack.pop();
                    continue;
                }
                None => {
                    stack.pop();
                    continue;
                }
            };

            let DirChild { name, metadata } = child;
            if name == "." || name == ".." {
                continue;
            }
            let parent_device = frame.device;
            let path = frame.path.join(&name);

            let meta = match metadata {
                Ok(meta) => meta,
                Err(err) if is_vanished(&err) => {
                    debug!("{} vanished during listing", path.display());
                    continue;
                }
                Err(err) => {
                    out.warn(ScanWarning::entry_unreadable(&path, &err));
                    out.emit(EntryRecord::unreadable(path));
                    continue;
                }
            };

            out.emit(EntryRecord::from_metadata(path.clone(), &meta));

            if !meta.is_dir {
                continue;
            }
            if is_boundary(parent_device, &meta) {
                debug!("Not descending into reparse point {}", path.display());
                continue;
            }
            if let Some(frame) = self.open(path, meta.device, out) {
                stack.push(frame);
            }
        }
    }

    /// Opens a directory cursor, classifying failures.
    fn open<S: RecordSink>(
        &self,
        path: PathBuf,
        device: Option<u64>,
        out: &mut Emitter<'_, S>,
    ) -> Option<Frame<F::Listing>> {
        match self.fs.list_dir(&path) {
            Ok(listing) => Some(Frame {
                path,
                device,
                listing,
            }),
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                out.warn(ScanWarning::access_denied(&path));
                None
            }
            Err(err) if is_vanished(&err) => {
                debug!("{} vanished before it could be listed", path.display());
                None
            }
            Err(err) => {
                out.warn(ScanWarning::open_failed(&path, &err));
                None
            }
        }
    }
}

/// Not found, or a path component is no longer a directory.
fn is_vanished(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

/// A directory the walk lists but must not enter.
fn is_boundary(parent_device: Option<u64>, meta: &RawMetadata) -> bool {
    if meta.is_reparse_point {
        return true;
    }
    matches!((parent_device, meta.device), (Some(parent), Some(child)) if parent != child)
}
