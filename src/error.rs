//! Error and diagnostic types.
//!
//! Two families live here:
//! - [`FatalError`]: conditions that stop the process before or instead of
//!   scanning, each mapped to its own exit code
//! - [`ScanWarning`]: non-fatal diagnostics raised while a root is scanned

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that halt the run. Everything else is contained per root or per entry.
#[derive(Debug, Error)]
pub enum FatalError {
    /// Bad invocation (no arguments, unknown option, malformed command line).
    /// Carries the rendered usage message.
    #[error("{0}")]
    InvalidUsage(String),

    #[error("Missing argument for -paths")]
    MissingPathsValue,

    #[error("Missing argument for -out")]
    MissingOutValue,

    #[error("-paths argument is required")]
    MissingPaths,

    #[error("-out argument is required")]
    MissingOut,

    #[error("Unable to create output directory \"{path}\": {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No paths provided after -paths")]
    EmptyPathList,
}

impl FatalError {
    /// Process exit code for this failure class. Codes are distinct per variant.
    pub fn exit_code(&self) -> u8 {
        match self {
            FatalError::InvalidUsage(_) => 10,
            FatalError::MissingPathsValue => 20,
            FatalError::MissingOutValue => 30,
            FatalError::MissingPaths => 40,
            FatalError::MissingOut => 50,
            FatalError::CreateOutputDir { .. } => 60,
            FatalError::EmptyPathList => 80,
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The root path does not exist.
    RootNotFound,
    /// The root exists but its metadata could not be read.
    RootUnreadable,
    /// A listed entry's metadata could not be read.
    EntryUnreadable,
    /// A directory could not be opened because access was denied.
    AccessDenied,
    /// A directory could not be opened for any other reason.
    OpenFailed,
    /// Listing a directory failed part-way through.
    EnumerationFailed,
    /// A row could not be written to the report.
    WriteFailed,
}

/// Non-fatal warning encountered during a scan.
#[derive(Debug, Clone)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    fn new(path: PathBuf, message: String, kind: WarningKind) -> Self {
        Self {
            path,
            message,
            kind,
        }
    }

    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let message = format!("Path \"{}\" not found or inaccessible", path.display());
        Self::new(path, message, WarningKind::RootNotFound)
    }

    pub fn root_unreadable(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        let path = path.into();
        let message = format!(
            "Unable to retrieve information for \"{}\": {error}",
            path.display()
        );
        Self::new(path, message, WarningKind::RootUnreadable)
    }

    pub fn entry_unreadable(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        let path = path.into();
        let message = format!(
            "Unable to retrieve information for \"{}\": {error}",
            path.display()
        );
        Self::new(path, message, WarningKind::EntryUnreadable)
    }

    pub fn access_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let message = format!("Access denied to directory \"{}\", skipping", path.display());
        Self::new(path, message, WarningKind::AccessDenied)
    }

    /// Includes the raw OS error code when one is available.
    pub fn open_failed(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        let path = path.into();
        let message = match error.raw_os_error() {
            Some(code) => format!(
                "Unable to open directory \"{}\" (Error {code}), skipping",
                path.display()
            ),
            None => format!(
                "Unable to open directory \"{}\" ({error}), skipping",
                path.display()
            ),
        };
        Self::new(path, message, WarningKind::OpenFailed)
    }

    pub fn enumeration_failed(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        let path = path.into();
        let message = format!("Listing failed in \"{}\": {error}", path.display());
        Self::new(path, message, WarningKind::EnumerationFailed)
    }

    pub fn write_failed(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        let path = path.into();
        let message = format!("Error writing info for \"{}\": {error}", path.display());
        Self::new(path, message, WarningKind::WriteFailed)
    }
}
