//! Library crate for rapidscan
//!
//! This exposes the modules used by the binary, the integration tests and
//! the benchmark.
//!
//! # Features
//!
//! - **Inventory Scanning**: Walk every root depth-first with an explicit work stack
//! - **CSV Reports**: One report per root, one quoted row per file or directory
//! - **Contained Failures**: Unreadable entries and subtrees become warnings, not aborts
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions and validation
//! - [`data`]: Core data structures (`EntryRecord`, `EntryKind`, `LocalTimestamp`)
//! - [`error`]: Fatal errors with exit codes and per-entry warnings
//! - [`metrics`]: Phase timing for `-timeit`
//! - [`naming`]: Root normalization and report naming
//! - [`output`]: CSV report writer and terminal messages
//! - [`platform`]: Filesystem access behind the [`FileSystem`] trait
//! - [`run`]: Multi-root orchestration
//! - [`scan`]: The traversal engine
//! - [`utils`]: Timestamp conversion helpers

pub mod cli;
pub mod data;
pub mod error;
pub mod metrics;
pub mod naming;
pub mod output;
pub mod platform;
pub mod run;
pub mod scan;
pub mod utils;

pub use cli::{Args, Invocation, RunConfig, parse_args};
pub use data::{EntryKind, EntryRecord, LocalTimestamp};
pub use error::{FatalError, ScanWarning, WarningKind};
pub use naming::{NormalizedPath, PathStyle, derive_identity, normalize};
pub use platform::{FileSystem, OsFileSystem};
pub use run::{RootOutcome, RootStatus, RunSummary, run};
pub use scan::{RecordSink, ScanSummary, Scanner};
