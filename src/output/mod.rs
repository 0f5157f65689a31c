//! Output for the `rapidscan` application.
//!
//! - **CSV**: the per-root report files
//! - **Terminal**: short status lines printed once a root is finished

pub mod csv;
pub mod terminal;

pub use self::csv::CsvReport;
pub use self::terminal::{render_root, render_timing};
