//! Console messages for finished roots and timing.
//!
//! Report contents never go to the terminal; these lines only tell the user
//! where each report landed and what it holds.

use crate::metrics::PhaseResult;
use crate::run::{RootOutcome, RootStatus};
use humansize::{DECIMAL, format_size};
use std::io::{self, Write};

/// Writes the outcome of one root.
///
/// A scanned root prints the report location followed by a one-line
/// summary, for example:
///
/// ```text
/// Output written to out/Data.csv
///   12 directories, 340 files, 1.20 GB, 0 warnings
/// ```
///
/// A root whose report could not be opened prints nothing here; the error
/// has already been logged.
pub fn render_root<W: Write>(out: &mut W, outcome: &RootOutcome) -> io::Result<()> {
    match &outcome.status {
        RootStatus::Scanned(summary) => {
            writeln!(out, "Output written to {}", outcome.report.display())?;
            writeln!(
                out,
                "  {} directories, {} files, {}, {} warnings",
                summary.directories,
                summary.files,
                format_size(summary.bytes, DECIMAL),
                summary.warnings.len()
            )
        }
        RootStatus::ReportFailed(_) => Ok(()),
    }
}

/// Writes the `-timeit` line with microsecond precision.
pub fn render_timing<W: Write>(out: &mut W, timing: &PhaseResult) -> io::Result<()> {
    writeln!(out, "Total execution time: {:.6} seconds", timing.seconds())
}
