//! Multi-root orchestration.
//!
//! [`run`] ensures the output directory exists, splits the root list, and
//! scans every root into its own report. Roots are independent: a root that
//! cannot be opened, read or written is logged and the next root proceeds.
//! Only [`FatalError`]s stop the run.

use crate::cli::RunConfig;
use crate::error::FatalError;
use crate::metrics::{PhaseResult, PhaseTimer};
use crate::naming::{NormalizedPath, derive_identity, normalize, split_roots};
use crate::output::csv::{CsvReport, report_path};
use crate::output::terminal;
use crate::platform::FileSystem;
use crate::scan::{ScanSummary, Scanner, spinner};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Result of processing one root.
#[derive(Debug)]
pub struct RootOutcome {
    pub root: NormalizedPath,
    pub report: PathBuf,
    pub status: RootStatus,
}

#[derive(Debug)]
pub enum RootStatus {
    /// The report was written; individual entries may still have failed.
    Scanned(ScanSummary),
    /// The report could not be opened, so the root was not scanned.
    ReportFailed(String),
}

/// Everything a finished run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub roots: Vec<RootOutcome>,
    /// Present when a timer was passed to [`run`].
    pub timing: Option<PhaseResult>,
}

/// Scans every root named in `config.paths`.
///
/// `timer`, when given, is finished once the last root is done and returned
/// in the summary.
///
/// # Errors
/// * [`FatalError::CreateOutputDir`] if the output directory cannot be created
/// * [`FatalError::EmptyPathList`] if the root list holds no tokens at all
pub fn run<F: FileSystem>(
    config: &RunConfig,
    fs: &F,
    timer: Option<PhaseTimer>,
) -> Result<RunSummary, FatalError> {
    ensure_output_dir(&config.out_dir)?;

    let tokens = split_roots(&config.paths);
    if tokens.is_empty() {
        return Err(FatalError::EmptyPathList);
    }

    info!("Scanning {} root(s) into {}", tokens.len(), config.out_dir.display());

    let mut summary = RunSummary::default();
    for token in tokens {
        let Some(root) = normalize(token, config.style) else {
            debug!("Skipping empty root token {token:?}");
            continue;
        };
        let outcome = scan_root(root, &config.out_dir, fs);
        if let Err(err) = terminal::render_root(&mut io::stdout().lock(), &outcome) {
            debug!("Could not write root summary to stdout: {err}");
        }
        summary.roots.push(outcome);
    }

    summary.timing = timer.map(PhaseTimer::finish);
    Ok(summary)
}

/// Creates `out_dir` (and any missing parents) unless it already exists.
pub fn ensure_output_dir(out_dir: &Path) -> Result<(), FatalError> {
    if out_dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(out_dir).map_err(|source| FatalError::CreateOutputDir {
        path: out_dir.to_path_buf(),
        source,
    })
}

/// Opens the root's report, scans into it and closes it.
///
/// A later root with the same identity overwrites this report.
fn scan_root<F: FileSystem>(root: NormalizedPath, out_dir: &Path, fs: &F) -> RootOutcome {
    let report = report_path(out_dir, &derive_identity(&root));
    let status = match write_report(&root, &report, fs) {
        Ok(summary) => RootStatus::Scanned(summary),
        Err(err) => {
            error!("{err:#}");
            RootStatus::ReportFailed(format!("{err:#}"))
        }
    };
    RootOutcome {
        root,
        report,
        status,
    }
}

fn write_report<F: FileSystem>(
    root: &NormalizedPath,
    report_path: &Path,
    fs: &F,
) -> Result<ScanSummary> {
    let mut report = CsvReport::create(report_path)?;

    let progress = spinner(root.as_path()).unwrap_or_else(|err| {
        debug!("Progress display disabled: {err:#}");
        ProgressBar::hidden()
    });
    let summary = Scanner::new(fs)
        .with_progress(progress.clone())
        .scan(root.as_path(), &mut report);
    progress.finish_and_clear();

    // Flush and close errors are reported but do not discard the scan.
    if let Err(err) = report
        .finish()
        .with_context(|| format!("Error flushing output file '{}'", report_path.display()))
    {
        error!("{err:#}");
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::PathStyle;
    use crate::platform::OsFileSystem;
    use tempfile::TempDir;

    fn config(paths: &str, out_dir: &Path) -> RunConfig {
        RunConfig {
            paths: paths.to_string(),
            out_dir: out_dir.to_path_buf(),
            timeit: false,
            style: PathStyle::native(),
        }
    }

    #[test]
    fn test_empty_path_list_is_fatal() {
        let out = TempDir::new().unwrap();
        let err = run(&config(",,", out.path()), &OsFileSystem, None).unwrap_err();
        assert!(matches!(err, FatalError::EmptyPathList));
    }

    #[test]
    fn test_output_dir_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("reports").join("nested");
        let root = temp_dir.path().join("data");
        fs::create_dir(&root).unwrap();

        let summary = run(
            &config(&root.to_string_lossy(), &out),
            &OsFileSystem,
            None,
        )
        .unwrap();

        assert!(out.is_dir());
        assert!(out.join("data.csv").is_file());
        assert_eq!(summary.roots.len(), 1);
    }

    #[test]
    fn test_output_dir_that_is_a_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("occupied");
        fs::write(&out, "not a directory").unwrap();

        let err = run(&config("x", &out), &OsFileSystem, None).unwrap_err();
        assert_eq!(err.exit_code(), 60);
    }

    #[test]
    fn test_timer_is_returned_finished() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("data");
        fs::create_dir(&root).unwrap();
        let out = temp_dir.path().join("out");

        let summary = run(
            &config(&root.to_string_lossy(), &out),
            &OsFileSystem,
            Some(PhaseTimer::new("total")),
        )
        .unwrap();

        assert_eq!(summary.timing.map(|t| t.name), Some("total".to_string()));
    }

    #[test]
    fn test_whitespace_tokens_produce_no_report() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("out");

        let summary = run(&config(" , \t", &out), &OsFileSystem, None).unwrap();

        assert!(summary.roots.is_empty());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_unopenable_report_skips_to_next_root() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("a");
        let second = temp_dir.path().join("b");
        fs::create_dir(&first).unwrap();
        fs::create_dir(&second).unwrap();
        let out = temp_dir.path().join("out");
        // A directory where the first report should go makes it unopenable.
        fs::create_dir_all(out.join("a.csv")).unwrap();
        let paths = format!("{},{}", first.display(), second.display());

        let summary = run(&config(&paths, &out), &OsFileSystem, None).unwrap();

        assert_eq!(summary.roots.len(), 2);
        match &summary.roots[0].status {
            RootStatus::ReportFailed(message) => {
                assert!(message.contains("Cannot open output file"))
            }
            other => panic!("first root should have failed, got {other:?}"),
        }
        assert!(matches!(summary.roots[1].status, RootStatus::Scanned(_)));
        assert!(out.join("b.csv").is_file());
        assert!(out.join("a.csv").is_dir());
    }
}
