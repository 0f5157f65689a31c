//! CLI interface definitions for the `rapidscan` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes:
//!
//! - [`Args`]: the raw struct parsed from CLI inputs
//! - [`RunConfig`]: the validated configuration consumed by [`crate::run::run`]
//! - [`parse_args`]: argv in, [`Invocation`] or [`FatalError`] out
//!
//! The classic single-dash spellings (`-paths`, `-out`, `-timeit`, `-help`)
//! are accepted alongside the clap ones, as are `-?` and `/?`. Option names
//! and help flags match in any letter case.
//!
//! # Example
//!
//! ```bash
//! rapidscan -paths "C:\,D:\Projects" -out C:\Reports -timeit
//! rapidscan --paths /srv,/home --out ./reports
//! ```

use crate::error::FatalError;
use crate::naming::PathStyle;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Each root produces one report named after its last path component
(drive roots are named after the drive letter, e.g. C.csv). Roots that
share a name overwrite each other's report; the last one wins.

Examples:
  rapidscan -paths \"C:\\,D:\\Projects\" -out C:\\Reports -timeit
  rapidscan --paths /srv,/home --out ./reports

Set RAPIDSCAN_LOG (e.g. RAPIDSCAN_LOG=debug) to change diagnostic verbosity.";

/// Command-line arguments for the `rapidscan` inventory scanner.
///
/// `paths` and `out` take an optional value so that an option given without
/// one can be told apart from an option that is missing entirely. Repeating
/// an option keeps its last value.
#[derive(Parser, Debug)]
#[command(
    name = "rapidscan",
    version,
    about = "Write a CSV inventory of every file and directory under each root",
    after_help = AFTER_HELP,
    args_override_self = true
)]
pub struct Args {
    /// Comma-separated list of roots to scan
    #[arg(long, value_name = "LIST", num_args = 0..=1)]
    pub paths: Option<Option<String>>,

    /// Directory the reports are written to (created if missing)
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    pub out: Option<Option<PathBuf>>,

    /// Print the total execution time when done
    #[arg(long, default_value_t = false)]
    pub timeit: bool,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// The raw, comma-separated root list.
    pub paths: String,
    pub out_dir: PathBuf,
    pub timeit: bool,
    /// Separator and drive-root rules used to normalize roots.
    pub style: PathStyle,
}

impl TryFrom<Args> for RunConfig {
    type Error = FatalError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let paths = match args.paths {
            Some(Some(paths)) => paths,
            Some(None) => return Err(FatalError::MissingPathsValue),
            None => return Err(FatalError::MissingPaths),
        };
        let out_dir = match args.out {
            Some(Some(out)) => out,
            Some(None) => return Err(FatalError::MissingOutValue),
            None => return Err(FatalError::MissingOut),
        };
        Ok(Self {
            paths,
            out_dir,
            timeit: args.timeit,
            style: PathStyle::native(),
        })
    }
}

/// What the command line asked for.
#[derive(Debug)]
pub enum Invocation {
    Run(RunConfig),
    /// Help or version was requested; print it and exit successfully.
    Display(clap::Error),
}

/// Parses a full argv (program name first).
///
/// # Errors
/// * [`FatalError::InvalidUsage`] for an empty command line or anything clap rejects
/// * the missing-option and missing-value variants from [`RunConfig::try_from`]
pub fn parse_args<I, T>(argv: I) -> Result<Invocation, FatalError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let argv = normalize_argv(argv);
    if argv.len() <= 1 {
        let usage = Args::command().render_usage();
        return Err(FatalError::InvalidUsage(format!(
            "no arguments given\n\n{usage}\n\nFor more information, try '--help'."
        )));
    }

    match Args::try_parse_from(argv) {
        Ok(args) => RunConfig::try_from(args).map(Invocation::Run),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Ok(Invocation::Display(err)),
            _ => Err(FatalError::InvalidUsage(err.to_string().trim_end().to_string())),
        },
    }
}

/// Rewrites the single-dash spellings to the ones clap understands.
/// Everything else, including option values, passes through untouched.
pub fn normalize_argv<I, T>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    argv.into_iter()
        .map(Into::into)
        .map(|arg| match legacy_spelling(&arg) {
            Some(modern) => OsString::from(modern),
            None => arg,
        })
        .collect()
}

fn legacy_spelling(arg: &OsString) -> Option<&'static str> {
    let lower = arg.to_str()?.to_ascii_lowercase();
    match lower.as_str() {
        "-paths" => Some("--paths"),
        "-out" => Some("--out"),
        "-timeit" => Some("--timeit"),
        "--help" | "-help" | "-h" | "-?" | "/?" => Some("--help"),
        _ => None,
    }
}
