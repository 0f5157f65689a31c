//! Main entry point for the `rapidscan` CLI application.
//!
//! `rapidscan` walks one or more roots and writes a CSV inventory of every
//! file and directory it finds, one report per root.
//!
//! # Responsibilities
//! - Installs the `tracing` subscriber (filter from `RAPIDSCAN_LOG`)
//! - Parses CLI arguments via [`clap`] using [`rapidscan::parse_args`]
//! - Starts the optional `-timeit` timer and hands it to [`rapidscan::run`]
//! - Maps fatal errors to their exit codes
//!
//! Per-root and per-entry failures never change the exit code; once scanning
//! has been attempted the process exits 0.

use anyhow::{Context, Result};
use rapidscan::metrics::PhaseTimer;
use rapidscan::output::render_timing;
use rapidscan::{Invocation, OsFileSystem, parse_args, run};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RAPIDSCAN_LOG";

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("{err}"))
        .context("Failed to install log subscriber")
}

fn main() -> ExitCode {
    if let Err(err) = init_logging() {
        eprintln!("Warning: {err:#}");
    }

    let config = match parse_args(std::env::args_os()) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Display(info)) => {
            if let Err(err) = info.print() {
                eprintln!("Error: {err}");
            }
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(err.exit_code());
        }
    };

    // Start timing before any filesystem work, including output directory setup.
    let timer = config.timeit.then(|| PhaseTimer::new("total"));

    match run(&config, &OsFileSystem, timer) {
        Ok(summary) => {
            if let Some(timing) = &summary.timing {
                if let Err(err) = render_timing(&mut io::stdout().lock(), timing) {
                    eprintln!("Error: {err}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
