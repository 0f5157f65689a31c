//! Timing utilities for the `-timeit` option.
//!
//! This module provides:
//! - [`PhaseTimer`] - A wrapper around `Instant` for timing a named phase
//! - [`PhaseResult`] - The finished measurement
//!
//! The timer is a plain value: the caller starts it, hands it to
//! [`crate::run::run`], and gets the finished [`PhaseResult`] back in the
//! run summary.
//!
//! # Usage
//!
//! ```rust
//! use rapidscan::metrics::PhaseTimer;
//!
//! let timer = PhaseTimer::new("total");
//! // ... do work ...
//! let result = timer.finish();
//! assert_eq!(result.name, "total");
//! ```

use std::time::{Duration, Instant};

/// A timer for measuring the duration of a specific phase or operation.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    /// The name of the phase being timed
    pub name: String,
    /// The start time of the phase
    pub start: Instant,
}

impl PhaseTimer {
    /// Creates a new timer and starts timing the specified phase.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    /// Finishes timing the phase and returns the elapsed duration.
    pub fn finish(self) -> PhaseResult {
        PhaseResult {
            name: self.name,
            duration: self.start.elapsed(),
        }
    }
}

/// The result of a completed phase timing operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseResult {
    /// The name of the phase that was timed
    pub name: String,
    /// The duration of the phase
    pub duration: Duration,
}

impl PhaseResult {
    /// Elapsed time in seconds, with sub-microsecond precision.
    pub fn seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}
