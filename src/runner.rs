//! In-process driver: self-calibrating timed loop over registered cases.
//!
//! criterion is the main host (see `benches/hashing.rs`). This runner exists
//! for the places criterion cannot serve: a pass/fail signal per case and a
//! plain iteration/byte/time record that can be dumped as JSON.

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::{registry, BenchError, Case};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// A calibration round must last at least this long to be reported.
    pub min_time_ms: u64,
    /// Hard cap on iterations per round.
    pub max_iterations: u64,
    /// Substring filter on case names.
    pub filter: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_time_ms: 1_000,
            max_iterations: 1_000_000_000,
            filter: None,
        }
    }
}

impl RunnerConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn min_time(&self) -> Duration {
        Duration::from_millis(self.min_time_ms)
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Raw counts of the final calibration round of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Measurement {
    pub name: &'static str,
    pub iterations: u64,
    pub bytes_per_iter: u64,
    pub elapsed_ns: u64,
}

impl Measurement {
    /// Bytes per second.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_ns == 0 {
            return 0.0;
        }
        self.iterations as f64 * self.bytes_per_iter as f64 / (self.elapsed_ns as f64 / 1e9)
    }

    pub fn ns_per_iter(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed_ns as f64 / self.iterations as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub name: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub measurements: Vec<Measurement>,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Runs one case until a round lasts `min_time` (or hits the iteration
    /// cap), then checks its guard.
    pub fn run(&self, case: &Case) -> Result<Measurement, BenchError> {
        let target = self.config.min_time();
        let max = self.config.max_iterations.max(1);
        let mut session = case.session();
        let mut n = 1u64;

        loop {
            let start = Instant::now();
            for _ in 0..n {
                black_box(session.step()?);
            }
            let elapsed = start.elapsed();
            debug!(case = case.name, iterations = n, ?elapsed, "calibration round");

            if elapsed >= target || n >= max {
                let sum = session.finish()?;
                let measurement = Measurement {
                    name: case.name,
                    iterations: n,
                    bytes_per_iter: case.len() as u64,
                    elapsed_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
                };
                info!(
                    case = case.name,
                    iterations = n,
                    ns_per_iter = measurement.ns_per_iter(),
                    guard = sum,
                    "case finished"
                );
                return Ok(measurement);
            }
            n = next_iterations(n, elapsed, target, max);
        }
    }

    /// Runs the selected cases in order. A guard failure is recorded and the
    /// suite moves on; any other error stops the suite and is returned.
    pub fn run_suite(&self, cases: &[Case]) -> Result<Report, BenchError> {
        let mut report = Report::default();
        for case in registry::select(cases, self.config.filter.as_deref()) {
            match self.run(case) {
                Ok(measurement) => report.measurements.push(measurement),
                Err(err) if !err.is_fatal() => {
                    warn!(case = case.name, %err, "case failed");
                    report.failures.push(Failure {
                        name: case.name,
                        reason: err.to_string(),
                    });
                }
                Err(err) => {
                    error!(case = case.name, %err, "aborting run");
                    return Err(err);
                }
            }
        }
        Ok(report)
    }
}

/// Predicts the iteration count that fills `target`, padded by 20%, growing
/// at most 100x and at least by one per round.
fn next_iterations(n: u64, elapsed: Duration, target: Duration, max: u64) -> u64 {
    let prev = elapsed.as_nanos().max(1);
    let goal = target.as_nanos();
    let mut next = goal.saturating_mul(u128::from(n)) / prev;
    next += next / 5;
    let next = next
        .min(u128::from(n).saturating_mul(100))
        .max(u128::from(n) + 1);
    u64::try_from(next).unwrap_or(u64::MAX).min(max)
}
