//! anonbench harness: fixtures, the benchmark matrix and the run driver.
//!
//! The harness does NOT implement search logic; it builds lattices and
//! checkers per configuration, delegates to `anonbench_search`, and
//! packages results as digest-stable reports.

#![forbid(unsafe_code)]

pub mod baseline;
pub mod canon;
pub mod error;
pub mod report;
pub mod runner;
pub mod setup;
pub mod synthetic;

pub use error::HarnessError;
pub use report::RunReport;
pub use runner::{run_benchmark, run_matrix, RunRecord, NO_SOLUTION};
pub use setup::{BenchmarkConfig, Criterion, MetricKind, Scenario};
pub use synthetic::{FeasibilityRule, LossModel, SyntheticChecker};
