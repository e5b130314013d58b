//! Run driver: one traversal per benchmark configuration.
//!
//! # Pipeline
//!
//! ```text
//! validate() → lattice + decision checker → traverse()
//!   → optimum? re-score under the benchmark metric if it differs
//!   → RunRecord
//! ```

use anonbench_lattice::GeneralizationLattice;
use anonbench_search::{SearchEngine, SearchOutcome};
use serde::Serialize;
use tracing::info;

use crate::error::HarnessError;
use crate::report::RunReport;
use crate::setup::BenchmarkConfig;

/// Information loss text of a run without a solution.
pub const NO_SOLUTION: &str = "NoSolutionFound";

/// Result row of one run. Losses and suppression are text so the record
/// canonicalizes without floats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub algorithm: String,
    pub scenario: String,
    pub criteria: String,
    pub metric: String,
    pub suppression: String,
    /// Loss of the optimum under the benchmark metric, or [`NO_SOLUTION`].
    pub information_loss: String,
    pub transformation: Option<Vec<u32>>,
    pub checks: u64,
    pub rollups: u64,
    pub expansions: u64,
    pub dives: u64,
    pub pruned: u64,
    pub evicted: u64,
    pub frontier_high_water: u64,
    pub stepping: u32,
}

impl RunRecord {
    fn new(config: &BenchmarkConfig, outcome: &SearchOutcome, information_loss: String) -> Self {
        Self {
            algorithm: config.algorithm.name().to_string(),
            scenario: config.scenario.name.clone(),
            criteria: config.criteria_label(),
            metric: config.metric.label().to_string(),
            suppression: format!("{:?}", config.suppression),
            information_loss,
            transformation: outcome
                .optimum
                .as_ref()
                .map(|solution| solution.transformation.clone()),
            checks: outcome.checks,
            rollups: outcome.rollups,
            expansions: outcome.expansions,
            dives: outcome.dives,
            pruned: outcome.pruned,
            evicted: outcome.evicted,
            frontier_high_water: outcome.frontier_high_water as u64,
            stepping: outcome.stepping,
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.information_loss != NO_SOLUTION
    }
}

/// Run one configuration.
///
/// # Errors
///
/// Returns [`HarnessError`] for an invalid configuration or a failed
/// traversal.
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<RunRecord, HarnessError> {
    config.validate()?;
    let lattice = GeneralizationLattice::with_heights(&config.scenario.heights)?;
    let mut engine = SearchEngine::new(lattice, config.decision_checker(), config.policy())?;
    let outcome = engine.traverse()?;

    let information_loss = match &outcome.optimum {
        None => NO_SOLUTION.to_string(),
        Some(solution) if config.decides_with_benchmark_metric() => {
            solution.information_loss.to_string()
        }
        Some(solution) => {
            let lattice = GeneralizationLattice::with_heights(&config.scenario.heights)?;
            let mut scorer = SearchEngine::new(lattice, config.benchmark_checker(), config.policy())?;
            scorer
                .information_loss_of(&solution.transformation)?
                .to_string()
        }
    };

    info!(
        algorithm = config.algorithm.name(),
        scenario = %config.scenario.name,
        criteria = %config.criteria_label(),
        metric = config.metric.label(),
        suppression = config.suppression,
        information_loss = %information_loss,
        checks = outcome.checks,
        "run finished"
    );
    Ok(RunRecord::new(config, &outcome, information_loss))
}

/// Run every configuration in order and collect a report.
///
/// # Errors
///
/// Stops at the first failing run.
pub fn run_matrix(label: &str, configs: &[BenchmarkConfig]) -> Result<RunReport, HarnessError> {
    let records = configs
        .iter()
        .map(run_benchmark)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RunReport::new(label, records))
}
