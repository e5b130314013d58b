//! Benchmark matrix: scenarios, criteria, metrics, suppression values and
//! algorithms, and how each maps onto a synthetic checker.

use std::fmt;
use std::str::FromStr;

use anonbench_search::{Stepping, Strategy, TraversalPolicy, DEFAULT_CAPACITY};
use serde::Serialize;

use crate::error::HarnessError;
use crate::synthetic::{FeasibilityRule, LossModel, SyntheticChecker};

/// Suppression limits the matrix runs with.
pub const SUPPRESSION_VALUES: [f64; 2] = [0.0, 1.0];

/// Penalty the AECS stand-in adds on odd total levels.
pub const AECS_PENALTY: f64 = 0.5;

/// Privacy criteria. Each maps to a [`FeasibilityRule`] scaled to the
/// scenario's lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Criterion {
    KAnonymity,
    LDiversity,
    TCloseness,
    DPresence,
    RiskBased,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::KAnonymity,
        Criterion::LDiversity,
        Criterion::TCloseness,
        Criterion::DPresence,
        Criterion::RiskBased,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::KAnonymity => "k",
            Self::LDiversity => "l",
            Self::TCloseness => "t",
            Self::DPresence => "d",
            Self::RiskBased => "r",
        }
    }

    /// Feasibility rule on a lattice with the given heights.
    #[must_use]
    pub fn feasibility(self, heights: &[u32]) -> FeasibilityRule {
        let top: u32 = heights.iter().map(|h| h.saturating_sub(1)).sum();
        match self {
            Self::KAnonymity => FeasibilityRule::MinLevel((top / 3).max(1)),
            Self::LDiversity => FeasibilityRule::MinPerAttribute(
                heights.iter().map(|h| u32::from(*h > 1)).collect(),
            ),
            Self::TCloseness => FeasibilityRule::MinLevel(top / 2),
            Self::DPresence => FeasibilityRule::MinPerAttribute(
                heights
                    .iter()
                    .enumerate()
                    .map(|(i, h)| if i == 0 { h.saturating_sub(1) } else { 0 })
                    .collect(),
            ),
            Self::RiskBased => FeasibilityRule::MinLevel(top * 2 / 3),
        }
    }

    /// Combined rule for a criteria set: the strongest single rule when the
    /// set has one member, otherwise every attribute bound at once.
    #[must_use]
    pub fn combined(criteria: &[Criterion], heights: &[u32]) -> FeasibilityRule {
        match criteria {
            [] => FeasibilityRule::MinLevel(0),
            [single] => single.feasibility(heights),
            _ => {
                let min_level = criteria
                    .iter()
                    .filter_map(|c| match c.feasibility(heights) {
                        FeasibilityRule::MinLevel(n) => Some(n),
                        _ => None,
                    })
                    .max()
                    .unwrap_or(0);
                let per_attribute: Vec<u32> = (0..heights.len())
                    .map(|i| {
                        criteria
                            .iter()
                            .filter_map(|c| match c.feasibility(heights) {
                                FeasibilityRule::MinPerAttribute(levels) => levels.get(i).copied(),
                                _ => None,
                            })
                            .max()
                            .unwrap_or(0)
                    })
                    .collect();
                let level: u32 = per_attribute.iter().sum();
                if min_level > level {
                    FeasibilityRule::MinLevel(min_level)
                } else {
                    FeasibilityRule::MinPerAttribute(per_attribute)
                }
            }
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Criterion {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == name)
            .ok_or_else(|| HarnessError::UnknownCriterion { name: s.to_string() })
    }
}

/// The criteria sets of the matrix, one criterion each.
#[must_use]
pub fn privacy_criteria() -> Vec<Vec<Criterion>> {
    Criterion::ALL.into_iter().map(|c| vec![c]).collect()
}

/// Information-loss metrics a run is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetricKind {
    /// Average equivalence class size stand-in. Not monotonic.
    Aecs,
    /// Normalized generalization loss. Monotonic.
    Loss,
}

impl MetricKind {
    pub const ALL: [MetricKind; 2] = [MetricKind::Aecs, MetricKind::Loss];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Aecs => "AECS",
            Self::Loss => "Loss",
        }
    }

    /// Loss model on a lattice with the given heights. Each attribute is
    /// weighted by the inverse of its maximum level.
    #[must_use]
    pub fn loss_model(self, heights: &[u32]) -> LossModel {
        let weights: Vec<f64> = heights
            .iter()
            .map(|h| match h.saturating_sub(1) {
                0 => 0.0,
                max => 1.0 / f64::from(max),
            })
            .collect();
        match self {
            Self::Aecs => LossModel::Alternating {
                weights,
                penalty: AECS_PENALTY,
            },
            Self::Loss => LossModel::WeightedSum { weights },
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MetricKind {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(name))
            .ok_or_else(|| HarnessError::UnknownMetric { name: s.to_string() })
    }
}

/// The metric an algorithm steers its search with.
#[must_use]
pub fn decision_metric(algorithm: Strategy, metric: MetricKind, heights: &[u32]) -> LossModel {
    match algorithm {
        Strategy::Heurakles => metric.loss_model(heights),
        Strategy::ImprovedGreedy => LossModel::Height,
    }
}

/// A named lattice shape standing in for a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub name: String,
    /// Hierarchy height per attribute.
    pub heights: Vec<u32>,
}

impl Scenario {
    #[must_use]
    pub fn new(name: impl Into<String>, heights: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            heights,
        }
    }

    /// Built-in shapes, smallest first.
    #[must_use]
    pub fn presets() -> Vec<Scenario> {
        vec![
            Scenario::new("grid", vec![3, 3]),
            Scenario::new("narrow", vec![5, 2, 4, 3]),
            Scenario::new("wide", vec![3, 2, 4, 2, 3, 2, 5]),
        ]
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::new("grid", vec![3, 3])
    }
}

/// One benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkConfig {
    pub scenario: Scenario,
    pub criteria: Vec<Criterion>,
    pub metric: MetricKind,
    /// Allowed outlier fraction in `[0, 1]`.
    pub suppression: f64,
    pub algorithm: Strategy,
    pub capacity: usize,
    pub stepping: Stepping,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::default(),
            criteria: vec![Criterion::KAnonymity],
            metric: MetricKind::Loss,
            suppression: 0.0,
            algorithm: Strategy::Heurakles,
            capacity: DEFAULT_CAPACITY,
            stepping: Stepping::LatticeHeight,
        }
    }
}

impl BenchmarkConfig {
    /// Reject out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidConfig`] for an empty criteria set or a
    /// suppression value outside `[0, 1]`, and [`HarnessError::Search`] for an
    /// invalid traversal policy.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.criteria.is_empty() {
            return Err(HarnessError::InvalidConfig {
                detail: "criteria set must not be empty".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.suppression) {
            return Err(HarnessError::InvalidConfig {
                detail: format!("suppression {} outside [0, 1]", self.suppression),
            });
        }
        self.policy().validate()?;
        Ok(())
    }

    #[must_use]
    pub fn policy(&self) -> TraversalPolicy {
        TraversalPolicy {
            max_queue_size: self.capacity,
            stepping: self.stepping,
            ..self.algorithm.policy()
        }
    }

    /// Criteria rendered as in run labels, e.g. `[k]`.
    #[must_use]
    pub fn criteria_label(&self) -> String {
        let labels: Vec<&str> = self.criteria.iter().map(|c| c.label()).collect();
        format!("[{}]", labels.join(", "))
    }

    /// Whether the algorithm decides with the metric it is reported under.
    #[must_use]
    pub fn decides_with_benchmark_metric(&self) -> bool {
        decision_metric(self.algorithm, self.metric, &self.scenario.heights)
            == self.metric.loss_model(&self.scenario.heights)
    }

    /// Checker the traversal steers with.
    #[must_use]
    pub fn decision_checker(&self) -> SyntheticChecker {
        self.checker(decision_metric(
            self.algorithm,
            self.metric,
            &self.scenario.heights,
        ))
    }

    /// Checker scoring results under the benchmark metric.
    #[must_use]
    pub fn benchmark_checker(&self) -> SyntheticChecker {
        self.checker(self.metric.loss_model(&self.scenario.heights))
    }

    fn checker(&self, loss: LossModel) -> SyntheticChecker {
        SyntheticChecker::new(
            self.scenario.heights.len(),
            loss,
            Criterion::combined(&self.criteria, &self.scenario.heights),
        )
        .with_max_outliers(self.suppression)
    }
}

/// Every combination, nested criteria → scenario → metric → suppression →
/// algorithm.
#[must_use]
pub fn matrix(scenarios: &[Scenario], capacity: usize, stepping: Stepping) -> Vec<BenchmarkConfig> {
    let mut configs = Vec::new();
    for criteria in privacy_criteria() {
        for scenario in scenarios {
            for metric in MetricKind::ALL {
                for suppression in SUPPRESSION_VALUES {
                    for algorithm in Strategy::ALL {
                        configs.push(BenchmarkConfig {
                            scenario: scenario.clone(),
                            criteria: criteria.clone(),
                            metric,
                            suppression,
                            algorithm,
                            capacity,
                            stepping,
                        });
                    }
                }
            }
        }
    }
    configs
}
