//! A deterministic in-memory checker for benchmarks and tests.
//!
//! Feasibility and loss are pure functions of the transformation, so any
//! traversal can be compared with the exhaustive baseline.

use std::collections::HashMap;

use anonbench_lattice::InformationLoss;
use anonbench_search::{CheckMode, CheckResult, Checker, CheckerError, StorageTrigger};

/// How information loss is computed from generalization levels.
#[derive(Debug, Clone, PartialEq)]
pub enum LossModel {
    /// `Σ weight[i] · level[i]`. Monotonic for non-negative weights.
    WeightedSum { weights: Vec<f64> },
    /// Weighted sum plus `penalty` on transformations whose total level is
    /// odd. Not monotonic.
    Alternating { weights: Vec<f64>, penalty: f64 },
    /// Total level. Monotonic.
    Height,
}

impl LossModel {
    /// Missing weights count as zero.
    #[must_use]
    pub fn evaluate(&self, transformation: &[u32]) -> InformationLoss {
        let weighted = |weights: &[f64]| -> f64 {
            transformation
                .iter()
                .zip(weights)
                .map(|(&level, weight)| f64::from(level) * weight)
                .sum()
        };
        let value = match self {
            Self::WeightedSum { weights } => weighted(weights),
            Self::Alternating { weights, penalty } => {
                let odd = total_level(transformation) % 2 == 1;
                weighted(weights) + if odd { *penalty } else { 0.0 }
            }
            Self::Height => f64::from(total_level(transformation)),
        };
        InformationLoss::new(value)
    }

    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        match self {
            Self::WeightedSum { weights } => weights.iter().all(|w| *w >= 0.0),
            Self::Alternating { .. } => false,
            Self::Height => true,
        }
    }
}

/// Which transformations count as anonymous. Every rule is closed upwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeasibilityRule {
    /// Total level at least `n`.
    MinLevel(u32),
    /// Each attribute at least its own level; missing entries are zero.
    MinPerAttribute(Vec<u32>),
    Never,
}

impl FeasibilityRule {
    #[must_use]
    pub fn is_satisfied(&self, transformation: &[u32]) -> bool {
        match self {
            Self::MinLevel(n) => total_level(transformation) >= *n,
            Self::MinPerAttribute(levels) => transformation
                .iter()
                .enumerate()
                .all(|(i, level)| *level >= levels.get(i).copied().unwrap_or(0)),
            Self::Never => false,
        }
    }
}

fn total_level(transformation: &[u32]) -> u32 {
    transformation.iter().sum()
}

/// Checker over a fixed attribute count with a memo cache and an
/// evaluation log.
///
/// Cache hits are not evaluations. `ForceRecompute` drops any cached entry
/// before evaluating.
#[derive(Debug, Clone)]
pub struct SyntheticChecker {
    dimensions: usize,
    loss: LossModel,
    rule: FeasibilityRule,
    max_outliers: f64,
    trigger: StorageTrigger,
    cache: HashMap<Vec<u32>, CheckResult>,
    log: Vec<Vec<u32>>,
}

impl SyntheticChecker {
    #[must_use]
    pub fn new(dimensions: usize, loss: LossModel, rule: FeasibilityRule) -> Self {
        Self {
            dimensions,
            loss,
            rule,
            max_outliers: 0.0,
            trigger: StorageTrigger::default(),
            cache: HashMap::new(),
            log: Vec::new(),
        }
    }

    /// Set the suppression bound reported to the engine.
    #[must_use]
    pub fn with_max_outliers(mut self, max_outliers: f64) -> Self {
        self.max_outliers = max_outliers;
        self
    }

    #[must_use]
    pub fn loss_model(&self) -> &LossModel {
        &self.loss
    }

    #[must_use]
    pub fn rule(&self) -> &FeasibilityRule {
        &self.rule
    }

    #[must_use]
    pub fn storage_trigger(&self) -> StorageTrigger {
        self.trigger
    }

    /// Number of evaluations, cache hits excluded.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.log.len()
    }

    /// Evaluated transformations in evaluation order.
    #[must_use]
    pub fn evaluation_log(&self) -> &[Vec<u32>] {
        &self.log
    }

    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn retains(&self, result: CheckResult) -> bool {
        match self.trigger {
            StorageTrigger::All => true,
            StorageTrigger::NonAnonymous => !result.anonymous,
            StorageTrigger::Anonymous => result.anonymous,
        }
    }
}

impl Checker for SyntheticChecker {
    fn check(
        &mut self,
        transformation: &[u32],
        mode: CheckMode,
    ) -> Result<CheckResult, CheckerError> {
        if transformation.len() != self.dimensions {
            return Err(CheckerError::MalformedTransformation {
                transformation: transformation.to_vec(),
                expected: self.dimensions,
            });
        }
        match mode {
            CheckMode::Cached => {
                if let Some(result) = self.cache.get(transformation) {
                    return Ok(*result);
                }
            }
            CheckMode::ForceRecompute => {
                self.cache.remove(transformation);
            }
        }

        let result = CheckResult {
            anonymous: self.rule.is_satisfied(transformation),
            information_loss: self.loss.evaluate(transformation),
        };
        self.log.push(transformation.to_vec());
        if self.retains(result) {
            self.cache.insert(transformation.to_vec(), result);
        }
        Ok(result)
    }

    fn metric_is_monotonic(&self) -> bool {
        self.loss.is_monotonic()
    }

    fn max_allowed_outliers(&self) -> f64 {
        self.max_outliers
    }

    fn set_storage_trigger(&mut self, trigger: StorageTrigger) {
        self.trigger = trigger;
    }
}
