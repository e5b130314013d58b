//! Shared helpers for anonbench benchmark suites.

use anonbench_harness::{FeasibilityRule, LossModel, SyntheticChecker};
use anonbench_lattice::GeneralizationLattice;
use anonbench_search::{SearchEngine, SearchOutcome, Strategy, TraversalPolicy};

/// A lattice shape, checker and policy worth timing.
#[derive(Debug, Clone)]
pub struct Regime {
    pub name: &'static str,
    pub heights: Vec<u32>,
    pub checker: SyntheticChecker,
    pub policy: TraversalPolicy,
}

fn unit_weights(heights: &[u32]) -> Vec<f64> {
    heights.iter().map(|_| 1.0).collect()
}

fn regime(
    name: &'static str,
    heights: Vec<u32>,
    loss: LossModel,
    rule: FeasibilityRule,
    policy: TraversalPolicy,
) -> Regime {
    let checker = SyntheticChecker::new(heights.len(), loss, rule).with_max_outliers(1.0);
    Regime {
        name,
        heights,
        checker,
        policy,
    }
}

/// Optimum a few levels above the bottom.
#[must_use]
pub fn regime_early_exit() -> Regime {
    let heights = vec![4, 4, 4, 4, 4];
    let loss = LossModel::WeightedSum {
        weights: unit_weights(&heights),
    };
    regime(
        "early_exit",
        heights,
        loss,
        FeasibilityRule::MinLevel(3),
        Strategy::Heurakles.policy(),
    )
}

/// Nothing is anonymous: every reachable node is checked.
#[must_use]
pub fn regime_exhaustive_dead_end() -> Regime {
    let heights = vec![3, 3, 3, 3, 3, 3];
    let loss = LossModel::WeightedSum {
        weights: unit_weights(&heights),
    };
    regime(
        "exhaustive_dead_end",
        heights,
        loss,
        FeasibilityRule::Never,
        Strategy::ImprovedGreedy.policy(),
    )
}

/// Wide lattice with a tiny frontier so eviction runs constantly.
#[must_use]
pub fn regime_frontier_pressure() -> Regime {
    let heights = vec![3, 2, 4, 2, 3, 2, 5, 3];
    let loss = LossModel::WeightedSum {
        weights: unit_weights(&heights),
    };
    regime(
        "frontier_pressure",
        heights,
        loss,
        FeasibilityRule::MinPerAttribute(vec![2, 1, 3, 1, 2, 1, 4, 2]),
        TraversalPolicy {
            max_queue_size: 8,
            ..Strategy::Heurakles.policy()
        },
    )
}

/// Non-monotonic metric with outliers: loss pruning is off.
#[must_use]
pub fn regime_non_monotonic() -> Regime {
    let heights = vec![5, 4, 3, 3, 2];
    let loss = LossModel::Alternating {
        weights: unit_weights(&heights),
        penalty: 0.5,
    };
    regime(
        "non_monotonic",
        heights,
        loss,
        FeasibilityRule::MinLevel(8),
        Strategy::Heurakles.policy(),
    )
}

#[must_use]
pub fn all_regimes() -> Vec<Regime> {
    vec![
        regime_early_exit(),
        regime_exhaustive_dead_end(),
        regime_frontier_pressure(),
        regime_non_monotonic(),
    ]
}

/// Traverse a fresh lattice for `regime`.
///
/// # Panics
///
/// Panics if the regime is misconfigured. Benchmark setup failures are fatal.
#[must_use]
pub fn run_traversal(regime: &Regime) -> SearchOutcome {
    let lattice = GeneralizationLattice::with_heights(&regime.heights).expect("heights");
    let mut engine =
        SearchEngine::new(lattice, regime.checker.clone(), regime.policy).expect("policy");
    engine.traverse().expect("traverse")
}
