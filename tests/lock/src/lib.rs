//! Shared fixtures for the cross-crate lock tests.
//!
//! # Panics
//!
//! Helpers here unwrap freely; a failure is a test failure.

#![allow(clippy::missing_panics_doc)]

use anonbench_harness::baseline::{exhaustive, Baseline};
use anonbench_harness::{FeasibilityRule, LossModel, SyntheticChecker};
use anonbench_lattice::GeneralizationLattice;
use anonbench_search::{SearchEngine, SearchOutcome, TraversalPolicy};

/// The 3×3 lattice every small property test runs on.
pub const GRID: [u32; 2] = [3, 3];

/// Weighted-sum checker over `GRID`.
#[must_use]
pub fn weighted(weights: &[f64], rule: FeasibilityRule) -> SyntheticChecker {
    SyntheticChecker::new(
        GRID.len(),
        LossModel::WeightedSum {
            weights: weights.to_vec(),
        },
        rule,
    )
}

/// Traverse `heights` and hand back the outcome with the used checker.
#[must_use]
pub fn traverse(
    heights: &[u32],
    checker: SyntheticChecker,
    policy: TraversalPolicy,
) -> (SearchOutcome, GeneralizationLattice, SyntheticChecker) {
    let lattice = GeneralizationLattice::with_heights(heights).unwrap();
    let mut engine = SearchEngine::new(lattice, checker, policy).unwrap();
    let outcome = engine.traverse().unwrap();
    let (lattice, checker) = engine.into_parts();
    (outcome, lattice, checker)
}

/// Exhaustive baseline with a fresh copy of `checker`'s configuration.
#[must_use]
pub fn baseline(heights: &[u32], checker: &SyntheticChecker) -> Baseline {
    let mut fresh = SyntheticChecker::new(
        heights.len(),
        checker.loss_model().clone(),
        checker.rule().clone(),
    )
    .with_max_outliers(anonbench_search::Checker::max_allowed_outliers(checker));
    exhaustive(heights, &mut fresh).unwrap()
}
