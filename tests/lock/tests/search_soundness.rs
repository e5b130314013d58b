//! Traversal results against the exhaustive baseline on the 3×3 grid.

use std::collections::BTreeSet;

use anonbench_harness::setup::MetricKind;
use anonbench_harness::{FeasibilityRule, LossModel, SyntheticChecker};
use anonbench_lattice::{dominates, InformationLoss};
use anonbench_search::{Strategy, TraversalPolicy};
use lock_tests::{baseline, traverse, weighted, GRID};

fn grid_transformations() -> Vec<Vec<u32>> {
    (0..GRID[0])
        .flat_map(|a| (0..GRID[1]).map(move |b| vec![a, b]))
        .collect()
}

/// First ordered pair `lower ≤ upper` of the grid whose loss decreases.
fn monotonicity_violation(model: &LossModel) -> Option<(Vec<u32>, Vec<u32>)> {
    let nodes = grid_transformations();
    for lower in &nodes {
        for upper in &nodes {
            if dominates(upper, lower) && model.evaluate(lower) > model.evaluate(upper) {
                return Some((lower.clone(), upper.clone()));
            }
        }
    }
    None
}

fn alternating_checker() -> SyntheticChecker {
    SyntheticChecker::new(
        GRID.len(),
        LossModel::Alternating {
            weights: vec![1.0, 1.0],
            penalty: 3.0,
        },
        FeasibilityRule::Never,
    )
    .with_max_outliers(0.5)
}

#[test]
fn monotonic_fixtures_never_lose_information_upwards() {
    let models = [
        weighted(&[1.0, 3.0], FeasibilityRule::Never).loss_model().clone(),
        weighted(&[1.0, 1.0], FeasibilityRule::Never).loss_model().clone(),
        MetricKind::Loss.loss_model(&GRID),
        LossModel::Height,
    ];
    assert_eq!(grid_transformations().len(), 9);
    for model in &models {
        assert!(model.is_monotonic(), "{model:?}");
        assert_eq!(monotonicity_violation(model), None, "{model:?}");
    }
}

#[test]
fn alternating_fixture_is_not_monotonic() {
    let checker = alternating_checker();
    assert!(!checker.loss_model().is_monotonic());
    // [1,0] pays the odd-level penalty, [1,1] does not
    assert!(monotonicity_violation(checker.loss_model()).is_some());
}

fn assert_matches_baseline(checker: &SyntheticChecker, strategy: Strategy) {
    let expected = baseline(&GRID, checker).optimum.expect("baseline solvable");
    let (outcome, _, _) = traverse(&GRID, checker.clone(), strategy.policy());
    let solution = outcome.optimum.expect("traversal solvable");
    assert_eq!(solution.transformation, expected.0, "{strategy}");
    assert_eq!(
        InformationLoss::new(solution.information_loss),
        expected.1,
        "{strategy}"
    );
}

#[test]
fn level_bound_optimum_matches_baseline() {
    let checker = weighted(&[1.0, 3.0], FeasibilityRule::MinLevel(2));
    for strategy in Strategy::ALL {
        assert_matches_baseline(&checker, strategy);
    }
}

#[test]
fn per_attribute_optimum_matches_baseline() {
    let checker = weighted(&[1.0, 1.0], FeasibilityRule::MinPerAttribute(vec![1, 1]));
    for strategy in Strategy::ALL {
        assert_matches_baseline(&checker, strategy);
    }
}

#[test]
fn anonymous_bottom_matches_baseline() {
    let checker = weighted(&[1.0, 1.0], FeasibilityRule::MinLevel(0));
    for strategy in Strategy::ALL {
        assert_matches_baseline(&checker, strategy);
    }
}

#[test]
fn non_monotonic_metric_visits_what_the_baseline_visits() {
    let checker = alternating_checker();
    let expected = baseline(&GRID, &checker);

    for strategy in Strategy::ALL {
        let (outcome, _, used) = traverse(&GRID, checker.clone(), strategy.policy());
        assert!(outcome.optimum.is_none());
        assert_eq!(outcome.pruned, 0, "{strategy}: completed nodes are never queued again");
        let visited: BTreeSet<Vec<u32>> = used.evaluation_log().iter().cloned().collect();
        assert_eq!(visited, expected.visited, "{strategy}");
    }
}

#[test]
fn policy_knobs_do_not_change_the_grid_optimum() {
    let checker = weighted(&[1.0, 3.0], FeasibilityRule::MinLevel(2));
    let expected = baseline(&GRID, &checker).optimum.unwrap().0;
    for capacity in [1, 2, 50_000] {
        let policy = TraversalPolicy {
            max_queue_size: capacity,
            ..TraversalPolicy::default()
        };
        let (outcome, _, _) = traverse(&GRID, checker.clone(), policy);
        assert_eq!(outcome.optimum.unwrap().transformation, expected, "K={capacity}");
    }
}
