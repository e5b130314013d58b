//! Traversal properties that hold for every strategy and lattice shape.

use std::collections::HashSet;

use anonbench_harness::setup::{Criterion, MetricKind, Scenario};
use anonbench_harness::{FeasibilityRule, SyntheticChecker};
use anonbench_lattice::{dominates, GeneralizationLattice, Lattice};
use anonbench_search::{
    SearchEngine, SearchError, Stepping, Strategy, SuccessorMode, TraversalPolicy,
};
use lock_tests::{traverse, weighted, GRID};

fn preset_checkers() -> Vec<(Scenario, SyntheticChecker)> {
    let mut checkers = Vec::new();
    for scenario in Scenario::presets() {
        for criterion in Criterion::ALL {
            for metric in MetricKind::ALL {
                checkers.push((
                    scenario.clone(),
                    SyntheticChecker::new(
                        scenario.heights.len(),
                        metric.loss_model(&scenario.heights),
                        criterion.feasibility(&scenario.heights),
                    )
                    .with_max_outliers(1.0),
                ));
            }
        }
    }
    checkers
}

#[test]
fn every_node_is_evaluated_at_most_once() {
    for (scenario, checker) in preset_checkers() {
        for strategy in Strategy::ALL {
            let (outcome, _, used) = traverse(&scenario.heights, checker.clone(), strategy.policy());
            let log = used.evaluation_log();
            let distinct: HashSet<&Vec<u32>> = log.iter().collect();
            assert_eq!(distinct.len(), log.len(), "{} / {strategy}", scenario.name);
            assert_eq!(outcome.checks, log.len() as u64, "{} / {strategy}", scenario.name);
        }
    }
}

#[test]
fn checks_stop_at_the_optimum() {
    for (scenario, checker) in preset_checkers() {
        for strategy in Strategy::ALL {
            let (outcome, _, used) = traverse(&scenario.heights, checker.clone(), strategy.policy());
            let solution = outcome.optimum.expect("top satisfies every rule");
            assert_eq!(
                used.evaluation_log().last(),
                Some(&solution.transformation),
                "{} / {strategy}",
                scenario.name
            );
        }
    }
}

#[test]
fn grid_early_termination_checks_four_nodes() {
    let checker = weighted(&[1.0, 3.0], FeasibilityRule::MinLevel(2));
    let (outcome, _, used) = traverse(&GRID, checker, TraversalPolicy::default());
    assert_eq!(outcome.checks, 4);
    assert_eq!(
        used.evaluation_log(),
        &[vec![0, 0], vec![1, 0], vec![0, 1], vec![2, 0]]
    );
}

#[test]
fn rollups_follow_the_evaluation_order() {
    let policy = TraversalPolicy {
        stepping: Stepping::Every(1),
        ..TraversalPolicy::default()
    };
    for (scenario, checker) in preset_checkers() {
        let (outcome, _, used) = traverse(&scenario.heights, checker, policy);
        let expected = used
            .evaluation_log()
            .windows(2)
            .filter(|pair| dominates(&pair[1], &pair[0]))
            .count() as u64;
        assert_eq!(outcome.rollups, expected, "{}", scenario.name);
        assert!(outcome.rollups <= outcome.checks);
    }
}

#[test]
fn verdicts_are_propagated_through_the_lattice() {
    let checker = weighted(&[1.0, 3.0], FeasibilityRule::MinLevel(2));
    let (_, mut lattice, _) = traverse(&GRID, checker, TraversalPolicy::default());

    assert!(lattice.find(&[2, 1]).is_none(), "propagation creates no nodes");
    assert!(lattice.find(&[0, 2]).is_none(), "never materialized");
    for above in [[2, 0], [2, 1], [2, 2]] {
        let node = lattice.node(&above).unwrap();
        let state = lattice.state(node);
        assert!(state.is_anonymous(), "{above:?}");
        assert!(state.is_upward_pruned(), "{above:?}");
    }
    let bottom = lattice.state(lattice.find(&[0, 0]).unwrap());
    assert!(bottom.is_not_anonymous());
    assert!(bottom.is_completed());
}

#[test]
fn anonymous_bottom_materializes_only_bottom_and_top() {
    let heights = [6; 7];
    let checker = SyntheticChecker::new(
        heights.len(),
        MetricKind::Loss.loss_model(&heights),
        FeasibilityRule::MinLevel(0),
    );
    let (outcome, lattice, _) = traverse(&heights, checker, TraversalPolicy::default());

    assert_eq!(outcome.checks, 1);
    assert_eq!(outcome.optimum.unwrap().transformation, vec![0; 7]);
    assert_eq!(lattice.materialized(), 2, "bottom, plus top for the stepping");
    let top = lattice.find(&[5; 7]).unwrap();
    assert!(lattice.state(top).is_upward_pruned());
}

#[test]
fn materialized_nodes_stay_near_the_checked_ones() {
    for (scenario, checker) in preset_checkers() {
        let (outcome, lattice, _) = traverse(&scenario.heights, checker, TraversalPolicy::default());
        // bottom and top, then at most one successor per attribute per expansion
        let bound = 2 + outcome.expansions * scenario.heights.len() as u64;
        assert!(
            lattice.materialized() as u64 <= bound,
            "{}: {} nodes for {} expansions",
            scenario.name,
            lattice.materialized(),
            outcome.expansions
        );
    }
}

#[test]
fn dive_every_step_still_finds_an_anonymous_node() {
    let policy = TraversalPolicy {
        stepping: Stepping::Every(1),
        successor_mode: SuccessorMode::All,
        ..TraversalPolicy::default()
    };
    let checker = weighted(&[1.0, 3.0], FeasibilityRule::MinLevel(2));
    let (outcome, _, _) = traverse(&GRID, checker, policy);
    assert_eq!(outcome.dives, 1);
    assert_eq!(outcome.optimum.unwrap().transformation, vec![2, 0]);
}

#[test]
fn frontier_never_exceeds_capacity_by_more_than_one() {
    for (scenario, checker) in preset_checkers() {
        let policy = TraversalPolicy {
            max_queue_size: 3,
            ..TraversalPolicy::default()
        };
        let (outcome, _, _) = traverse(&scenario.heights, checker, policy);
        assert!(outcome.frontier_high_water <= 4, "{}", scenario.name);
    }
}

#[test]
fn configuration_errors_surface_before_any_check() {
    assert_eq!(
        "datafly".parse::<Strategy>().unwrap_err(),
        SearchError::UnknownStrategy {
            name: "datafly".into()
        }
    );

    let lattice = GeneralizationLattice::with_heights(&GRID).unwrap();
    let checker = weighted(&[1.0, 1.0], FeasibilityRule::Never);
    let policy = TraversalPolicy {
        stepping: Stepping::Every(0),
        ..TraversalPolicy::default()
    };
    let err = SearchEngine::new(lattice, checker, policy).unwrap_err();
    assert!(matches!(err, SearchError::InvalidPolicy { .. }));
}

#[test]
fn engine_is_single_use() {
    let lattice = GeneralizationLattice::with_heights(&GRID).unwrap();
    let checker = weighted(&[1.0, 1.0], FeasibilityRule::MinLevel(1));
    let mut engine = SearchEngine::new(lattice, checker, TraversalPolicy::default()).unwrap();
    let first = engine.traverse().unwrap();
    assert_eq!(engine.traverse().unwrap_err(), SearchError::AlreadyTraversed);
    assert_eq!(engine.num_checks(), first.checks);
}
