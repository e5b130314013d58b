//! The full benchmark matrix over the preset scenarios.

use anonbench_harness::runner::run_matrix;
use anonbench_harness::setup::{matrix, privacy_criteria, Scenario, SUPPRESSION_VALUES};
use anonbench_harness::{MetricKind, NO_SOLUTION};
use anonbench_search::{CheckMode, Checker, Stepping, Strategy, DEFAULT_CAPACITY};

#[test]
fn matrix_covers_every_combination() {
    let scenarios = Scenario::presets();
    let configs = matrix(&scenarios, DEFAULT_CAPACITY, Stepping::LatticeHeight);
    assert_eq!(
        configs.len(),
        privacy_criteria().len()
            * scenarios.len()
            * MetricKind::ALL.len()
            * SUPPRESSION_VALUES.len()
            * Strategy::ALL.len()
    );
    let labels: Vec<String> = configs.iter().map(|c| c.criteria_label()).collect();
    for expected in ["[k]", "[l]", "[t]", "[d]", "[r]"] {
        assert!(labels.iter().any(|l| l == expected), "missing {expected}");
    }
}

#[test]
fn every_record_is_scored_under_its_benchmark_metric() {
    let configs = matrix(&Scenario::presets(), DEFAULT_CAPACITY, Stepping::LatticeHeight);
    let report = run_matrix("presets", &configs).unwrap();
    assert_eq!(report.records.len(), configs.len());

    for (config, record) in configs.iter().zip(&report.records) {
        assert_eq!(record.algorithm, config.algorithm.name());
        assert_eq!(record.metric, config.metric.label());
        assert_ne!(record.information_loss, NO_SOLUTION, "top is always feasible");

        let transformation = record.transformation.as_ref().unwrap();
        let mut scorer = config.benchmark_checker();
        let result = scorer
            .check(transformation, CheckMode::ForceRecompute)
            .unwrap();
        assert!(result.anonymous, "{record:?}");
        assert_eq!(record.information_loss, result.information_loss.to_string());
    }
}

#[test]
fn bounded_frontier_still_solves_the_matrix() {
    let configs = matrix(&Scenario::presets(), 2, Stepping::LatticeHeight);
    let report = run_matrix("presets-k2", &configs).unwrap();
    assert!(report.records.iter().all(|r| r.is_solved()));
    assert!(report.records.iter().all(|r| r.frontier_high_water <= 3));
}
