//! Report digests are a pure function of the configurations.

use anonbench_harness::report::{verify_dir, DIGEST_FILENAME};
use anonbench_harness::runner::run_matrix;
use anonbench_harness::setup::{matrix, Scenario};
use anonbench_search::{Stepping, DEFAULT_CAPACITY};

fn grid_digest(capacity: usize) -> String {
    let configs = matrix(&[Scenario::default()], capacity, Stepping::LatticeHeight);
    run_matrix("grid", &configs).unwrap().digest().unwrap()
}

#[test]
fn repeated_runs_share_a_digest() {
    let first = grid_digest(DEFAULT_CAPACITY);
    for _ in 0..3 {
        assert_eq!(grid_digest(DEFAULT_CAPACITY), first);
    }
}

#[test]
fn label_is_part_of_the_digest() {
    let configs = matrix(&[Scenario::default()], DEFAULT_CAPACITY, Stepping::LatticeHeight);
    let a = run_matrix("grid", &configs).unwrap().digest().unwrap();
    let b = run_matrix("grid-copy", &configs).unwrap().digest().unwrap();
    assert_ne!(a, b);
}

#[test]
fn persisted_report_verifies() {
    let dir = tempfile::tempdir().unwrap();
    let configs = matrix(&Scenario::presets(), DEFAULT_CAPACITY, Stepping::LatticeHeight);
    let report = run_matrix("presets", &configs).unwrap();
    let written = report.write_to(dir.path()).unwrap();

    let stored = std::fs::read_to_string(dir.path().join(DIGEST_FILENAME)).unwrap();
    assert_eq!(stored, written);
    assert_eq!(verify_dir(dir.path()).unwrap(), written);
}
