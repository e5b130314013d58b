//! Binary that runs the benchmark matrix over the preset scenarios and
//! prints deterministic output lines for cross-process verification.
//!
//! Usage: `report_fixture`
//!
//! Output: key=value lines (see source for format).

use anonbench_harness::runner::run_matrix;
use anonbench_harness::setup::{matrix, Scenario};
use anonbench_search::Stepping;

fn main() {
    let configs = matrix(&Scenario::presets(), 64, Stepping::LatticeHeight);
    let report = run_matrix("presets", &configs).expect("matrix run failed");
    let digest = report.digest().expect("report digest failed");
    let solved = report.records.iter().filter(|r| r.is_solved()).count();
    let checks: u64 = report.records.iter().map(|r| r.checks).sum();

    println!("report_digest={digest}");
    println!("record_count={}", report.records.len());
    println!("solved_count={solved}");
    println!("total_checks={checks}");
}
