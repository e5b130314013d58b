//! anonbench: run one benchmark configuration or the full matrix and print
//! the report as JSON.
//!
//! Logs go to stderr; set `RUST_LOG` (default `warn`).

use std::path::PathBuf;
use std::process::ExitCode;

use anonbench_harness::runner::{run_benchmark, run_matrix};
use anonbench_harness::setup::{matrix, Criterion, MetricKind, Scenario};
use anonbench_harness::{BenchmarkConfig, HarnessError, RunReport};
use anonbench_search::{Stepping, Strategy, DEFAULT_CAPACITY};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "anonbench")]
#[command(about = "Benchmark lattice search strategies on synthetic anonymization problems", long_about = None)]
struct Cli {
    /// Hierarchy height per attribute, e.g. `3,3`
    #[arg(long, value_delimiter = ',', default_value = "3,3")]
    heights: Vec<u32>,

    /// Scenario name used in the report
    #[arg(long, default_value = "custom")]
    name: String,

    /// Use the built-in scenarios instead of --heights
    #[arg(long)]
    presets: bool,

    /// Traversal strategy
    #[arg(long, default_value = "heurakles")]
    strategy: Strategy,

    /// Frontier capacity
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Dive every N expansions (default: lattice height)
    #[arg(long)]
    stepping: Option<u32>,

    /// Metric the result is reported under
    #[arg(long, default_value = "Loss")]
    metric: MetricKind,

    /// Allowed outlier fraction in [0, 1]
    #[arg(long, default_value_t = 0.0)]
    suppression: f64,

    /// Privacy criteria, e.g. `k,l`
    #[arg(long, value_delimiter = ',', default_value = "k")]
    criterion: Vec<Criterion>,

    /// Run every criteria/metric/suppression/strategy combination
    #[arg(long)]
    matrix: bool,

    /// Also write the canonical report and its digest into this directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

impl Cli {
    fn scenarios(&self) -> Vec<Scenario> {
        if self.presets {
            Scenario::presets()
        } else {
            vec![Scenario::new(self.name.clone(), self.heights.clone())]
        }
    }

    fn stepping(&self) -> Stepping {
        self.stepping.map_or(Stepping::LatticeHeight, Stepping::Every)
    }

    fn report(&self) -> Result<RunReport, HarnessError> {
        let scenarios = self.scenarios();
        let label = scenarios
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join("+");
        if self.matrix {
            return run_matrix(&label, &matrix(&scenarios, self.capacity, self.stepping()));
        }
        let mut records = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let config = BenchmarkConfig {
                scenario,
                criteria: self.criterion.clone(),
                metric: self.metric,
                suppression: self.suppression,
                algorithm: self.strategy,
                capacity: self.capacity,
                stepping: self.stepping(),
            };
            records.push(run_benchmark(&config)?);
        }
        Ok(RunReport::new(label, records))
    }
}

fn run(cli: &Cli) -> Result<(), HarnessError> {
    let report = cli.report()?;
    if let Some(dir) = &cli.output {
        let digest = report.write_to(dir)?;
        tracing::info!(dir = %dir.display(), %digest, "report written");
    }
    let json = serde_json::to_string_pretty(&report).map_err(|e| {
        HarnessError::Canon(anonbench_harness::canon::CanonError::Serialize {
            detail: e.to_string(),
        })
    })?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
