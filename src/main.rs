use std::path::PathBuf;

use clap::Parser;

use mo_workflow_scheduler::experiment::ExperimentOverrides;
use mo_workflow_scheduler::{logger, run_experiment_from_file};

/// Compares multi-objective placement strategies for workflows on edge/fog/cloud infrastructures.
#[derive(Debug, Parser)]
#[command(name = "mo-workflow-scheduler", version, about)]
struct Cli {
    /// JSON run configuration.
    #[arg(default_value = "config/experiment.json")]
    config: PathBuf,

    /// Number of seeded runs per scenario.
    #[arg(long)]
    runs: Option<usize>,

    /// Base seed; run `i` uses `seed + i`.
    #[arg(long)]
    seed: Option<u64>,

    /// Scenario to run, repeatable (DEFAULT, NEAR_CLOUD, FAR_CLOUD, DENSE_FOG, POOR_NETWORK).
    #[arg(long = "scenario")]
    scenarios: Vec<String>,

    /// Directory receiving the CSV exports. Nothing is written without it.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init();

    let overrides = ExperimentOverrides { runs: cli.runs, base_seed: cli.seed, scenarios: cli.scenarios, output_dir: cli.output_dir };
    let runs = run_experiment_from_file(&cli.config, overrides)?;

    log::info!("Experiment finished: {} run(s) completed.", runs.len());
    Ok(())
}
