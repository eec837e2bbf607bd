use std::fs;
use std::path::Path;

use crate::api::run_config_dto::RunConfigDto;
use crate::error::Result;
use crate::experiment::export::{export_run, write_summary_csv};
use crate::experiment::report::print_run;
use crate::experiment::{ExperimentOverrides, ExperimentSettings, RunResult, run_scenario};
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod experiment;
pub mod loader;
pub mod logger;

/// Loads a run configuration, executes every scenario and run, prints the report and, if an
/// output directory is set, exports per-run fronts and a per-scenario `summary.csv`.
pub fn run_experiment_from_file(file_path: impl AsRef<Path>, overrides: ExperimentOverrides) -> Result<Vec<RunResult>> {
    let config: RunConfigDto = parse_json_file(file_path.as_ref())?;
    log::info!("Run configuration '{}' parsed successfully.", file_path.as_ref().display());

    let settings = ExperimentSettings::from_dto(config, overrides)?;
    run_experiment(&settings)
}

pub fn run_experiment(settings: &ExperimentSettings) -> Result<Vec<RunResult>> {
    let mut all_runs = Vec::with_capacity(settings.scenarios.len() * settings.runs);

    for &scenario in &settings.scenarios {
        let runs = run_scenario(settings, scenario)?;

        for run in &runs {
            print_run(run);
        }

        if let Some(output_dir) = &settings.output_dir {
            let scenario_dir = output_dir.join(scenario.to_string().to_lowercase());
            fs::create_dir_all(&scenario_dir)?;
            for run in &runs {
                export_run(&scenario_dir, run)?;
            }
            write_summary_csv(scenario_dir.join("summary.csv"), &runs)?;
            log::info!("Scenario {} results written to '{}'.", scenario, scenario_dir.display());
        }

        all_runs.extend(runs);
    }

    Ok(all_runs)
}
