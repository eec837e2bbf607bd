use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::model::SchedulingSolution;
use crate::experiment::summary::RunResult;
use crate::error::Result;

/// Writes `f1_makespan,f2_cost,f3_energy` rows, one per archived solution.
pub fn write_pareto_csv(path: impl AsRef<Path>, front: &[SchedulingSolution]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["f1_makespan", "f2_cost", "f3_energy"])?;
    for solution in front {
        writer.write_record([solution.makespan().to_string(), solution.cost().to_string(), solution.energy().to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `generation,hypervolume` rows, generations counted from 0.
pub fn write_hypervolume_csv(path: impl AsRef<Path>, history: &[f64]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["generation", "hypervolume"])?;
    for (generation, hypervolume) in history.iter().enumerate() {
        writer.write_record([generation.to_string(), hypervolume.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the fronts and hypervolume histories of one run into `<scenario_dir>/run_<n>/`.
pub fn export_run(scenario_dir: impl AsRef<Path>, run: &RunResult) -> Result<PathBuf> {
    let run_dir = scenario_dir.as_ref().join(format!("run_{}", run.run));
    fs::create_dir_all(&run_dir)?;

    for result in &run.results {
        let tag = result.algorithm.file_tag();
        write_pareto_csv(run_dir.join(format!("pareto_{}.csv", tag)), &result.archive)?;
        if !result.hypervolume_history.is_empty() {
            write_hypervolume_csv(run_dir.join(format!("hv_{}.csv", tag)), &result.hypervolume_history)?;
        }
    }

    log::debug!("Run {} exported to '{}'.", run.run, run_dir.display());
    Ok(run_dir)
}

/// Writes `summary.csv` for a scenario, one row per run in the given order.
pub fn write_summary_csv(path: impl AsRef<Path>, runs: &[RunResult]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for run in runs {
        writer.serialize(run.summary_row())?;
    }
    writer.flush()?;
    Ok(())
}
