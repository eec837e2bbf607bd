pub mod export;
pub mod report;
pub mod runner;
pub mod summary;

pub use runner::{ExperimentOverrides, ExperimentSettings, run_scenario, run_scenario_in_batches, run_single};
pub use summary::{ANALYTICS_TARGET, AlgorithmResult, RunResult, SummaryRow};
