use serde::Serialize;

use crate::domain::model::SchedulingSolution;
use crate::domain::optimizer::AlgorithmType;
use crate::domain::pareto::ReferencePoint;
use crate::domain::topology::TopologyScenario;

/// Target of the structured per-run events. Prefixed with the crate name so crate-level filters pick it up.
pub const ANALYTICS_TARGET: &str = "mo_workflow_scheduler::analytics";

/// Outcome of one strategy within one run.
#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    pub algorithm: AlgorithmType,
    pub archive: Vec<SchedulingSolution>,
    pub hypervolume_history: Vec<f64>,
    pub hypervolume: f64,
    pub spacing: f64,
    /// Wall-clock seconds spent in the strategy.
    pub seconds: f64,
}

/// Everything one seeded run of a scenario produced.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub scenario: TopologyScenario,
    pub run: usize,
    pub seed: u64,
    pub reference_point: ReferencePoint,
    pub results: Vec<AlgorithmResult>,
    pub total_seconds: f64,
}

impl RunResult {
    pub fn result(&self, algorithm: AlgorithmType) -> Option<&AlgorithmResult> {
        self.results.iter().find(|result| result.algorithm == algorithm)
    }

    /// Emits one analytics event per strategy.
    pub fn log_analytics(&self) {
        for result in &self.results {
            tracing::info!(
                target: ANALYTICS_TARGET,
                Scenario = %self.scenario,
                Run = self.run,
                Seed = self.seed,
                Algorithm = %result.algorithm,
                ArchiveSize = result.archive.len(),
                Hypervolume = result.hypervolume,
                Spacing = result.spacing,
                Seconds = result.seconds,
            );
        }
    }

    /// Row of the per-scenario summary.
    pub fn summary_row(&self) -> SummaryRow {
        let column = |algorithm: AlgorithmType| self.result(algorithm);
        let size = |algorithm| column(algorithm).map_or(0, |result| result.archive.len());
        let hv = |algorithm| column(algorithm).map_or(0.0, |result| result.hypervolume);
        let time = |algorithm| column(algorithm).map_or(0.0, |result| result.seconds);

        SummaryRow {
            run: self.run,
            seed: self.seed,
            ref_f1: self.reference_point[0],
            ref_f2: self.reference_point[1],
            ref_f3: self.reference_point[2],
            pareto_mojs: size(AlgorithmType::Mojs),
            pareto_aco: size(AlgorithmType::Moaco),
            pareto_random: size(AlgorithmType::Random),
            pareto_greedy: size(AlgorithmType::Greedy),
            hv_mojs: hv(AlgorithmType::Mojs),
            hv_aco: hv(AlgorithmType::Moaco),
            hv_random: hv(AlgorithmType::Random),
            hv_greedy: hv(AlgorithmType::Greedy),
            time_mojs_s: time(AlgorithmType::Mojs),
            time_aco_s: time(AlgorithmType::Moaco),
            time_random_s: time(AlgorithmType::Random),
            time_greedy_s: time(AlgorithmType::Greedy),
            time_total_s: self.total_seconds,
        }
    }
}

/// One `summary.csv` line. Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub run: usize,
    pub seed: u64,
    pub ref_f1: f64,
    pub ref_f2: f64,
    pub ref_f3: f64,
    pub pareto_mojs: usize,
    pub pareto_aco: usize,
    pub pareto_random: usize,
    pub pareto_greedy: usize,
    pub hv_mojs: f64,
    pub hv_aco: f64,
    pub hv_random: f64,
    pub hv_greedy: f64,
    pub time_mojs_s: f64,
    pub time_aco_s: f64,
    pub time_random_s: f64,
    pub time_greedy_s: f64,
    pub time_total_s: f64,
}
