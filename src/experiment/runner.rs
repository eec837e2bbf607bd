use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::api::run_config_dto::{NetworkDto, NodesDto, RunConfigDto};
use crate::domain::model::Task;
use crate::domain::optimizer::{AlgorithmParams, AlgorithmType, SchedulingProblem};
use crate::domain::pareto::{auto_reference_point, hypervolume, spacing};
use crate::domain::topology::{TopologyParams, TopologyScenario, build_infrastructure, build_network};
use crate::domain::workflow::load_workflow;
use crate::error::{Error, Result};
use crate::experiment::summary::{AlgorithmResult, RunResult};

/// Values given on the command line that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ExperimentOverrides {
    pub runs: Option<usize>,
    pub base_seed: Option<u64>,
    pub scenarios: Vec<String>,
    pub output_dir: Option<PathBuf>,
}

/// A validated experiment: the workflow, the infrastructure recipe and the repetition plan.
#[derive(Debug, Clone)]
pub struct ExperimentSettings {
    pub tasks: Vec<Task>,
    pub nodes: NodesDto,
    pub network: NetworkDto,
    pub scenarios: Vec<TopologyScenario>,
    pub base_seed: u64,
    pub runs: usize,
    pub algorithms: AlgorithmParams,
    pub output_dir: Option<PathBuf>,
}

impl ExperimentSettings {
    pub fn from_dto(mut dto: RunConfigDto, overrides: ExperimentOverrides) -> Result<Self> {
        if let Some(execution) = dto.execution.as_mut() {
            execution.runs = overrides.runs.unwrap_or(execution.runs);
            execution.base_seed = overrides.base_seed.unwrap_or(execution.base_seed);
        }
        if !overrides.scenarios.is_empty() {
            dto.scenarios = overrides.scenarios;
        }
        dto.validate()?;

        let (Some(workflow), Some(execution), Some(nodes), Some(network)) = (dto.workflow, dto.execution, dto.nodes, dto.network) else {
            return Err(Error::ConfigurationError("incomplete run configuration".to_string()));
        };

        let tasks = load_workflow(&workflow)?;
        let scenarios = TopologyScenario::resolve(dto.scenarios.as_slice())?;
        log::info!("Experiment configured: {} tasks, {} scenario(s), {} run(s) each.", tasks.len(), scenarios.len(), execution.runs);

        Ok(Self {
            tasks,
            nodes,
            network,
            scenarios,
            base_seed: execution.base_seed,
            runs: execution.runs,
            algorithms: dto.algorithms,
            output_dir: overrides.output_dir,
        })
    }

    /// Seed of run `run`: `base_seed + run`.
    pub fn seed_for(&self, run: usize) -> u64 {
        self.base_seed.wrapping_add(run as u64)
    }

    fn topology_params(&self, seed: u64, scenario: TopologyScenario) -> TopologyParams {
        let mut params = TopologyParams { propagation_speed_km_per_sec: self.network.propagation_speed_km_per_sec, seed, ..TopologyParams::default() };
        if self.network.variability.enabled {
            params.latency_jitter_max_sec = self.network.variability.latency_jitter_max_sec;
            params.bandwidth_jitter_ratio = self.network.variability.bandwidth_jitter_ratio;
        }
        scenario.apply_to(&mut params);
        params
    }
}

/// Runs every configured repetition of `scenario`, at most one worker thread per available core.
pub fn run_scenario(settings: &ExperimentSettings, scenario: TopologyScenario) -> Result<Vec<RunResult>> {
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    run_scenario_in_batches(settings, scenario, workers)
}

/**
 * Runs the repetitions of `scenario` in consecutive batches of `batch_size` scoped threads.
 *
 * Runs share only read-only settings and own all of their mutable state, so the result is the
 * same as running them one after another. Results come back in run order.
 */
pub fn run_scenario_in_batches(settings: &ExperimentSettings, scenario: TopologyScenario, batch_size: usize) -> Result<Vec<RunResult>> {
    let batch_size = batch_size.max(1);
    log::info!("Scenario {}: starting {} run(s), {} at a time.", scenario, settings.runs, batch_size);

    let runs: Vec<usize> = (0..settings.runs).collect();
    let mut results = Vec::with_capacity(runs.len());

    for batch in runs.chunks(batch_size) {
        thread::scope(|scope| -> Result<()> {
            let handles: Vec<_> = batch.iter().map(|&run| (run, scope.spawn(move || run_single(settings, scenario, run)))).collect();

            for (run, handle) in handles {
                let result = handle
                    .join()
                    .map_err(|_| Error::ExperimentError(format!("worker of run {} in scenario {} panicked", run, scenario)))??;
                results.push(result);
            }
            Ok(())
        })?;
    }

    Ok(results)
}

/// One seeded run: build the infrastructure and network, derive the reference point, then run every strategy.
pub fn run_single(settings: &ExperimentSettings, scenario: TopologyScenario, run: usize) -> Result<RunResult> {
    let run_start = Instant::now();
    let seed = settings.seed_for(run);

    let nodes = build_infrastructure(&settings.nodes, scenario, seed)?;
    let network = build_network(&nodes, &settings.topology_params(seed, scenario));
    let problem = SchedulingProblem::new(&settings.tasks, &nodes, &network)?;
    let reference_point = auto_reference_point(&problem)?;

    let mut results = Vec::with_capacity(AlgorithmType::ALL.len());
    for algorithm in AlgorithmType::ALL {
        let start = Instant::now();
        let mut optimizer = algorithm.get_instance(problem, &settings.algorithms, Some(reference_point));
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = optimizer.run(&mut rng)?;
        let seconds = start.elapsed().as_secs_f64();

        results.push(AlgorithmResult {
            algorithm,
            hypervolume: hypervolume(&outcome.archive, &reference_point),
            spacing: spacing(&outcome.archive),
            archive: outcome.archive,
            hypervolume_history: outcome.hypervolume_history,
            seconds,
        });
    }

    let result = RunResult { scenario, run, seed, reference_point, results, total_seconds: run_start.elapsed().as_secs_f64() };
    log::info!("Scenario {} run {} (seed {}) finished in {:.3} s.", scenario, run, seed, result.total_seconds);
    result.log_analytics();
    Ok(result)
}
