use rand::{Rng, RngCore};
use serde::Deserialize;

use crate::domain::model::SchedulingSolution;
use crate::domain::optimizer::{
    AlgorithmType, OptimizationOutcome, Optimizer, SchedulingProblem, require_non_negative, require_nonzero, require_positive,
};
use crate::domain::pareto::{ReferencePoint, hypervolume, update_archive};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoacoParams {
    pub ant_count: usize,
    pub max_generations: usize,
    pub archive_max_size: usize,
    pub evaporation_rate: f64,
    pub initial_pheromone: f64,
    /// Lower bound every pheromone entry is clamped to after evaporation.
    pub pheromone_floor: f64,
    pub cost_weight: f64,
    pub energy_weight: f64,
}

impl Default for MoacoParams {
    fn default() -> Self {
        Self {
            ant_count: 40,
            max_generations: 60,
            archive_max_size: 50,
            evaporation_rate: 0.1,
            initial_pheromone: 1.0,
            pheromone_floor: 1e-6,
            cost_weight: 100.0,
            energy_weight: 0.01,
        }
    }
}

impl MoacoParams {
    /// Keeps every pheromone entry strictly positive so no node ever becomes unreachable.
    pub fn validate(&self) -> Result<()> {
        require_nonzero("moaco.antCount", self.ant_count)?;
        require_nonzero("moaco.maxGenerations", self.max_generations)?;
        require_nonzero("moaco.archiveMaxSize", self.archive_max_size)?;

        if !(self.evaporation_rate > 0.0 && self.evaporation_rate < 1.0) {
            return Err(Error::ConfigurationError(format!(
                "'algorithms.moaco.evaporationRate' must be in (0, 1), got {}",
                self.evaporation_rate
            )));
        }
        require_positive("moaco.initialPheromone", self.initial_pheromone)?;
        require_positive("moaco.pheromoneFloor", self.pheromone_floor)?;
        require_non_negative("moaco.costWeight", self.cost_weight)?;
        require_non_negative("moaco.energyWeight", self.energy_weight)
    }
}

/**
 * Multi-objective ant colony optimisation without a visibility term.
 *
 * Every ant samples each task's node by roulette over that task's pheromone row. After a
 * generation is merged into the archive, every entry evaporates (clamped to the floor) and each
 * archived solution deposits `1 / (1 + makespan + w_cost * cost + w_energy * energy)` on the
 * (task, node) pairs it uses.
 */
pub struct MoAntColonyOptimizer<'a> {
    problem: SchedulingProblem<'a>,
    params: MoacoParams,
    reference_point: Option<ReferencePoint>,
    /// `pheromone[task][node]`
    pheromone: Vec<Vec<f64>>,
}

impl<'a> MoAntColonyOptimizer<'a> {
    pub fn new(problem: SchedulingProblem<'a>, params: MoacoParams, reference_point: Option<ReferencePoint>) -> Self {
        let pheromone = vec![vec![params.initial_pheromone; problem.node_count()]; problem.task_count()];
        Self { problem, params, reference_point, pheromone }
    }

    /// Pheromone matrix as left by the last run, indexed `[task][node]`.
    pub fn pheromone(&self) -> &[Vec<f64>] {
        &self.pheromone
    }

    fn optimize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<OptimizationOutcome> {
        self.pheromone = vec![vec![self.params.initial_pheromone; self.problem.node_count()]; self.problem.task_count()];

        let mut archive: Vec<SchedulingSolution> = Vec::new();
        let mut history = Vec::with_capacity(self.params.max_generations);

        for _ in 0..self.params.max_generations {
            let ants = (0..self.params.ant_count)
                .map(|_| self.problem.evaluate(self.construct_assignment(rng)))
                .collect::<Result<Vec<_>>>()?;

            archive = update_archive(&archive, &ants, self.params.archive_max_size);
            if let Some(reference) = &self.reference_point {
                history.push(hypervolume(&archive, reference));
            }

            self.evaporate();
            self.deposit(&archive);
        }

        log::debug!("MO-ACO finished: {} archived solutions.", archive.len());
        Ok(OptimizationOutcome { archive, hypervolume_history: history })
    }

    fn construct_assignment<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        self.pheromone.iter().map(|row| roulette(row, rng)).collect()
    }

    fn evaporate(&mut self) {
        let retained = 1.0 - self.params.evaporation_rate;
        let floor = self.params.pheromone_floor;
        for entry in self.pheromone.iter_mut().flatten() {
            *entry = (*entry * retained).max(floor);
        }
    }

    fn deposit(&mut self, archive: &[SchedulingSolution]) {
        for solution in archive {
            let quality = 1.0 / (1.0 + solution.makespan() + self.params.cost_weight * solution.cost() + self.params.energy_weight * solution.energy());
            for (row, &node) in self.pheromone.iter_mut().zip(solution.assignment()) {
                row[node] += quality;
            }
        }
    }
}

impl Optimizer for MoAntColonyOptimizer<'_> {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::Moaco
    }

    fn run(&mut self, rng: &mut dyn RngCore) -> Result<OptimizationOutcome> {
        self.optimize(rng)
    }
}

/// Index drawn with probability proportional to its weight. Rounding at the top end falls back to the last index.
fn roulette<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    let threshold = rng.random::<f64>() * total;

    let mut accumulated = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        accumulated += weight;
        if threshold <= accumulated {
            return index;
        }
    }
    weights.len().saturating_sub(1)
}
