use rand::seq::index;
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;
use serde::Deserialize;

use crate::domain::model::SchedulingSolution;
use crate::domain::optimizer::{AlgorithmType, OptimizationOutcome, Optimizer, SchedulingProblem, require_nonzero, require_unit_interval};
use crate::domain::pareto::{ReferencePoint, hypervolume, update_archive};
use crate::error::Result;

/// Mantegna sigma for a Lévy exponent of 1.5.
const LEVY_SIGMA: f64 = 0.6965745025576967;
const LEVY_BETA: f64 = 1.5;

const PASSIVE_NOISE_SCALE: f64 = 0.25;
const OSCILLATION_SCALE: f64 = 0.35;
const LEADER_TOURNAMENT_SIZE: usize = 3;

/// Minimal raw hypervolume gain that counts as progress.
const HV_IMPROVEMENT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MojsParams {
    pub population_size: usize,
    pub max_generations: usize,
    pub archive_max_size: usize,
    /// Independent per-dimension probability of a uniform reassignment after discretisation.
    pub mutation_rate: f64,
    /// Share of the working population replaced on a partial restart.
    pub restart_ratio: f64,
    /// Generations without raw hypervolume gain before a partial restart.
    pub stagnation_limit: usize,
    pub elite_ratio: f64,
    pub local_search_tasks_ratio: f64,
    /// Probability that an active individual follows the leader instead of a peer.
    pub leader_probability: f64,
    /// Share of task dimensions touched by the operator move at `t = 0` and `t = 1`.
    pub initial_move_fraction: f64,
    pub final_move_fraction: f64,
    /// Probability that a touched dimension snaps to the suggested node at `t = 0` and `t = 1`.
    pub initial_guided_probability: f64,
    pub final_guided_probability: f64,
}

impl Default for MojsParams {
    fn default() -> Self {
        Self {
            population_size: 40,
            max_generations: 60,
            archive_max_size: 50,
            mutation_rate: 0.05,
            restart_ratio: 0.25,
            stagnation_limit: 6,
            elite_ratio: 0.15,
            local_search_tasks_ratio: 0.10,
            leader_probability: 0.6,
            initial_move_fraction: 0.5,
            final_move_fraction: 0.1,
            initial_guided_probability: 0.9,
            final_guided_probability: 0.6,
        }
    }
}

impl MojsParams {
    pub fn validate(&self) -> Result<()> {
        require_nonzero("mojs.populationSize", self.population_size)?;
        require_nonzero("mojs.maxGenerations", self.max_generations)?;
        require_nonzero("mojs.archiveMaxSize", self.archive_max_size)?;
        require_nonzero("mojs.stagnationLimit", self.stagnation_limit)?;

        for (name, value) in [
            ("mojs.mutationRate", self.mutation_rate),
            ("mojs.restartRatio", self.restart_ratio),
            ("mojs.eliteRatio", self.elite_ratio),
            ("mojs.localSearchTasksRatio", self.local_search_tasks_ratio),
            ("mojs.leaderProbability", self.leader_probability),
            ("mojs.initialMoveFraction", self.initial_move_fraction),
            ("mojs.finalMoveFraction", self.final_move_fraction),
            ("mojs.initialGuidedProbability", self.initial_guided_probability),
            ("mojs.finalGuidedProbability", self.final_guided_probability),
        ] {
            require_unit_interval(name, value)?;
        }
        Ok(())
    }
}

/**
 * Multi-objective jellyfish search over task-to-node assignments.
 *
 * Each generation moves every individual in a relaxed continuous space (passive drift toward the
 * population mean, or an active move toward the leader or a peer), converts the position back with
 * an operator-based move on a decaying share of the dimensions, mutates, evaluates, refines the
 * elite by local search and merges the generation into the bounded archive.
 *
 * With a reference point the optimizer records the best hypervolume so far per generation and
 * partially restarts the working population when the raw hypervolume stalls. The archive itself
 * is never shrunk by a restart.
 */
pub struct MoJellyfishOptimizer<'a> {
    problem: SchedulingProblem<'a>,
    params: MojsParams,
    reference_point: Option<ReferencePoint>,
    restarts: usize,
}

impl<'a> MoJellyfishOptimizer<'a> {
    pub fn new(problem: SchedulingProblem<'a>, params: MojsParams, reference_point: Option<ReferencePoint>) -> Self {
        Self { problem, params, reference_point, restarts: 0 }
    }

    /// Number of partial restarts triggered by the last run.
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    fn optimize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<OptimizationOutcome> {
        self.restarts = 0;
        let max_generations = self.params.max_generations;
        if self.params.population_size == 0 {
            log::warn!("MOJS called with an empty population, nothing to optimize.");
            return Ok(OptimizationOutcome::default());
        }

        let mut population = (0..self.params.population_size)
            .map(|_| self.problem.random_solution(rng))
            .collect::<Result<Vec<_>>>()?;
        let mut archive = update_archive(&[], &population, self.params.archive_max_size);

        let mut history = Vec::with_capacity(max_generations);
        let mut best_hv = 0.0;
        let mut stagnation = 0;

        for generation in 1..=max_generations {
            let t = generation as f64 / max_generations as f64;
            let positions: Vec<Vec<f64>> = population.iter().map(|solution| to_position(solution.assignment())).collect();
            let mean = mean_position(&positions, self.problem.task_count());
            let leader = to_position(select_leader(&archive, &population, rng).assignment());

            let mut offspring = Vec::with_capacity(population.len());
            for current in &positions {
                let target = if rng.random::<f64>() < active_probability(t) {
                    if rng.random::<f64>() < self.params.leader_probability {
                        move_toward_leader(current, &leader, t, rng)
                    } else {
                        let peer = &positions[rng.random_range(0..positions.len())];
                        move_relative_to_peer(current, peer, rng)
                    }
                } else {
                    passive_drift(current, &mean, rng)
                };

                let mut assignment = self.operator_move(current, &target, t, rng);
                self.mutate(&mut assignment, rng);
                offspring.push(self.problem.evaluate(assignment)?);
            }

            self.refine_elite(&mut offspring, rng)?;
            population = offspring;
            archive = update_archive(&archive, &population, self.params.archive_max_size);

            let Some(reference) = &self.reference_point else {
                continue;
            };

            let hv = hypervolume(&archive, reference);
            if hv > best_hv + HV_IMPROVEMENT_EPSILON {
                stagnation = 0;
            } else {
                stagnation += 1;
            }
            if hv > best_hv {
                best_hv = hv;
            }
            history.push(best_hv);

            if stagnation >= self.params.stagnation_limit {
                self.partial_restart(&mut population, rng)?;
                log::debug!("MOJS partial restart at generation {} (hypervolume {:.6}).", generation, best_hv);
                stagnation = 0;
            }
        }

        log::debug!("MOJS finished: {} archived solutions, {} restarts.", archive.len(), self.restarts);
        Ok(OptimizationOutcome { archive, hypervolume_history: history })
    }

    /// Converts a continuous target back to node indices by touching a decaying share of the dimensions.
    fn operator_move<R: Rng + ?Sized>(&self, current: &[f64], target: &[f64], t: f64, rng: &mut R) -> Vec<usize> {
        let node_count = self.problem.node_count();
        let mut assignment: Vec<usize> = current.iter().map(|&position| position as usize).collect();
        let dimensions = assignment.len();
        if dimensions == 0 {
            return assignment;
        }

        let fraction = interpolate(self.params.initial_move_fraction, self.params.final_move_fraction, t);
        let guided_probability = interpolate(self.params.initial_guided_probability, self.params.final_guided_probability, t);
        let moved = ((fraction * dimensions as f64).round() as usize).clamp(1, dimensions);

        for dimension in index::sample(rng, dimensions, moved).into_iter() {
            assignment[dimension] = if rng.random::<f64>() < guided_probability {
                snap(target[dimension], node_count)
            } else {
                rng.random_range(0..node_count)
            };
        }
        assignment
    }

    fn mutate<R: Rng + ?Sized>(&self, assignment: &mut [usize], rng: &mut R) {
        for node in assignment.iter_mut() {
            if rng.random::<f64>() < self.params.mutation_rate {
                *node = self.problem.random_node(rng);
            }
        }
    }

    /// Sorts the generation by scalar score and hill-climbs the best `elite_ratio` share.
    fn refine_elite<R: Rng + ?Sized>(&self, generation: &mut [SchedulingSolution], rng: &mut R) -> Result<()> {
        if generation.is_empty() || self.problem.task_count() == 0 {
            return Ok(());
        }

        generation.sort_by(|a, b| scalar_score(a).total_cmp(&scalar_score(b)));
        let elite = ((generation.len() as f64 * self.params.elite_ratio).round() as usize).clamp(1, generation.len());
        let moves = ((self.problem.task_count() as f64 * self.params.local_search_tasks_ratio).round() as usize).max(1);

        for solution in generation.iter_mut().take(elite) {
            let mut best_score = scalar_score(solution);
            for _ in 0..moves {
                let mut assignment = solution.assignment().to_vec();
                let task = rng.random_range(0..assignment.len());
                assignment[task] = self.problem.random_node(rng);

                let candidate = self.problem.evaluate(assignment)?;
                let score = scalar_score(&candidate);
                if score < best_score {
                    best_score = score;
                    *solution = candidate;
                }
            }
        }
        Ok(())
    }

    fn partial_restart<R: Rng + ?Sized>(&mut self, population: &mut [SchedulingSolution], rng: &mut R) -> Result<()> {
        if population.is_empty() {
            return Ok(());
        }
        let count = ((population.len() as f64 * self.params.restart_ratio).round() as usize).max(1);
        for _ in 0..count {
            let slot = rng.random_range(0..population.len());
            population[slot] = self.problem.random_solution(rng)?;
        }
        self.restarts += 1;
        Ok(())
    }
}

impl Optimizer for MoJellyfishOptimizer<'_> {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::Mojs
    }

    fn run(&mut self, rng: &mut dyn RngCore) -> Result<OptimizationOutcome> {
        self.optimize(rng)
    }
}

/// Weighted sum used only to rank individuals, never for dominance.
pub fn scalar_score(solution: &SchedulingSolution) -> f64 {
    solution.makespan() + 1000.0 * solution.cost() + 0.01 * solution.energy()
}

fn active_probability(t: f64) -> f64 {
    0.3 + 0.7 * t
}

fn interpolate(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

fn to_position(assignment: &[usize]) -> Vec<f64> {
    assignment.iter().map(|&node| node as f64).collect()
}

fn mean_position(positions: &[Vec<f64>], dimensions: usize) -> Vec<f64> {
    let mut mean = vec![0.0; dimensions];
    if positions.is_empty() {
        return mean;
    }
    for position in positions {
        for (sum, value) in mean.iter_mut().zip(position) {
            *sum += value;
        }
    }
    mean.iter_mut().for_each(|sum| *sum /= positions.len() as f64);
    mean
}

fn snap(position: f64, node_count: usize) -> usize {
    position.round().clamp(0.0, (node_count - 1) as f64) as usize
}

/// Sign of `value`, zero stays zero.
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn levy_step<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u: f64 = rng.sample(StandardNormal);
    let v: f64 = rng.sample(StandardNormal);
    u * LEVY_SIGMA / (v.abs() + 1e-12).powf(1.0 / LEVY_BETA)
}

fn passive_drift<R: Rng + ?Sized>(current: &[f64], mean: &[f64], rng: &mut R) -> Vec<f64> {
    current
        .iter()
        .zip(mean)
        .map(|(&position, &centre)| position + rng.random::<f64>() * (centre - position) + PASSIVE_NOISE_SCALE * levy_step(rng))
        .collect()
}

fn move_toward_leader<R: Rng + ?Sized>(current: &[f64], leader: &[f64], t: f64, rng: &mut R) -> Vec<f64> {
    current
        .iter()
        .zip(leader)
        .map(|(&position, &target)| position + (0.4 + 0.3 * t) * rng.random::<f64>() * (target - position))
        .collect()
}

fn move_relative_to_peer<R: Rng + ?Sized>(current: &[f64], peer: &[f64], rng: &mut R) -> Vec<f64> {
    current
        .iter()
        .zip(peer)
        .map(|(&position, &other)| {
            let diff = other - position;
            let step = rng.random::<f64>() * diff;
            position + step + OSCILLATION_SCALE * levy_step(rng) * sign(diff)
        })
        .collect()
}

/// Small tournament on the scalar score, drawn from the archive or, while it is empty, the population.
fn select_leader<'s, R: Rng + ?Sized>(
    archive: &'s [SchedulingSolution],
    population: &'s [SchedulingSolution],
    rng: &mut R,
) -> &'s SchedulingSolution {
    let pool = if archive.is_empty() { population } else { archive };

    let mut best = &pool[rng.random_range(0..pool.len())];
    for _ in 1..LEADER_TOURNAMENT_SIZE.min(pool.len()) {
        let candidate = &pool[rng.random_range(0..pool.len())];
        if scalar_score(candidate) < scalar_score(best) {
            best = candidate;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sign_keeps_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-3.5), -1.0);
        assert_eq!(sign(2.0), 1.0);
    }

    #[test]
    fn test_snap_clamps_to_node_range() {
        assert_eq!(snap(-4.2, 3), 0);
        assert_eq!(snap(1.49, 3), 1);
        assert_eq!(snap(1.5, 3), 2);
        assert_eq!(snap(17.0, 3), 2);
    }

    #[test]
    fn test_levy_steps_are_finite() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..1000).map(|_| levy_step(&mut rng)).all(f64::is_finite));
    }

    #[test]
    fn test_mean_position_of_empty_population_is_zero() {
        assert_eq!(mean_position(&[], 3), vec![0.0; 3]);
        assert_eq!(mean_position(&[vec![0.0, 2.0], vec![2.0, 2.0]], 2), vec![1.0, 2.0]);
    }
}
