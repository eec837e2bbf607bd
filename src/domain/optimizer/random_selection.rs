use rand::{Rng, RngCore};
use serde::Deserialize;

use crate::domain::model::SchedulingSolution;
use crate::domain::optimizer::{AlgorithmType, OptimizationOutcome, Optimizer, SchedulingProblem, require_nonzero};
use crate::domain::pareto::update_archive;
use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RandomSelectionParams {
    pub sample_count: usize,
    pub archive_max_size: usize,
}

impl Default for RandomSelectionParams {
    fn default() -> Self {
        Self { sample_count: 100, archive_max_size: 50 }
    }
}

impl RandomSelectionParams {
    pub fn validate(&self) -> Result<()> {
        require_nonzero("random.sampleCount", self.sample_count)?;
        require_nonzero("random.archiveMaxSize", self.archive_max_size)
    }
}

/// Baseline drawing independent uniform assignments and keeping their non-dominated archive.
pub struct RandomSelection<'a> {
    problem: SchedulingProblem<'a>,
    params: RandomSelectionParams,
}

impl<'a> RandomSelection<'a> {
    pub fn new(problem: SchedulingProblem<'a>, params: RandomSelectionParams) -> Self {
        Self { problem, params }
    }

    /// Evaluates `sample_count` random placements and returns at most `archive_max_size` mutually non-dominated ones.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<SchedulingSolution>> {
        let samples = (0..self.params.sample_count)
            .map(|_| self.problem.random_solution(rng))
            .collect::<Result<Vec<_>>>()?;

        Ok(update_archive(&[], &samples, self.params.archive_max_size))
    }
}

impl Optimizer for RandomSelection<'_> {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::Random
    }

    fn run(&mut self, rng: &mut dyn RngCore) -> Result<OptimizationOutcome> {
        let archive = self.sample(rng)?;
        log::debug!("Random selection kept {} of {} samples.", archive.len(), self.params.sample_count);
        Ok(OptimizationOutcome { archive, hypervolume_history: Vec::new() })
    }
}
