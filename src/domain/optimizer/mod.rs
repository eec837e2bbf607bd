pub mod greedy;
pub mod moaco;
pub mod mojs;
pub mod problem;
pub mod random_selection;

use rand::RngCore;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::model::SchedulingSolution;
use crate::domain::pareto::ReferencePoint;
use crate::error::{ConversionError, Error, Result};

pub use greedy::GreedyAlgorithm;
pub use moaco::{MoAntColonyOptimizer, MoacoParams};
pub use mojs::{MoJellyfishOptimizer, MojsParams};
pub use problem::SchedulingProblem;
pub use random_selection::{RandomSelection, RandomSelectionParams};

/// What a search strategy hands back: its final archive and, for the metaheuristics,
/// one hypervolume value per generation.
#[derive(Debug, Clone, Default)]
pub struct OptimizationOutcome {
    pub archive: Vec<SchedulingSolution>,
    pub hypervolume_history: Vec<f64>,
}

/// A placement strategy evaluated through the shared simulator and archive contracts.
///
/// All randomness is drawn from the generator passed to `run`, so a fixed seed replays a run exactly.
pub trait Optimizer {
    fn algorithm(&self) -> AlgorithmType;

    fn run(&mut self, rng: &mut dyn RngCore) -> Result<OptimizationOutcome>;
}

/// Parameter blocks for every strategy, as found in the `algorithms` section of a run configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlgorithmParams {
    pub mojs: MojsParams,
    pub moaco: MoacoParams,
    pub random: RandomSelectionParams,
}

impl AlgorithmParams {
    /// Rejects parameter blocks that would break a strategy, e.g. a zero pheromone floor or a probability outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        self.mojs.validate()?;
        self.moaco.validate()?;
        self.random.validate()
    }
}

pub(crate) fn require_nonzero(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::ConfigurationError(format!("'algorithms.{}' must be > 0", name)));
    }
    Ok(())
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<()> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(Error::ConfigurationError(format!("'algorithms.{}' must be a finite value > 0, got {}", name, value)));
    }
    Ok(())
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if !(value >= 0.0 && value.is_finite()) {
        return Err(Error::ConfigurationError(format!("'algorithms.{}' must be a finite value >= 0, got {}", name, value)));
    }
    Ok(())
}

/// Probabilities and ratios live in `[0, 1]`.
pub(crate) fn require_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::ConfigurationError(format!("'algorithms.{}' must be in [0, 1], got {}", name, value)));
    }
    Ok(())
}

/// The strategies compared by an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlgorithmType {
    /// Multi-objective jellyfish search with operator-based discretisation.
    Mojs,
    /// Multi-objective ant colony optimisation driven by pheromone only.
    Moaco,
    /// Uniform random sampling baseline.
    Random,
    /// Single-pass earliest-finish greedy baseline.
    Greedy,
}

impl AlgorithmType {
    pub const ALL: [AlgorithmType; 4] = [AlgorithmType::Mojs, AlgorithmType::Moaco, AlgorithmType::Random, AlgorithmType::Greedy];

    /// Short lowercase name used in file names and CSV headers.
    pub fn file_tag(&self) -> &'static str {
        match self {
            AlgorithmType::Mojs => "mojs",
            AlgorithmType::Moaco => "aco",
            AlgorithmType::Random => "random",
            AlgorithmType::Greedy => "greedy",
        }
    }

    /// Factory returning a ready-to-run instance of the strategy.
    pub fn get_instance<'a>(
        &self,
        problem: SchedulingProblem<'a>,
        params: &AlgorithmParams,
        reference_point: Option<ReferencePoint>,
    ) -> Box<dyn Optimizer + 'a> {
        match self {
            AlgorithmType::Mojs => Box::new(MoJellyfishOptimizer::new(problem, params.mojs.clone(), reference_point)),
            AlgorithmType::Moaco => Box::new(MoAntColonyOptimizer::new(problem, params.moaco.clone(), reference_point)),
            AlgorithmType::Random => Box::new(RandomSelection::new(problem, params.random.clone())),
            AlgorithmType::Greedy => Box::new(GreedyAlgorithm::new(problem)),
        }
    }
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmType::Mojs => "MOJS",
            AlgorithmType::Moaco => "MO-ACO",
            AlgorithmType::Random => "RANDOM",
            AlgorithmType::Greedy => "GREEDY",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AlgorithmType {
    type Err = ConversionError;

    fn from_str(algorithm: &str) -> std::result::Result<AlgorithmType, Self::Err> {
        match algorithm.trim().to_ascii_uppercase().as_str() {
            "MOJS" => Ok(AlgorithmType::Mojs),
            "MOACO" | "MO-ACO" | "ACO" => Ok(AlgorithmType::Moaco),
            "RANDOM" => Ok(AlgorithmType::Random),
            "GREEDY" => Ok(AlgorithmType::Greedy),
            _ => Err(ConversionError::UnknownAlgorithm(algorithm.to_string())),
        }
    }
}
