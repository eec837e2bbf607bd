pub mod simulator;

pub use simulator::{SimulationResult, assignment_to_map, simulate};
