pub mod metrics;
pub mod pareto_utils;

pub use metrics::{ReferencePoint, auto_reference_point, hypervolume, spacing};
pub use pareto_utils::{crowding_distance, dominates, non_dominated, update_archive};
