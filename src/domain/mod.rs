pub mod model;
pub mod optimizer;
pub mod pareto;
pub mod simulator;
pub mod topology;
pub mod workflow;
