pub mod infrastructure;
pub mod scenario;
pub mod topology_builder;

pub use infrastructure::build_infrastructure;
pub use scenario::{ScenarioProfile, TopologyScenario};
pub use topology_builder::{TierPairValues, TopologyParams, build_network};
