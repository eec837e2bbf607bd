pub mod id;
pub mod network;
pub mod node;
pub mod solution;
pub mod task;

pub use id::{NodeId, TaskId};
pub use network::NetworkModel;
pub use node::{Node, Position, Tier};
pub use solution::{Objectives, SchedulingSolution};
pub use task::Task;
