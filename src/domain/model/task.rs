use serde::Serialize;

use crate::domain::model::id::TaskId;

/// A unit of work in a workflow DAG.
///
/// `workload` is an abstract instruction count, `output_size` the volume of data
/// handed to every successor placed on a different node. Predecessors are referenced by id
/// and must appear earlier in any task sequence given to the simulator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub workload: f64,
    pub output_size: f64,
    pub predecessors: Vec<TaskId>,
}

impl Task {
    pub fn new(id: impl Into<String>, workload: f64, output_size: f64) -> Self {
        Self { id: TaskId::new(id), workload, output_size, predecessors: Vec::new() }
    }

    /// Builder-style variant of [`Task::add_predecessor`].
    pub fn with_predecessors<I, S>(mut self, predecessors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for predecessor in predecessors {
            self.add_predecessor(TaskId::new(predecessor));
        }
        self
    }

    /// Adds a predecessor once; repeated edges are ignored.
    pub fn add_predecessor(&mut self, predecessor: TaskId) {
        if !self.predecessors.contains(&predecessor) {
            self.predecessors.push(predecessor);
        }
    }
}
