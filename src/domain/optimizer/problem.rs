use std::collections::HashSet;

use rand::Rng;

use crate::domain::model::{NetworkModel, Node, SchedulingSolution, Task, TaskId};
use crate::domain::simulator::{assignment_to_map, simulate};
use crate::error::{Error, Result};

/// The fixed inputs every search strategy shares: a topologically ordered workflow,
/// the node list and the network between the nodes.
///
/// Borrowed, cheap to copy, and never mutated during a run.
#[derive(Debug, Clone, Copy)]
pub struct SchedulingProblem<'a> {
    tasks: &'a [Task],
    nodes: &'a [Node],
    network: &'a NetworkModel,
}

impl<'a> SchedulingProblem<'a> {
    /// Checks the preconditions of the simulator once, up front: at least one node, and every
    /// predecessor listed before its dependents.
    pub fn new(tasks: &'a [Task], nodes: &'a [Node], network: &'a NetworkModel) -> Result<Self> {
        if nodes.is_empty() {
            return Err(Error::InvalidAssignment("no nodes available to place tasks on".to_string()));
        }

        let mut seen: HashSet<&TaskId> = HashSet::with_capacity(tasks.len());
        for task in tasks {
            if let Some(missing) = task.predecessors.iter().find(|predecessor| !seen.contains(predecessor)) {
                return Err(Error::BrokenTopologicalOrder { task: task.id.to_string(), predecessor: missing.to_string() });
            }
            seen.insert(&task.id);
        }

        Ok(Self { tasks, nodes, network })
    }

    pub fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    pub fn network(&self) -> &'a NetworkModel {
        self.network
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Runs the simulator on an index-based assignment and wraps the result.
    pub fn evaluate(&self, assignment: Vec<usize>) -> Result<SchedulingSolution> {
        let assignment_map = assignment_to_map(&assignment, self.tasks, self.nodes)?;
        let result = simulate(self.tasks, self.nodes, &assignment_map, self.network)?;
        Ok(SchedulingSolution::new(assignment, result.into()))
    }

    /// Uniformly random node index per task.
    pub fn random_assignment<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        (0..self.tasks.len()).map(|_| self.random_node(rng)).collect()
    }

    pub fn random_node<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.nodes.len())
    }

    pub fn random_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SchedulingSolution> {
        let assignment = self.random_assignment(rng);
        self.evaluate(assignment)
    }
}
