use std::collections::HashMap;

use rand::RngCore;

use crate::domain::model::{Node, Objectives, SchedulingSolution, Task, TaskId};
use crate::domain::optimizer::{AlgorithmType, OptimizationOutcome, Optimizer, SchedulingProblem};
use crate::error::{Error, Result};

const FINISH_TOLERANCE: f64 = 1e-9;
const DELTA_TOLERANCE: f64 = 1e-12;

/// Placement already committed for a task.
#[derive(Debug, Clone, Copy)]
struct Placement {
    node: usize,
    finish: f64,
    output_size: f64,
}

/// Node choice under evaluation for the current task.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: usize,
    finish: f64,
    cost_delta: f64,
    energy_delta: f64,
}

impl Candidate {
    /// Lexicographic order on (finish, cost delta, energy delta) with small tolerances.
    fn is_better_than(&self, best: &Candidate) -> bool {
        let same_finish = (self.finish - best.finish).abs() <= FINISH_TOLERANCE;
        let same_cost = (self.cost_delta - best.cost_delta).abs() <= DELTA_TOLERANCE;

        self.finish < best.finish - FINISH_TOLERANCE
            || (same_finish && self.cost_delta < best.cost_delta - DELTA_TOLERANCE)
            || (same_finish && same_cost && self.energy_delta < best.energy_delta - DELTA_TOLERANCE)
    }
}

/// Single deterministic forward pass: every task goes to the node with the earliest finish time,
/// then the smallest added cost, then the smallest added energy. No backtracking.
pub struct GreedyAlgorithm<'a> {
    problem: SchedulingProblem<'a>,
}

impl<'a> GreedyAlgorithm<'a> {
    pub fn new(problem: SchedulingProblem<'a>) -> Self {
        Self { problem }
    }

    /// Builds the one greedy solution. Its objectives are accumulated during the pass itself.
    pub fn schedule(&self) -> Result<SchedulingSolution> {
        let tasks = self.problem.tasks();
        let nodes = self.problem.nodes();

        let mut placements: HashMap<&TaskId, Placement> = HashMap::with_capacity(tasks.len());
        let mut node_available_at = vec![0.0; nodes.len()];
        let mut assignment = Vec::with_capacity(tasks.len());

        let mut makespan: f64 = 0.0;
        let mut total_cost = 0.0;
        let mut total_energy = 0.0;

        for task in tasks {
            let mut best: Option<Candidate> = None;

            for (node_index, node) in nodes.iter().enumerate() {
                let exec_time = task.workload / node.compute_rate;
                let earliest_start = self.earliest_start(task, node_index, &placements)?;
                let start = earliest_start.max(node_available_at[node_index]);

                // Communication cost is recomputed here from scratch rather than reused from the start time.
                let candidate = Candidate {
                    node: node_index,
                    finish: start + exec_time,
                    cost_delta: exec_time * node.cost_rate + self.communication_cost(task, node_index, &placements)?,
                    energy_delta: exec_time * node.power_rate,
                };

                if best.is_none_or(|best| candidate.is_better_than(&best)) {
                    best = Some(candidate);
                }
            }

            let Some(chosen) = best else {
                return Err(Error::InvalidAssignment(format!("no node could host task {}", task.id)));
            };

            let node: &Node = &nodes[chosen.node];
            let exec_time = task.workload / node.compute_rate;
            let start = self.earliest_start(task, chosen.node, &placements)?.max(node_available_at[chosen.node]);
            let finish = start + exec_time;

            total_cost += self.communication_cost(task, chosen.node, &placements)?;
            total_cost += exec_time * node.cost_rate;
            total_energy += exec_time * node.power_rate;
            makespan = makespan.max(finish);

            node_available_at[chosen.node] = finish;
            placements.insert(&task.id, Placement { node: chosen.node, finish, output_size: task.output_size });
            assignment.push(chosen.node);
        }

        Ok(SchedulingSolution::new(assignment, Objectives::new(makespan, total_cost, total_energy)))
    }

    fn earliest_start(&self, task: &Task, node_index: usize, placements: &HashMap<&TaskId, Placement>) -> Result<f64> {
        let mut earliest: f64 = 0.0;
        for predecessor in &task.predecessors {
            let placement = placed(task, predecessor, placements)?;
            let comm_time = self.communication_time(&placement, node_index);
            earliest = earliest.max(placement.finish + comm_time);
        }
        Ok(earliest)
    }

    fn communication_cost(&self, task: &Task, node_index: usize, placements: &HashMap<&TaskId, Placement>) -> Result<f64> {
        let mut cost = 0.0;
        for predecessor in &task.predecessors {
            let placement = placed(task, predecessor, placements)?;
            if placement.node != node_index {
                cost += self.communication_time(&placement, node_index) * self.problem.network().network_cost_per_second();
            }
        }
        Ok(cost)
    }

    fn communication_time(&self, predecessor: &Placement, to: usize) -> f64 {
        if predecessor.node == to {
            return 0.0;
        }
        let nodes = self.problem.nodes();
        self.problem.network().transfer_time(&nodes[predecessor.node].id, &nodes[to].id, predecessor.output_size)
    }
}

fn placed(task: &Task, predecessor: &TaskId, placements: &HashMap<&TaskId, Placement>) -> Result<Placement> {
    placements.get(predecessor).copied().ok_or_else(|| Error::BrokenTopologicalOrder {
        task: task.id.to_string(),
        predecessor: predecessor.to_string(),
    })
}

impl Optimizer for GreedyAlgorithm<'_> {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::Greedy
    }

    fn run(&mut self, _rng: &mut dyn RngCore) -> Result<OptimizationOutcome> {
        let solution = self.schedule()?;
        Ok(OptimizationOutcome { archive: vec![solution], hypervolume_history: Vec::new() })
    }
}
