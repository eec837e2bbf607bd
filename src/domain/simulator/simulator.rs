use serde::Serialize;
use std::collections::HashMap;

use crate::domain::model::{NetworkModel, Node, NodeId, Objectives, Task, TaskId};
use crate::error::{Error, Result};

/// Outcome of one deterministic workflow execution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationResult {
    pub makespan: f64,
    pub total_cost: f64,
    pub total_energy: f64,
}

impl From<SimulationResult> for Objectives {
    fn from(result: SimulationResult) -> Self {
        Objectives::new(result.makespan, result.total_cost, result.total_energy)
    }
}

/**
 * Executes a workflow for a given task -> node placement.
 *
 * Single forward pass over `tasks`, which must be topologically ordered. A task starts once
 * every predecessor has finished and its output has crossed the network (latency plus
 * `output_size / bandwidth` when the predecessor sits on another node), and once its own node
 * is free. Nodes run one task at a time in the order tasks are given, without preemption.
 *
 * Compute cost and energy are `exec_time * cost_rate` and `exec_time * power_rate`; every
 * cross-node transfer adds `comm_time * network_cost_per_second` to the cost.
 *
 * Errors:
 * - `InvalidAssignment` when a task has no entry or its node id is unknown.
 * - `BrokenTopologicalOrder` when a predecessor has not been scheduled yet.
 */
pub fn simulate(tasks: &[Task], nodes: &[Node], assignment: &HashMap<TaskId, NodeId>, network: &NetworkModel) -> Result<SimulationResult> {
    let node_by_id: HashMap<&NodeId, &Node> = nodes.iter().map(|node| (&node.id, node)).collect();
    let mut node_available_at: HashMap<&NodeId, f64> = nodes.iter().map(|node| (&node.id, 0.0)).collect();
    let mut scheduled: HashMap<&TaskId, ScheduledTask> = HashMap::with_capacity(tasks.len());

    let mut total_cost = 0.0;
    let mut total_energy = 0.0;
    let mut makespan: f64 = 0.0;

    for task in tasks {
        let node_id = assignment
            .get(&task.id)
            .ok_or_else(|| Error::InvalidAssignment(format!("no node assigned to task '{}'", task.id)))?;
        let node = node_by_id
            .get(node_id)
            .copied()
            .ok_or_else(|| Error::InvalidAssignment(format!("task '{}' assigned to unknown node '{}'", task.id, node_id)))?;

        let exec_time = task.workload / node.compute_rate;

        let mut earliest_start: f64 = 0.0;
        for predecessor_id in &task.predecessors {
            let predecessor = scheduled.get(predecessor_id).ok_or_else(|| Error::BrokenTopologicalOrder {
                task: task.id.to_string(),
                predecessor: predecessor_id.to_string(),
            })?;

            let mut comm_time = 0.0;
            if predecessor.node != node_id {
                comm_time = network.transfer_time(predecessor.node, node_id, predecessor.output_size);
                total_cost += comm_time * network.network_cost_per_second();
            }

            earliest_start = earliest_start.max(predecessor.finish + comm_time);
        }

        let resource_ready = node_available_at.get(node_id).copied().unwrap_or(0.0);
        let start = earliest_start.max(resource_ready);
        let finish = start + exec_time;

        node_available_at.insert(&node.id, finish);
        scheduled.insert(&task.id, ScheduledTask { node: &node.id, finish, output_size: task.output_size });

        total_cost += exec_time * node.cost_rate;
        total_energy += exec_time * node.power_rate;
        makespan = makespan.max(finish);
    }

    Ok(SimulationResult { makespan, total_cost, total_energy })
}

struct ScheduledTask<'a> {
    node: &'a NodeId,
    finish: f64,
    output_size: f64,
}

/// Maps an index-based assignment vector onto the id-keyed form [`simulate`] consumes.
///
/// `assignment[i]` names the node index for `tasks[i]`; lengths must match and every index
/// must be in range.
pub fn assignment_to_map(assignment: &[usize], tasks: &[Task], nodes: &[Node]) -> Result<HashMap<TaskId, NodeId>> {
    if assignment.len() != tasks.len() {
        return Err(Error::InvalidAssignment(format!(
            "assignment has {} entries for {} tasks",
            assignment.len(),
            tasks.len()
        )));
    }

    let mut map = HashMap::with_capacity(tasks.len());
    for (task, &node_index) in tasks.iter().zip(assignment) {
        let node = nodes.get(node_index).ok_or_else(|| {
            Error::InvalidAssignment(format!("task '{}' assigned to node index {} of {}", task.id, node_index, nodes.len()))
        })?;
        map.insert(task.id.clone(), node.id.clone());
    }
    Ok(map)
}
