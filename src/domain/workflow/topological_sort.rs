use std::collections::{HashMap, VecDeque};

use crate::domain::model::{Task, TaskId};
use crate::error::{Error, Result};

/**
 * Orders `tasks` so that every predecessor precedes its dependents (Kahn's algorithm).
 *
 * Ready tasks are released in input order, so the result is deterministic and an already valid
 * order is returned unchanged.
 *
 * Errors with `WorkflowError` on a duplicate task id, a predecessor that names no task, or a cycle.
 */
pub fn topological_sort(tasks: Vec<Task>) -> Result<Vec<Task>> {
    let mut index_by_id: HashMap<&TaskId, usize> = HashMap::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        if index_by_id.insert(&task.id, index).is_some() {
            return Err(Error::WorkflowError(format!("duplicate task id '{}'", task.id)));
        }
    }

    let mut in_degree = vec![0usize; tasks.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    for (index, task) in tasks.iter().enumerate() {
        for predecessor in &task.predecessors {
            let &predecessor_index = index_by_id.get(predecessor).ok_or_else(|| {
                Error::WorkflowError(format!("task '{}' depends on unknown task '{}'", task.id, predecessor))
            })?;
            successors[predecessor_index].push(index);
            in_degree[index] += 1;
        }
    }

    let mut ready: VecDeque<usize> = (0..tasks.len()).filter(|&index| in_degree[index] == 0).collect();
    let mut order = Vec::with_capacity(tasks.len());
    while let Some(index) = ready.pop_front() {
        order.push(index);
        for &successor in &successors[index] {
            in_degree[successor] -= 1;
            if in_degree[successor] == 0 {
                ready.push_back(successor);
            }
        }
    }

    if order.len() < tasks.len() {
        let stuck: Vec<String> = (0..tasks.len()).filter(|&index| in_degree[index] > 0).map(|index| tasks[index].id.to_string()).collect();
        return Err(Error::WorkflowError(format!("dependency cycle among tasks [{}]", stuck.join(", "))));
    }

    let mut slots: Vec<Option<Task>> = tasks.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|index| slots[index].take()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.id.as_str()).collect()
    }

    #[test]
    fn test_reverse_chain_is_reordered() {
        let tasks = vec![
            Task::new("c", 1.0, 0.0).with_predecessors(["b"]),
            Task::new("b", 1.0, 0.0).with_predecessors(["a"]),
            Task::new("a", 1.0, 0.0),
        ];

        let sorted = topological_sort(tasks).unwrap();

        assert_eq!(ids(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_valid_order_is_kept() {
        let tasks = vec![Task::new("x", 1.0, 0.0), Task::new("y", 1.0, 0.0), Task::new("z", 1.0, 0.0).with_predecessors(["x", "y"])];

        let sorted = topological_sort(tasks).unwrap();

        assert_eq!(ids(&sorted), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_cycle_is_an_error() {
        let tasks = vec![Task::new("a", 1.0, 0.0).with_predecessors(["b"]), Task::new("b", 1.0, 0.0).with_predecessors(["a"])];

        assert!(matches!(topological_sort(tasks), Err(Error::WorkflowError(_))));
    }

    #[test]
    fn test_unknown_predecessor_is_an_error() {
        let tasks = vec![Task::new("a", 1.0, 0.0).with_predecessors(["ghost"])];

        assert!(matches!(topological_sort(tasks), Err(Error::WorkflowError(_))));
    }
}
