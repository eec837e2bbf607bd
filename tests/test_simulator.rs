use std::collections::HashMap;

use mo_workflow_scheduler::domain::model::{NetworkModel, Node, NodeId, TaskId, Task, Tier};
use mo_workflow_scheduler::domain::simulator::{assignment_to_map, simulate};
use mo_workflow_scheduler::error::Error;

const EPS: f64 = 1e-12;

fn fog_and_cloud() -> Vec<Node> {
    vec![Node::new("fog1", Tier::Fog, 6000.0, 0.0012, 90.0), Node::new("cloud1", Tier::Cloud, 20000.0, 0.01, 600.0)]
}

fn fog_cloud_network() -> NetworkModel {
    let mut network = NetworkModel::new();
    network.set_link(&NodeId::new("fog1"), &NodeId::new("cloud1"), 0.05, 100.0);
    network.set_link(&NodeId::new("cloud1"), &NodeId::new("fog1"), 0.05, 100.0);
    network
}

fn assign(pairs: &[(&str, &str)]) -> HashMap<TaskId, NodeId> {
    pairs.iter().map(|(task, node)| (TaskId::new(*task), NodeId::new(*node))).collect()
}

#[test]
fn test_cross_node_dependency_pays_latency_and_transfer() {
    let tasks = vec![Task::new("t1", 600.0, 5.0), Task::new("t2", 2000.0, 1.0).with_predecessors(["t1"])];
    let nodes = fog_and_cloud();
    let network = fog_cloud_network();

    let result = simulate(&tasks, &nodes, &assign(&[("t1", "fog1"), ("t2", "cloud1")]), &network).unwrap();

    let exec_t1 = 600.0 / 6000.0;
    let exec_t2 = 2000.0 / 20000.0;
    let comm: f64 = 0.05 + 5.0 / 100.0;
    assert!((comm - 0.10).abs() < EPS);
    assert!((result.makespan - (exec_t1 + comm + exec_t2)).abs() < EPS);

    let expected_cost = exec_t1 * 0.0012 + exec_t2 * 0.01 + comm * network.network_cost_per_second();
    assert!((result.total_cost - expected_cost).abs() < EPS);
    assert!((result.total_energy - (exec_t1 * 90.0 + exec_t2 * 600.0)).abs() < EPS);
}

#[test]
fn test_same_node_dependency_has_no_communication() {
    let tasks = vec![Task::new("t1", 600.0, 5.0), Task::new("t2", 1200.0, 1.0).with_predecessors(["t1"])];
    let nodes = fog_and_cloud();
    let network = fog_cloud_network();

    let result = simulate(&tasks, &nodes, &assign(&[("t1", "fog1"), ("t2", "fog1")]), &network).unwrap();

    assert!((result.makespan - 0.3).abs() < EPS);
    assert!((result.total_cost - 0.3 * 0.0012).abs() < EPS);
}

#[test]
fn test_node_runs_one_task_at_a_time() {
    let tasks = vec![Task::new("a", 6000.0, 0.0), Task::new("b", 6000.0, 0.0)];
    let nodes = fog_and_cloud();

    let result = simulate(&tasks, &nodes, &assign(&[("a", "fog1"), ("b", "fog1")]), &NetworkModel::new()).unwrap();

    assert!((result.makespan - 2.0).abs() < EPS);
}

#[test]
fn test_independent_tasks_on_different_nodes_overlap() {
    let tasks = vec![Task::new("a", 6000.0, 0.0), Task::new("b", 20000.0, 0.0)];
    let nodes = fog_and_cloud();

    let result = simulate(&tasks, &nodes, &assign(&[("a", "fog1"), ("b", "cloud1")]), &NetworkModel::new()).unwrap();

    assert!((result.makespan - 1.0).abs() < EPS);
}

#[test]
fn test_simulation_is_pure() {
    let tasks = vec![
        Task::new("a", 900.0, 3.0),
        Task::new("b", 1300.0, 2.0).with_predecessors(["a"]),
        Task::new("c", 700.0, 4.0).with_predecessors(["a"]),
        Task::new("d", 2100.0, 0.0).with_predecessors(["b", "c"]),
    ];
    let nodes = fog_and_cloud();
    let network = fog_cloud_network();
    let assignment = assign(&[("a", "fog1"), ("b", "cloud1"), ("c", "fog1"), ("d", "cloud1")]);

    let first = simulate(&tasks, &nodes, &assignment, &network).unwrap();
    let second = simulate(&tasks, &nodes, &assignment, &network).unwrap();

    assert_eq!(first.makespan.to_bits(), second.makespan.to_bits());
    assert_eq!(first.total_cost.to_bits(), second.total_cost.to_bits());
    assert_eq!(first.total_energy.to_bits(), second.total_energy.to_bits());
}

#[test]
fn test_missing_assignment_is_rejected() {
    let tasks = vec![Task::new("t1", 600.0, 5.0), Task::new("t2", 600.0, 0.0)];
    let nodes = fog_and_cloud();

    let result = simulate(&tasks, &nodes, &assign(&[("t1", "fog1")]), &NetworkModel::new());

    assert!(matches!(result, Err(Error::InvalidAssignment(_))));
}

#[test]
fn test_unknown_node_is_rejected() {
    let tasks = vec![Task::new("t1", 600.0, 5.0)];
    let nodes = fog_and_cloud();

    let result = simulate(&tasks, &nodes, &assign(&[("t1", "edge7")]), &NetworkModel::new());

    assert!(matches!(result, Err(Error::InvalidAssignment(_))));
}

#[test]
fn test_predecessor_after_dependent_breaks_order() {
    let tasks = vec![Task::new("t2", 600.0, 0.0).with_predecessors(["t1"]), Task::new("t1", 600.0, 5.0)];
    let nodes = fog_and_cloud();

    let result = simulate(&tasks, &nodes, &assign(&[("t1", "fog1"), ("t2", "fog1")]), &NetworkModel::new());

    match result {
        Err(Error::BrokenTopologicalOrder { task, predecessor }) => {
            assert_eq!(task, "t2");
            assert_eq!(predecessor, "t1");
        }
        other => panic!("expected BrokenTopologicalOrder, got {:?}", other),
    }
}

#[test]
fn test_assignment_vector_conversion() {
    let tasks = vec![Task::new("t1", 1.0, 0.0), Task::new("t2", 1.0, 0.0)];
    let nodes = fog_and_cloud();

    let map = assignment_to_map(&[1, 0], &tasks, &nodes).unwrap();
    assert_eq!(map[&TaskId::new("t1")], NodeId::new("cloud1"));
    assert_eq!(map[&TaskId::new("t2")], NodeId::new("fog1"));

    assert!(matches!(assignment_to_map(&[0, 2], &tasks, &nodes), Err(Error::InvalidAssignment(_))));
    assert!(matches!(assignment_to_map(&[0], &tasks, &nodes), Err(Error::InvalidAssignment(_))));
}
