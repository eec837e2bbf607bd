use rand::SeedableRng;
use rand::rngs::StdRng;

use mo_workflow_scheduler::domain::model::{NetworkModel, Node, Task, Tier};
use mo_workflow_scheduler::domain::optimizer::{GreedyAlgorithm, Optimizer, RandomSelection, RandomSelectionParams, SchedulingProblem};
use mo_workflow_scheduler::domain::pareto::dominates;
use mo_workflow_scheduler::domain::topology::{TopologyParams, build_network};
use mo_workflow_scheduler::domain::workflow::dam_workflow;

fn three_tier_nodes() -> Vec<Node> {
    vec![
        Node::new("edge1", Tier::Edge, 1500.0, 0.00045, 15.0),
        Node::new("fog1", Tier::Fog, 6000.0, 0.0012, 90.0),
        Node::new("cloud1", Tier::Cloud, 20000.0, 0.01, 600.0),
    ]
}

#[test]
fn test_greedy_returns_exactly_one_solution() {
    let tasks = dam_workflow();
    let nodes = three_tier_nodes();
    let network = build_network(&nodes, &TopologyParams::default());
    let problem = SchedulingProblem::new(&tasks, &nodes, &network).unwrap();

    let outcome = GreedyAlgorithm::new(problem).run(&mut StdRng::seed_from_u64(0)).unwrap();

    assert_eq!(outcome.archive.len(), 1);
    assert!(outcome.hypervolume_history.is_empty());
}

#[test]
fn test_greedy_objectives_match_the_simulator() {
    let tasks = dam_workflow();
    let nodes = three_tier_nodes();
    let network = build_network(&nodes, &TopologyParams::default());
    let problem = SchedulingProblem::new(&tasks, &nodes, &network).unwrap();

    let greedy = GreedyAlgorithm::new(problem).schedule().unwrap();
    let simulated = problem.evaluate(greedy.assignment().to_vec()).unwrap();

    assert!((greedy.makespan() - simulated.makespan()).abs() < 1e-9);
    assert!((greedy.cost() - simulated.cost()).abs() < 1e-9);
    assert!((greedy.energy() - simulated.energy()).abs() < 1e-9);
}

#[test]
fn test_greedy_is_deterministic() {
    let tasks = dam_workflow();
    let nodes = three_tier_nodes();
    let network = build_network(&nodes, &TopologyParams::default());
    let problem = SchedulingProblem::new(&tasks, &nodes, &network).unwrap();

    assert_eq!(GreedyAlgorithm::new(problem).schedule().unwrap(), GreedyAlgorithm::new(problem).schedule().unwrap());
}

#[test]
fn test_greedy_breaks_finish_ties_on_cost() {
    let tasks = vec![Task::new("a", 2000.0, 0.0), Task::new("b", 2000.0, 0.0)];
    let nodes = vec![Node::new("fast", Tier::Cloud, 2000.0, 0.01, 10.0), Node::new("slow", Tier::Edge, 1000.0, 0.001, 10.0)];
    let network = NetworkModel::new();
    let problem = SchedulingProblem::new(&tasks, &nodes, &network).unwrap();

    let solution = GreedyAlgorithm::new(problem).schedule().unwrap();

    // "a" finishes first on the fast node; "b" finishes at 2.0 on either node and the slow one is cheaper.
    assert_eq!(solution.assignment(), &[0, 1]);
    assert!((solution.makespan() - 2.0).abs() < 1e-12);
}

#[test]
fn test_random_selection_respects_archive_bound() {
    let tasks = dam_workflow();
    let nodes = three_tier_nodes();
    let network = build_network(&nodes, &TopologyParams::default());
    let problem = SchedulingProblem::new(&tasks, &nodes, &network).unwrap();

    for archive_max_size in [1, 5, 50] {
        let selection = RandomSelection::new(problem, RandomSelectionParams { sample_count: 200, archive_max_size });
        let front = selection.sample(&mut StdRng::seed_from_u64(42)).unwrap();

        assert!(!front.is_empty());
        assert!(front.len() <= archive_max_size);
        for a in &front {
            for b in &front {
                assert!(!dominates(a, b));
            }
        }
    }
}

#[test]
fn test_random_selection_with_fixed_seed_is_reproducible() {
    let tasks = dam_workflow();
    let nodes = three_tier_nodes();
    let network = NetworkModel::new();
    let problem = SchedulingProblem::new(&tasks, &nodes, &network).unwrap();
    let mut selection = RandomSelection::new(problem, RandomSelectionParams::default());

    let first = selection.run(&mut StdRng::seed_from_u64(3)).unwrap();
    let second = selection.run(&mut StdRng::seed_from_u64(3)).unwrap();

    assert_eq!(first.archive, second.archive);
}
