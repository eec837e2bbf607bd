use serde::Serialize;

/// The three minimisation objectives of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Objectives {
    pub makespan: f64,
    pub cost: f64,
    pub energy: f64,
}

impl Objectives {
    pub fn new(makespan: f64, cost: f64, energy: f64) -> Self {
        Self { makespan, cost, energy }
    }
}

/// A task -> node placement together with its evaluated objectives.
///
/// `assignment[i]` is the index (into the node list) chosen for task `i`. A solution only
/// exists once it has been evaluated, so the objectives are never mutated afterwards.
/// Archive deduplication compares assignments, never objectives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulingSolution {
    assignment: Vec<usize>,
    objectives: Objectives,
}

impl SchedulingSolution {
    pub fn new(assignment: Vec<usize>, objectives: Objectives) -> Self {
        Self { assignment, objectives }
    }

    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    pub fn objectives(&self) -> Objectives {
        self.objectives
    }

    pub fn makespan(&self) -> f64 {
        self.objectives.makespan
    }

    pub fn cost(&self) -> f64 {
        self.objectives.cost
    }

    pub fn energy(&self) -> f64 {
        self.objectives.energy
    }

    /// Objective by position: 0 = makespan, 1 = cost, anything else = energy.
    pub fn objective(&self, index: usize) -> f64 {
        match index {
            0 => self.objectives.makespan,
            1 => self.objectives.cost,
            _ => self.objectives.energy,
        }
    }

    pub fn same_assignment(&self, other: &SchedulingSolution) -> bool {
        self.assignment == other.assignment
    }
}
