use std::cmp::Ordering;

use crate::domain::model::SchedulingSolution;

/// Number of objectives every solution carries.
pub const OBJECTIVE_COUNT: usize = 3;

/// Ranges narrower than this are treated as degenerate by the crowding distance.
const DEGENERATE_RANGE: f64 = 1e-12;

/// Returns `true` iff `a` is no worse than `b` on every objective and strictly better on at least one.
pub fn dominates(a: &SchedulingSolution, b: &SchedulingSolution) -> bool {
    let mut strictly_better = false;

    for objective in 0..OBJECTIVE_COUNT {
        let (value_a, value_b) = (a.objective(objective), b.objective(objective));
        if value_a > value_b {
            return false;
        }
        if value_a < value_b {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Merges `archive` with `candidates` and returns the bounded non-dominated archive.
///
/// Merge -> remove duplicate assignments (first occurrence wins) -> keep the non-dominated
/// subset -> if more than `max_size` remain, keep the `max_size` solutions with the largest
/// crowding distance. Ties keep their merge order.
pub fn update_archive(archive: &[SchedulingSolution], candidates: &[SchedulingSolution], max_size: usize) -> Vec<SchedulingSolution> {
    let merged: Vec<&SchedulingSolution> = archive.iter().chain(candidates.iter()).collect();
    let unique = remove_duplicate_assignments(merged);
    let front = non_dominated(&unique);

    if front.len() <= max_size {
        return front.into_iter().cloned().collect();
    }

    let distances = crowding_distance(&front);
    let mut order: Vec<usize> = (0..front.len()).collect();
    order.sort_by(|&i, &j| distances[j].total_cmp(&distances[i]));
    order.truncate(max_size);

    log::trace!("Archive truncated from {} to {} solutions by crowding distance.", front.len(), max_size);

    order.into_iter().map(|index| front[index].clone()).collect()
}

/// Keeps every solution that no other member of `solutions` dominates.
pub fn non_dominated<'a>(solutions: &[&'a SchedulingSolution]) -> Vec<&'a SchedulingSolution> {
    solutions
        .iter()
        .enumerate()
        .filter(|&(i, candidate)| !solutions.iter().enumerate().any(|(j, other)| i != j && dominates(other, candidate)))
        .map(|(_, solution)| *solution)
        .collect()
}

fn remove_duplicate_assignments(solutions: Vec<&SchedulingSolution>) -> Vec<&SchedulingSolution> {
    let mut unique: Vec<&SchedulingSolution> = Vec::with_capacity(solutions.len());
    for solution in solutions {
        if !unique.iter().any(|kept| kept.same_assignment(solution)) {
            unique.push(solution);
        }
    }
    unique
}

/// Crowding distance per member of `front`, indexed like `front`.
///
/// For each objective the front is sorted; both extremes get `+inf` and every interior member
/// accumulates `(next - prev) / (max - min)`. Degenerate ranges contribute nothing. Fronts of
/// two or fewer members are all extreme.
pub fn crowding_distance(front: &[&SchedulingSolution]) -> Vec<f64> {
    let n = front.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let mut distance = vec![0.0; n];
    for objective in 0..OBJECTIVE_COUNT {
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&i, &j| front[i].objective(objective).partial_cmp(&front[j].objective(objective)).unwrap_or(Ordering::Equal));

        let first = order[0];
        let last = order[n - 1];
        distance[first] = f64::INFINITY;
        distance[last] = f64::INFINITY;

        let min = front[first].objective(objective);
        let max = front[last].objective(objective);
        let range = max - min;
        if range.abs() < DEGENERATE_RANGE {
            continue;
        }

        for window in order.windows(3) {
            let (prev, current, next) = (window[0], window[1], window[2]);
            if distance[current].is_infinite() {
                continue;
            }
            distance[current] += (front[next].objective(objective) - front[prev].objective(objective)) / range;
        }
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Objectives;

    fn solution(assignment: Vec<usize>, makespan: f64, cost: f64, energy: f64) -> SchedulingSolution {
        SchedulingSolution::new(assignment, Objectives::new(makespan, cost, energy))
    }

    #[test]
    fn test_crowding_distance_interior_values() {
        let a = solution(vec![0], 0.0, 4.0, 0.0);
        let b = solution(vec![1], 1.0, 3.0, 0.0);
        let c = solution(vec![2], 2.0, 1.0, 0.0);
        let d = solution(vec![3], 4.0, 0.0, 0.0);
        let front = vec![&a, &b, &c, &d];

        let distances = crowding_distance(&front);

        assert!(distances[0].is_infinite());
        assert!(distances[3].is_infinite());
        // b: (2 - 0) / 4 on makespan + (4 - 1) / 4 on cost, energy is degenerate.
        assert!((distances[1] - 1.25).abs() < 1e-12);
        // c: (4 - 1) / 4 + (3 - 0) / 4
        assert!((distances[2] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_small_fronts_are_all_extreme() {
        let a = solution(vec![0], 1.0, 2.0, 3.0);
        let b = solution(vec![1], 2.0, 1.0, 3.0);
        assert_eq!(crowding_distance(&[&a, &b]), vec![f64::INFINITY, f64::INFINITY]);
        assert!(crowding_distance(&[]).is_empty());
    }
}
