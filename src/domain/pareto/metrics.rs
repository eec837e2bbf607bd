use std::cmp::Ordering;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::model::SchedulingSolution;
use crate::domain::optimizer::problem::SchedulingProblem;
use crate::domain::optimizer::random_selection::{RandomSelection, RandomSelectionParams};
use crate::error::Result;

/// Reference point in objective space `[makespan, cost, energy]`.
pub type ReferencePoint = [f64; 3];

/// Seed of the sampling run behind [`auto_reference_point`].
const AUTO_REFERENCE_SEED: u64 = 42;
const AUTO_REFERENCE_SAMPLES: usize = 100;
const AUTO_REFERENCE_ARCHIVE: usize = 50;
const AUTO_REFERENCE_MARGIN: f64 = 1.10;

/**
 * Exact hypervolume of `solutions` relative to `reference` (all objectives minimised).
 *
 * Every solution becomes the maximisation point `reference - objectives`; points with a
 * coordinate `<= 0` contribute nothing. After dominated points are dropped the points are sorted
 * descending on the first axis and the volume is summed slab by slab: the slab between a point's
 * first coordinate and the next lower one is multiplied by the exact 2D area dominated by all
 * points at or above it on that axis.
 *
 * Deterministic for fixed inputs. Empty input, or input with no point strictly better than the
 * reference on every axis, yields exactly `0.0`.
 */
pub fn hypervolume(solutions: &[SchedulingSolution], reference: &ReferencePoint) -> f64 {
    let points: Vec<[f64; 3]> = solutions
        .iter()
        .map(|solution| {
            [reference[0] - solution.makespan(), reference[1] - solution.cost(), reference[2] - solution.energy()]
        })
        .filter(|point| point.iter().all(|&coordinate| coordinate > 0.0))
        .collect();

    hypervolume_of_points(points)
}

/// Hypervolume of points already expressed in maximisation form (dominated region `[0, p]`).
pub fn hypervolume_of_points(points: Vec<[f64; 3]>) -> f64 {
    let mut points = non_dominated_max(points);
    if points.is_empty() {
        return 0.0;
    }

    points.sort_by(|a, b| descending(a[0], b[0]));

    let mut volume = 0.0;
    for i in 0..points.len() {
        let upper = points[i][0];
        let lower = points.get(i + 1).map_or(0.0, |next| next[0]);
        let depth = upper - lower;
        if depth <= 0.0 {
            continue;
        }

        let slice: Vec<[f64; 2]> = points[..=i].iter().map(|point| [point[1], point[2]]).collect();
        volume += depth * area_2d(slice);
    }
    volume
}

/// Exact area dominated by 2D maximisation points, sweeping descending on the first axis.
fn area_2d(points: Vec<[f64; 2]>) -> f64 {
    let mut points = non_dominated_max(points);
    if points.is_empty() {
        return 0.0;
    }
    points.sort_by(|a, b| descending(a[0], b[0]));

    let mut area = 0.0;
    let mut previous_y = points[0][0];
    let mut best_z = points[0][1];

    for point in &points[1..] {
        let width = previous_y - point[0];
        if width > 0.0 {
            area += width * best_z;
        }
        best_z = best_z.max(point[1]);
        previous_y = point[0];
    }

    if previous_y > 0.0 {
        area += previous_y * best_z;
    }
    area
}

fn non_dominated_max<const D: usize>(points: Vec<[f64; D]>) -> Vec<[f64; D]> {
    points
        .iter()
        .enumerate()
        .filter(|&(i, candidate)| !points.iter().enumerate().any(|(j, other)| i != j && dominates_max(other, candidate)))
        .map(|(_, point)| *point)
        .collect()
}

fn dominates_max<const D: usize>(a: &[f64; D], b: &[f64; D]) -> bool {
    let mut strictly = false;
    for k in 0..D {
        if a[k] < b[k] {
            return false;
        }
        if a[k] > b[k] {
            strictly = true;
        }
    }
    strictly
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Standard deviation of each member's L1 distance to its nearest neighbour. `0.0` below two members.
pub fn spacing(solutions: &[SchedulingSolution]) -> f64 {
    if solutions.len() < 2 {
        return 0.0;
    }

    let nearest: Vec<f64> = solutions
        .iter()
        .enumerate()
        .map(|(i, a)| {
            solutions
                .iter()
                .enumerate()
                .filter(|&(j, _)| i != j)
                .map(|(_, b)| (a.makespan() - b.makespan()).abs() + (a.cost() - b.cost()).abs() + (a.energy() - b.energy()).abs())
                .fold(f64::MAX, f64::min)
        })
        .collect();

    let mean = nearest.iter().sum::<f64>() / nearest.len() as f64;
    let variance = nearest.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / nearest.len() as f64;
    variance.sqrt()
}

/// Derives a reference point from a fixed-seed random sampling run: the worst value seen on
/// each objective, inflated by 10 %.
pub fn auto_reference_point(problem: &SchedulingProblem<'_>) -> Result<ReferencePoint> {
    let mut rng = StdRng::seed_from_u64(AUTO_REFERENCE_SEED);
    let params = RandomSelectionParams { sample_count: AUTO_REFERENCE_SAMPLES, archive_max_size: AUTO_REFERENCE_ARCHIVE };
    let front = RandomSelection::new(*problem, params).sample(&mut rng)?;

    let mut worst = [0.0_f64; 3];
    for solution in &front {
        worst[0] = worst[0].max(solution.makespan());
        worst[1] = worst[1].max(solution.cost());
        worst[2] = worst[2].max(solution.energy());
    }

    Ok(worst.map(|value| value * AUTO_REFERENCE_MARGIN))
}
