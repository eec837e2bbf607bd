use colored::Colorize;

use crate::domain::model::SchedulingSolution;
use crate::experiment::summary::RunResult;

/// Prints the archive of one strategy as a table.
pub fn print_pareto(name: &str, front: &[SchedulingSolution]) {
    println!("\n{}", format!("=== PARETO SOLUTIONS ({}) ===", name).bold().cyan());
    println!("{:<4} {:<12} {:<15} {:<12}", "#", "Makespan", "Cost", "Energy");
    println!("{}", "-".repeat(57));
    for (index, solution) in front.iter().enumerate() {
        println!("{:<4} {:<12.3} {:<15.6} {:<12.3}", index + 1, solution.makespan(), solution.cost(), solution.energy());
    }
}

/// Prints hypervolume, spacing, archive size and timing of every strategy of a run.
pub fn print_metrics(run: &RunResult) {
    let reference = run.reference_point;
    println!(
        "\n{} scenario={} run={} seed={} ref=({:.3}, {:.6}, {:.3})",
        "=== PERFORMANCE METRICS ===".bold().cyan(),
        run.scenario,
        run.run,
        run.seed,
        reference[0],
        reference[1],
        reference[2]
    );
    println!("{:<8} {:>8} {:>16} {:>14} {:>10}", "", "Archive", "Hypervolume", "Spacing", "Time [s]");
    for result in &run.results {
        println!(
            "{:<8} {:>8} {:>16.6} {:>14.6} {:>10.3}",
            result.algorithm.to_string().bold(),
            result.archive.len(),
            result.hypervolume,
            result.spacing,
            result.seconds
        );
    }
}

/// Full console report of a run: every front followed by the metric table.
pub fn print_run(run: &RunResult) {
    for result in &run.results {
        print_pareto(&result.algorithm.to_string(), &result.archive);
    }
    print_metrics(run);
}
