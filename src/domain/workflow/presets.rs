use crate::domain::model::Task;

/**
 * Structural health monitoring of a dam: three sensor chains (vibration, acoustic, pressure)
 * are acquired and filtered, reduced to spectra or features, fused, run through anomaly
 * detection and end in a decision task.
 *
 * Workloads are instruction counts, outputs are data units. The list is already in topological order.
 */
pub fn dam_workflow() -> Vec<Task> {
    vec![
        Task::new("acq_vibration", 9000.0, 12.0),
        Task::new("acq_acoustic", 11000.0, 15.0),
        Task::new("acq_pressure", 7000.0, 8.0),
        Task::new("filter_vibration", 6000.0, 6.0).with_predecessors(["acq_vibration"]),
        Task::new("filter_acoustic", 7000.0, 7.0).with_predecessors(["acq_acoustic"]),
        Task::new("filter_pressure", 5000.0, 5.0).with_predecessors(["acq_pressure"]),
        Task::new("fft_vibration", 14000.0, 4.0).with_predecessors(["filter_vibration"]),
        Task::new("fft_acoustic", 16000.0, 4.0).with_predecessors(["filter_acoustic"]),
        Task::new("feat_pressure", 8000.0, 3.0).with_predecessors(["filter_pressure"]),
        Task::new("fusion", 10000.0, 5.0).with_predecessors(["fft_vibration", "fft_acoustic", "feat_pressure"]),
        Task::new("detection", 25000.0, 2.0).with_predecessors(["fusion"]),
        Task::new("decision", 4000.0, 0.0).with_predecessors(["detection"]),
    ]
}
