use std::collections::HashMap;
use std::path::Path;

use crate::api::job_graph_dto::JobGraphDto;
use crate::domain::model::{Task, TaskId};
use crate::domain::workflow::topological_sort;
use crate::error::{Error, Result};
use crate::loader::dax_parser::parse_dax_file;
use crate::loader::parser::parse_json_file;

/// Instructions per second of reference runtime.
pub const DEFAULT_RUNTIME_TO_WORKLOAD_FACTOR: f64 = 10000.0;

const BYTES_PER_DATA_UNIT: f64 = 1024.0 * 1024.0;

/// Loads a JSON job graph from disk and returns its tasks in topological order.
pub fn load_job_graph(path: impl AsRef<Path>, runtime_to_workload_factor: f64) -> Result<Vec<Task>> {
    let dto: JobGraphDto = parse_json_file(path.as_ref())?;
    log::info!("Job graph '{}' parsed with {} jobs.", path.as_ref().display(), dto.jobs.len());
    tasks_from_job_graph(&dto, runtime_to_workload_factor)
}

/// Loads a Pegasus DAX workflow and converts it exactly like a JSON job graph.
pub fn load_dax(path: impl AsRef<Path>, runtime_to_workload_factor: f64) -> Result<Vec<Task>> {
    let dto = parse_dax_file(path.as_ref())?;
    log::info!("DAX workflow '{}' parsed with {} jobs and {} dependency groups.", path.as_ref().display(), dto.jobs.len(), dto.dependencies.len());
    tasks_from_job_graph(&dto, runtime_to_workload_factor)
}

/**
 * Converts a job graph into tasks.
 *
 * `workload = runtime * runtime_to_workload_factor` and the output size is the sum of all output
 * file sizes in MiB. Dependencies that name an unknown job are rejected, as is any cycle.
 */
pub fn tasks_from_job_graph(dto: &JobGraphDto, runtime_to_workload_factor: f64) -> Result<Vec<Task>> {
    let mut tasks: Vec<Task> = Vec::with_capacity(dto.jobs.len());
    let mut index_by_id: HashMap<&str, usize> = HashMap::with_capacity(dto.jobs.len());

    for job in &dto.jobs {
        if index_by_id.insert(job.id.as_str(), tasks.len()).is_some() {
            return Err(Error::WorkflowError(format!("duplicate job id '{}'", job.id)));
        }
        let output_size = job.outputs.iter().map(|file| file.size / BYTES_PER_DATA_UNIT).sum();
        tasks.push(Task::new(job.id.clone(), job.runtime * runtime_to_workload_factor, output_size));
    }

    for dependency in &dto.dependencies {
        let &child = index_by_id
            .get(dependency.child.as_str())
            .ok_or_else(|| Error::WorkflowError(format!("dependency names unknown child '{}'", dependency.child)))?;

        for parent in &dependency.parents {
            if !index_by_id.contains_key(parent.as_str()) {
                return Err(Error::WorkflowError(format!("unknown parent '{}' for child '{}'", parent, dependency.child)));
            }
            tasks[child].add_predecessor(TaskId::new(parent.clone()));
        }
    }

    topological_sort(tasks)
}
