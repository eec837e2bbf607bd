pub mod job_graph;
pub mod presets;
pub mod topological_sort;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::api::run_config_dto::WorkflowConfigDto;
use crate::domain::model::Task;
use crate::error::{ConversionError, Error, Result};

pub use job_graph::{DEFAULT_RUNTIME_TO_WORKLOAD_FACTOR, load_dax, load_job_graph, tasks_from_job_graph};
pub use presets::dam_workflow;
pub use topological_sort::topological_sort;

/// Source of the task graph an experiment schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowType {
    /// Built-in 12-task dam monitoring pipeline.
    Dam,
    /// Job graph read from a JSON file.
    JobGraph,
    /// Pegasus DAX file.
    Dax,
    /// One of the bundled CyberShake DAX files, picked by size.
    CyberShake,
}

/// Default directory searched for `CyberShake_<size>.xml`.
pub const DEFAULT_CYBERSHAKE_DIR: &str = "workflows";

pub const CYBERSHAKE_SIZES: [u32; 3] = [30, 50, 100];

impl FromStr for WorkflowType {
    type Err = ConversionError;

    fn from_str(workflow_type: &str) -> std::result::Result<WorkflowType, Self::Err> {
        match workflow_type.trim().to_ascii_uppercase().as_str() {
            "DAM" => Ok(WorkflowType::Dam),
            "JOB_GRAPH" | "JOBGRAPH" => Ok(WorkflowType::JobGraph),
            "DAX" | "PEGASUS" => Ok(WorkflowType::Dax),
            "CYBERSHAKE" => Ok(WorkflowType::CyberShake),
            _ => Err(ConversionError::UnknownWorkflowType(workflow_type.to_string())),
        }
    }
}

impl fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowType::Dam => write!(f, "DAM"),
            WorkflowType::JobGraph => write!(f, "JOB_GRAPH"),
            WorkflowType::Dax => write!(f, "DAX"),
            WorkflowType::CyberShake => write!(f, "CYBERSHAKE"),
        }
    }
}

/// Builds the topologically ordered task list described by a workflow section.
pub fn load_workflow(config: &WorkflowConfigDto) -> Result<Vec<Task>> {
    let workflow_type: WorkflowType = config.workflow_type.as_deref().unwrap_or_default().parse()?;
    let factor = config.runtime_to_workload_factor.unwrap_or(DEFAULT_RUNTIME_TO_WORKLOAD_FACTOR);
    let required_path = || {
        config
            .path
            .as_deref()
            .ok_or_else(|| Error::ConfigurationError(format!("'workflow.path' is required for {} workflows", workflow_type)))
    };

    match workflow_type {
        WorkflowType::Dam => Ok(dam_workflow()),
        WorkflowType::JobGraph => load_job_graph(required_path()?, factor),
        WorkflowType::Dax => load_dax(required_path()?, factor),
        WorkflowType::CyberShake => {
            let size = config.cybershake_size.ok_or_else(|| {
                Error::ConfigurationError("'workflow.cybershakeSize' is required for CYBERSHAKE workflows".to_string())
            })?;
            if !CYBERSHAKE_SIZES.contains(&size) {
                return Err(Error::ConfigurationError(format!(
                    "unsupported CyberShake size {}, expected one of {:?}",
                    size, CYBERSHAKE_SIZES
                )));
            }
            let directory = config.path.as_deref().unwrap_or(DEFAULT_CYBERSHAKE_DIR);
            load_dax(Path::new(directory).join(format!("CyberShake_{}.xml", size)), factor)
        }
    }
}
