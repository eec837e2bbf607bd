use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON input: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to parse XML workflow: {0}")]
    XmlError(#[from] roxmltree::Error),

    #[error("Failed to write CSV output: {0}")]
    CsvError(#[from] csv::Error),

    /// A task has no assignment entry or refers to a node that does not exist.
    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),

    /// A predecessor was requested before it had been scheduled.
    #[error("Broken topological order: predecessor '{predecessor}' of task '{task}' has not been scheduled yet")]
    BrokenTopologicalOrder { task: String, predecessor: String },

    #[error("Invalid run configuration: {0}")]
    ConfigurationError(String),

    #[error("Malformed workflow description: {0}")]
    WorkflowError(String),

    /// A run aborted outside the core, e.g. a worker thread panicked.
    #[error("Experiment run failed: {0}")]
    ExperimentError(String),

    #[error(transparent)]
    ConversionError(#[from] ConversionError),
}

/// Raised when a string from a configuration file cannot be mapped onto one of the closed enums.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unknown topology scenario: '{0}'")]
    UnknownScenario(String),

    #[error("Unknown workflow type: '{0}'")]
    UnknownWorkflowType(String),

    #[error("Unknown algorithm: '{0}'")]
    UnknownAlgorithm(String),

    #[error("Unknown node tier: '{0}'")]
    UnknownTier(String),
}

pub type Result<T> = std::result::Result<T, Error>;
