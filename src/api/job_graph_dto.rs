use serde::{Deserialize, Serialize};

/// JSON job graph: jobs with their runtimes and produced files, plus child -> parents edges.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JobGraphDto {
    #[serde(default)]
    pub name: Option<String>,
    pub jobs: Vec<JobDto>,
    #[serde(default)]
    pub dependencies: Vec<DependencyDto>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub id: String,
    /// Runtime in seconds on the reference machine.
    pub runtime: f64,
    #[serde(default)]
    pub outputs: Vec<FileDto>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FileDto {
    #[serde(default)]
    pub name: Option<String>,
    /// Size in bytes.
    pub size: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DependencyDto {
    pub child: String,
    pub parents: Vec<String>,
}
