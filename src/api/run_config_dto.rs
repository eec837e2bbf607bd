use serde::{Deserialize, Serialize};

use crate::domain::optimizer::AlgorithmParams;
use crate::error::{Error, Result};

pub const DEFAULT_PROPAGATION_SPEED_KM_PER_SEC: f64 = 20000.0;

/// Root of an experiment configuration file.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RunConfigDto {
    pub workflow: Option<WorkflowConfigDto>,
    pub execution: Option<ExecutionDto>,
    pub nodes: Option<NodesDto>,
    pub network: Option<NetworkDto>,
    #[serde(default)]
    pub scenarios: Vec<String>,
    #[serde(default)]
    pub algorithms: AlgorithmParams,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowConfigDto {
    /// `DAM`, `JOB_GRAPH`, `DAX` or `CYBERSHAKE`.
    #[serde(rename = "type")]
    pub workflow_type: Option<String>,
    /// Workflow file for `JOB_GRAPH` and `DAX`, directory holding `CyberShake_<size>.xml` for `CYBERSHAKE`.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub runtime_to_workload_factor: Option<f64>,
    /// 30, 50 or 100.
    #[serde(default)]
    pub cybershake_size: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecutionDto {
    pub base_seed: u64,
    pub runs: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NodesDto {
    pub edge: Option<TierConfigDto>,
    pub fog: Option<TierConfigDto>,
    pub cloud: Option<TierConfigDto>,
}

/// Resource profile shared by every node generated for one tier.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TierConfigDto {
    pub count: usize,
    pub mips: f64,
    pub cost: f64,
    pub power: f64,
    #[serde(default)]
    pub zone: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDto {
    #[serde(default = "default_propagation_speed")]
    pub propagation_speed_km_per_sec: f64,
    #[serde(default)]
    pub variability: VariabilityDto,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct VariabilityDto {
    pub enabled: bool,
    pub latency_jitter_max_sec: f64,
    pub bandwidth_jitter_ratio: f64,
}

fn default_propagation_speed() -> f64 {
    DEFAULT_PROPAGATION_SPEED_KM_PER_SEC
}

impl RunConfigDto {
    /// Reports the first missing or inconsistent section as a `ConfigurationError`.
    pub fn validate(&self) -> Result<()> {
        let workflow = self.workflow.as_ref().ok_or_else(|| missing("workflow"))?;
        let execution = self.execution.as_ref().ok_or_else(|| missing("execution"))?;
        let nodes = self.nodes.as_ref().ok_or_else(|| missing("nodes"))?;
        let network = self.network.as_ref().ok_or_else(|| missing("network"))?;

        if workflow.workflow_type.as_deref().is_none_or(|typ| typ.trim().is_empty()) {
            return Err(missing("workflow.type"));
        }
        if execution.runs == 0 {
            return Err(Error::ConfigurationError("'execution.runs' must be > 0".to_string()));
        }

        for (tier, config) in [("edge", &nodes.edge), ("fog", &nodes.fog), ("cloud", &nodes.cloud)] {
            let config = config.as_ref().ok_or_else(|| missing(&format!("nodes.{}", tier)))?;
            if config.mips <= 0.0 {
                return Err(Error::ConfigurationError(format!("'nodes.{}.mips' must be > 0", tier)));
            }
        }
        if nodes.edge.iter().chain(&nodes.fog).chain(&nodes.cloud).all(|config| config.count == 0) {
            return Err(Error::ConfigurationError("at least one node must be configured".to_string()));
        }

        if network.propagation_speed_km_per_sec <= 0.0 {
            return Err(Error::ConfigurationError("'network.propagationSpeedKmPerSec' must be > 0".to_string()));
        }
        if network.variability.latency_jitter_max_sec < 0.0 || network.variability.bandwidth_jitter_ratio < 0.0 {
            return Err(Error::ConfigurationError("network jitter values must be >= 0".to_string()));
        }

        self.algorithms.validate()
    }
}

fn missing(section: &str) -> Error {
    Error::ConfigurationError(format!("missing '{}'", section))
}
