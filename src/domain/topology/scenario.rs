use std::fmt;
use std::str::FromStr;

use crate::domain::model::{Position, Tier};
use crate::domain::topology::topology_builder::{TierPairValues, TopologyParams};
use crate::error::ConversionError;

/// Named placement and network profile an experiment is repeated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyScenario {
    Default,
    /// Cloud region close to the site with better uplinks.
    NearCloud,
    /// Distant fog and cloud, thin long-haul links.
    FarCloud,
    /// Fog nodes clustered next to the site.
    DenseFog,
    /// Same geography as `Default` over slow, lossy links.
    PoorNetwork,
}

/// Constants behind a scenario. Distances in km, latencies in seconds, bandwidths in data units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioProfile {
    pub edge_zone: Position,
    pub fog_zone: Position,
    pub cloud_zone: Position,
    pub edge_jitter_km: f64,
    pub fog_jitter_km: f64,
    pub cloud_jitter_km: f64,
    pub base_latency: TierPairValues,
    pub bandwidth: TierPairValues,
}

impl TopologyScenario {
    pub const ALL: [TopologyScenario; 5] = [
        TopologyScenario::Default,
        TopologyScenario::NearCloud,
        TopologyScenario::FarCloud,
        TopologyScenario::DenseFog,
        TopologyScenario::PoorNetwork,
    ];

    pub fn profile(&self) -> ScenarioProfile {
        match self {
            TopologyScenario::Default => ScenarioProfile {
                edge_zone: Position::new(0.0, 0.0),
                fog_zone: Position::new(250.0, 150.0),
                cloud_zone: Position::new(3200.0, 1800.0),
                edge_jitter_km: 5.0,
                fog_jitter_km: 20.0,
                cloud_jitter_km: 80.0,
                base_latency: TierPairValues::new(0.003, 0.020, 0.120, 0.250),
                bandwidth: TierPairValues::new(1200.0, 250.0, 120.0, 40.0),
            },
            TopologyScenario::NearCloud => ScenarioProfile {
                edge_zone: Position::new(0.0, 0.0),
                fog_zone: Position::new(250.0, 150.0),
                cloud_zone: Position::new(900.0, 600.0),
                edge_jitter_km: 5.0,
                fog_jitter_km: 20.0,
                cloud_jitter_km: 60.0,
                base_latency: TierPairValues::new(0.003, 0.020, 0.070, 0.120),
                bandwidth: TierPairValues::new(1200.0, 250.0, 220.0, 90.0),
            },
            TopologyScenario::FarCloud => ScenarioProfile {
                edge_zone: Position::new(0.0, 0.0),
                fog_zone: Position::new(2500.0, 1500.0),
                cloud_zone: Position::new(12000.0, 6500.0),
                edge_jitter_km: 5.0,
                fog_jitter_km: 20.0,
                cloud_jitter_km: 120.0,
                base_latency: TierPairValues::new(0.003, 0.025, 0.220, 0.500),
                bandwidth: TierPairValues::new(1200.0, 220.0, 70.0, 12.0),
            },
            TopologyScenario::DenseFog => ScenarioProfile {
                edge_zone: Position::new(0.0, 0.0),
                fog_zone: Position::new(30.0, 15.0),
                cloud_zone: Position::new(3200.0, 1800.0),
                edge_jitter_km: 5.0,
                fog_jitter_km: 5.0,
                cloud_jitter_km: 80.0,
                base_latency: TierPairValues::new(0.003, 0.008, 0.120, 0.250),
                bandwidth: TierPairValues::new(1200.0, 600.0, 120.0, 40.0),
            },
            TopologyScenario::PoorNetwork => ScenarioProfile {
                edge_zone: Position::new(0.0, 0.0),
                fog_zone: Position::new(250.0, 150.0),
                cloud_zone: Position::new(3200.0, 1800.0),
                edge_jitter_km: 5.0,
                fog_jitter_km: 20.0,
                cloud_jitter_km: 80.0,
                base_latency: TierPairValues::new(0.020, 0.120, 0.800, 1.500),
                bandwidth: TierPairValues::new(150.0, 15.0, 6.0, 1.5),
            },
        }
    }

    /// Zone centre and placement jitter for nodes of `tier`.
    pub fn zone(&self, tier: Tier) -> (Position, f64) {
        let profile = self.profile();
        match tier {
            Tier::Edge => (profile.edge_zone, profile.edge_jitter_km),
            Tier::Fog => (profile.fog_zone, profile.fog_jitter_km),
            Tier::Cloud => (profile.cloud_zone, profile.cloud_jitter_km),
        }
    }

    /// Overwrites the tier-pair latencies and bandwidths of `params` with this scenario's values.
    pub fn apply_to(&self, params: &mut TopologyParams) {
        let profile = self.profile();
        params.base_latency = profile.base_latency;
        params.bandwidth = profile.bandwidth;
    }

    /// Parses scenario names; no names at all means `[Default]`.
    pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Vec<TopologyScenario>, ConversionError> {
        if names.is_empty() {
            return Ok(vec![TopologyScenario::Default]);
        }
        names.iter().map(|name| name.as_ref().parse()).collect()
    }
}

impl fmt::Display for TopologyScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TopologyScenario::Default => "DEFAULT",
            TopologyScenario::NearCloud => "NEAR_CLOUD",
            TopologyScenario::FarCloud => "FAR_CLOUD",
            TopologyScenario::DenseFog => "DENSE_FOG",
            TopologyScenario::PoorNetwork => "POOR_NETWORK",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TopologyScenario {
    type Err = ConversionError;

    fn from_str(scenario: &str) -> Result<TopologyScenario, Self::Err> {
        match scenario.trim().to_ascii_uppercase().as_str() {
            "DEFAULT" => Ok(TopologyScenario::Default),
            "NEAR_CLOUD" => Ok(TopologyScenario::NearCloud),
            "FAR_CLOUD" => Ok(TopologyScenario::FarCloud),
            "DENSE_FOG" => Ok(TopologyScenario::DenseFog),
            "POOR_NETWORK" => Ok(TopologyScenario::PoorNetwork),
            _ => Err(ConversionError::UnknownScenario(scenario.to_string())),
        }
    }
}
