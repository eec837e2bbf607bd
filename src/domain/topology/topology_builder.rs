use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::model::{NetworkModel, Node, Tier};

const MIN_BANDWIDTH: f64 = 1e-9;

/// One value per unordered tier pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierPairValues {
    pub same_tier: f64,
    pub edge_fog: f64,
    pub fog_cloud: f64,
    pub edge_cloud: f64,
}

impl TierPairValues {
    pub const fn new(same_tier: f64, edge_fog: f64, fog_cloud: f64, edge_cloud: f64) -> Self {
        Self { same_tier, edge_fog, fog_cloud, edge_cloud }
    }

    pub fn between(&self, a: Tier, b: Tier) -> f64 {
        match (a, b) {
            _ if a == b => self.same_tier,
            (Tier::Edge, Tier::Fog) | (Tier::Fog, Tier::Edge) => self.edge_fog,
            (Tier::Fog, Tier::Cloud) | (Tier::Cloud, Tier::Fog) => self.fog_cloud,
            _ => self.edge_cloud,
        }
    }
}

/// Inputs of [`build_network`]. Scenarios overwrite the tier-pair tables through `TopologyScenario::apply_to`.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyParams {
    pub propagation_speed_km_per_sec: f64,
    /// Seconds.
    pub base_latency: TierPairValues,
    /// Data units per second.
    pub bandwidth: TierPairValues,
    /// Upper bound of the uniform latency jitter, `0` disables it.
    pub latency_jitter_max_sec: f64,
    /// Relative bandwidth jitter, `0` disables it.
    pub bandwidth_jitter_ratio: f64,
    pub seed: u64,
    pub network_cost_per_second: f64,
}

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            propagation_speed_km_per_sec: 20000.0,
            base_latency: TierPairValues::new(0.02, 0.05, 0.20, 0.50),
            bandwidth: TierPairValues::new(800.0, 200.0, 500.0, 100.0),
            latency_jitter_max_sec: 0.0,
            bandwidth_jitter_ratio: 0.0,
            seed: 0,
            network_cost_per_second: crate::domain::model::network::DEFAULT_NETWORK_COST_PER_SECOND,
        }
    }
}

/**
 * Builds a full directed link table between every ordered pair of distinct nodes.
 *
 * `latency = base(tier_a, tier_b) + distance_km / propagation_speed (+ U[0, jitter_max))` and
 * `bandwidth = bw(tier_a, tier_b) * (1 + U[-ratio, ratio])`, floored at `1e-9`. Pairs are visited
 * in node order, latency jitter first, so a fixed seed always yields the same table.
 */
pub fn build_network(nodes: &[Node], params: &TopologyParams) -> NetworkModel {
    let mut network = NetworkModel::new().with_cost_per_second(params.network_cost_per_second);
    let jitter_enabled = params.latency_jitter_max_sec > 0.0 || params.bandwidth_jitter_ratio > 0.0;
    let mut rng = jitter_enabled.then(|| StdRng::seed_from_u64(params.seed));

    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate() {
            if i == j {
                continue;
            }

            let mut latency = params.base_latency.between(a.tier, b.tier) + a.distance_to(b) / params.propagation_speed_km_per_sec;
            let mut bandwidth = params.bandwidth.between(a.tier, b.tier);

            if let Some(rng) = rng.as_mut() {
                if params.latency_jitter_max_sec > 0.0 {
                    latency += rng.random::<f64>() * params.latency_jitter_max_sec;
                }
                if params.bandwidth_jitter_ratio > 0.0 {
                    let ratio = (rng.random::<f64>() * 2.0 - 1.0) * params.bandwidth_jitter_ratio;
                    bandwidth = (bandwidth * (1.0 + ratio)).max(MIN_BANDWIDTH);
                }
            }

            network.set_link(&a.id, &b.id, latency, bandwidth);
        }
    }

    log::debug!("Network built with {} directed links between {} nodes.", network.link_count(), nodes.len());
    network
}
