use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::api::run_config_dto::{NodesDto, TierConfigDto};
use crate::domain::model::{Node, Position, Tier};
use crate::domain::topology::TopologyScenario;
use crate::error::{Error, Result};

/**
 * Generates the nodes of every tier: `count` nodes named `edge1..`, `fog1..`, `cloud1..`, each
 * placed at the scenario's zone centre for its tier plus a uniform offset of at most the tier's
 * jitter on both axes. Edge nodes come first, then fog, then cloud.
 */
pub fn build_infrastructure(config: &NodesDto, scenario: TopologyScenario, seed: u64) -> Result<Vec<Node>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut nodes = Vec::new();

    for (tier, tier_config) in [(Tier::Edge, &config.edge), (Tier::Fog, &config.fog), (Tier::Cloud, &config.cloud)] {
        let tier_config = tier_config
            .as_ref()
            .ok_or_else(|| Error::ConfigurationError(format!("missing node configuration for tier {}", tier)))?;
        nodes.extend(tier_nodes(tier, tier_config, scenario, &mut rng));
    }

    Ok(nodes)
}

fn tier_nodes<R: Rng + ?Sized>(tier: Tier, config: &TierConfigDto, scenario: TopologyScenario, rng: &mut R) -> Vec<Node> {
    let (centre, jitter) = scenario.zone(tier);

    (1..=config.count)
        .map(|index| {
            let position = Position::new(centre.x + uniform_offset(jitter, rng), centre.y + uniform_offset(jitter, rng));
            let node = Node::new(format!("{}{}", tier.prefix(), index), tier, config.mips, config.cost, config.power).with_position(position);
            match &config.zone {
                Some(zone) => node.with_zone(zone.clone()),
                None => node,
            }
        })
        .collect()
}

fn uniform_offset<R: Rng + ?Sized>(jitter: f64, rng: &mut R) -> f64 {
    (rng.random::<f64>() * 2.0 - 1.0) * jitter
}
