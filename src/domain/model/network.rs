use std::collections::HashMap;

use crate::domain::model::id::NodeId;

/// Network cost per second of transfer when nothing else is configured.
pub const DEFAULT_NETWORK_COST_PER_SECOND: f64 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkProperties {
    /// Seconds.
    pub latency: f64,
    /// Data units per second.
    pub bandwidth: f64,
}

/// Directed link table keyed by `(source, destination)`.
///
/// Each direction is stored independently. Unknown pairs report zero latency and infinite
/// bandwidth, which callers must not mistake for a configured link.
#[derive(Debug, Clone)]
pub struct NetworkModel {
    links: HashMap<(NodeId, NodeId), LinkProperties>,
    cost_per_second: f64,
}

impl Default for NetworkModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkModel {
    pub fn new() -> Self {
        Self { links: HashMap::new(), cost_per_second: DEFAULT_NETWORK_COST_PER_SECOND }
    }

    pub fn with_cost_per_second(mut self, cost_per_second: f64) -> Self {
        self.cost_per_second = cost_per_second;
        self
    }

    pub fn set_link(&mut self, from: &NodeId, to: &NodeId, latency: f64, bandwidth: f64) {
        self.links.insert((from.clone(), to.clone()), LinkProperties { latency, bandwidth });
    }

    /// Sets both directions to the same properties.
    pub fn set_symmetric_link(&mut self, a: &NodeId, b: &NodeId, latency: f64, bandwidth: f64) {
        self.set_link(a, b, latency, bandwidth);
        self.set_link(b, a, latency, bandwidth);
    }

    pub fn link(&self, from: &NodeId, to: &NodeId) -> Option<&LinkProperties> {
        self.links.get(&(from.clone(), to.clone()))
    }

    pub fn latency(&self, from: &NodeId, to: &NodeId) -> f64 {
        self.link(from, to).map_or(0.0, |link| link.latency)
    }

    pub fn bandwidth(&self, from: &NodeId, to: &NodeId) -> f64 {
        self.link(from, to).map_or(f64::INFINITY, |link| link.bandwidth)
    }

    pub fn network_cost_per_second(&self) -> f64 {
        self.cost_per_second
    }

    /// Latency plus transfer time for `data_size` units over the `from -> to` link.
    pub fn transfer_time(&self, from: &NodeId, to: &NodeId, data_size: f64) -> f64 {
        self.latency(from, to) + data_size / self.bandwidth(from, to)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_link_defaults() {
        let network = NetworkModel::new();
        let a = NodeId::new("a");
        let b = NodeId::new("b");

        assert_eq!(network.latency(&a, &b), 0.0);
        assert!(network.bandwidth(&a, &b).is_infinite());
        assert_eq!(network.transfer_time(&a, &b, 42.0), 0.0);
    }

    #[test]
    fn test_links_are_directed() {
        let mut network = NetworkModel::new();
        let a = NodeId::new("a");
        let b = NodeId::new("b");
        network.set_link(&a, &b, 0.5, 10.0);

        assert_eq!(network.latency(&a, &b), 0.5);
        assert_eq!(network.bandwidth(&a, &b), 10.0);
        assert!(network.link(&b, &a).is_none());

        network.set_symmetric_link(&a, &b, 0.1, 20.0);
        assert_eq!(network.latency(&b, &a), 0.1);
        assert_eq!(network.link_count(), 2);
    }
}
