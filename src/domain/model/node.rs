use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::model::id::NodeId;
use crate::error::ConversionError;

/// Layer of the edge/fog/cloud hierarchy a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Tier {
    /// Close to the sensors: low latency, limited compute.
    Edge,
    /// Intermediate layer trading latency for compute.
    Fog,
    /// Remote data centre: plenty of compute, high latency.
    Cloud,
}

impl Tier {
    /// Lowercase prefix used for generated node ids (`edge1`, `fog2`, ...).
    pub fn prefix(&self) -> &'static str {
        match self {
            Tier::Edge => "edge",
            Tier::Fog => "fog",
            Tier::Cloud => "cloud",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Edge => "EDGE",
            Tier::Fog => "FOG",
            Tier::Cloud => "CLOUD",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Tier {
    type Err = ConversionError;

    fn from_str(tier: &str) -> Result<Tier, Self::Err> {
        match tier.trim().to_ascii_uppercase().as_str() {
            "EDGE" => Ok(Tier::Edge),
            "FOG" => Ok(Tier::Fog),
            "CLOUD" => Ok(Tier::Cloud),
            _ => Err(ConversionError::UnknownTier(tier.to_string())),
        }
    }
}

/// Planar position in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A compute node of the infrastructure. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub tier: Tier,
    /// Instructions per second.
    pub compute_rate: f64,
    /// Currency per second of execution.
    pub cost_rate: f64,
    /// Watts drawn while executing.
    pub power_rate: f64,
    pub position: Option<Position>,
    pub zone: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, tier: Tier, compute_rate: f64, cost_rate: f64, power_rate: f64) -> Self {
        Self { id: NodeId::new(id), tier, compute_rate, cost_rate, power_rate, position: None, zone: None }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Euclidean distance in km, `0.0` if either node has no position.
    pub fn distance_to(&self, other: &Node) -> f64 {
        match (&self.position, &other.position) {
            (Some(a), Some(b)) => a.distance_to(b),
            _ => 0.0,
        }
    }
}
