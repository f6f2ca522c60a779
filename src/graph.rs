//! Hospital map: nodes, undirected edges, and integrity checks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{MapIssue, PlanError};
use crate::traits::LocationInfo;

/// Kind of location a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Meaningful to a patient itinerary (entrance, clinic, pharmacy).
    Main,
    /// Waypoint used only for physical path continuity.
    Nav,
}

/// A location on the floor plan, keyed by `id`.
///
/// `name` and `description` are shown to the clinic selector for main nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Node {
    /// A node with no display name or description.
    pub fn new(id: impl Into<String>, x: f64, y: f64, kind: NodeType) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            kind,
            name: None,
            description: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `(x, y)` in map units.
    pub fn coords(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Undirected edge. `cost` stays `None` until computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub u: String,
    pub v: String,
    #[serde(default)]
    pub cost: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Edge {
    pub fn new(u: impl Into<String>, v: impl Into<String>) -> Self {
        Self {
            u: u.into(),
            v: v.into(),
            cost: None,
            name: None,
        }
    }

    pub fn with_cost(mut self, cost: i64) -> Self {
        self.cost = Some(cost);
        self
    }
}

/// The whole floor plan as loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Map {
    /// Wraps nodes and edges as given. Nothing is validated or costed here.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Looks a node up by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// True when `id` exists and is a main node.
    pub fn is_main_node(&self, id: &str) -> bool {
        self.node(id).is_some_and(|node| node.kind == NodeType::Main)
    }

    /// Main nodes as handed to the clinic selector.
    pub fn main_locations(&self) -> Vec<LocationInfo> {
        self.nodes
            .iter()
            .filter(|node| node.kind == NodeType::Main)
            .map(|node| LocationInfo {
                id: node.id.clone(),
                name: node.name.clone().unwrap_or_default(),
                description: node.description.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// Runs every integrity check and reports the first violation.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.nodes.is_empty() {
            return Err(MapIssue::EmptyNodes.into());
        }
        if self.edges.is_empty() {
            return Err(MapIssue::EmptyEdges.into());
        }

        let mut ids: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(MapIssue::DuplicateNode { id: node.id.clone() }.into());
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.u, &edge.v] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(MapIssue::DanglingEdge {
                        u: edge.u.clone(),
                        v: edge.v.clone(),
                        missing: endpoint.clone(),
                    }
                    .into());
                }
            }

            match edge.cost {
                None => {
                    return Err(MapIssue::MissingCost {
                        u: edge.u.clone(),
                        v: edge.v.clone(),
                    }
                    .into());
                }
                Some(cost) if cost < 0 => {
                    return Err(MapIssue::NegativeCost {
                        u: edge.u.clone(),
                        v: edge.v.clone(),
                        cost,
                    }
                    .into());
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// False when the map is empty or an edge references an unknown node.
pub fn validate_existence(map: &Map) -> bool {
    if map.nodes.is_empty() || map.edges.is_empty() {
        return false;
    }
    let ids: HashSet<&str> = map.nodes.iter().map(|node| node.id.as_str()).collect();
    map.edges
        .iter()
        .all(|edge| ids.contains(edge.u.as_str()) && ids.contains(edge.v.as_str()))
}

/// False when any edge cost is missing or negative.
pub fn validate_costs(map: &Map) -> bool {
    map.edges
        .iter()
        .all(|edge| matches!(edge.cost, Some(cost) if cost >= 0))
}

/// False when two nodes share an id.
pub fn validate_unique_ids(map: &Map) -> bool {
    let mut seen = HashSet::with_capacity(map.nodes.len());
    map.nodes.iter().all(|node| seen.insert(node.id.as_str()))
}
