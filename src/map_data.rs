//! Map loading from the kiosk's JSON map description.

use std::fs;
use std::io;
use std::path::Path;

use tracing::info;

use crate::error::PlanError;
use crate::graph::Map;
use crate::manhattan::compute_costs;

#[derive(Debug)]
pub enum MapDataError {
    Io(io::Error),
    Json(serde_json::Error),
    Invalid(PlanError),
}

impl std::fmt::Display for MapDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapDataError::Io(err) => write!(f, "I/O error: {}", err),
            MapDataError::Json(err) => write!(f, "malformed map JSON: {}", err),
            MapDataError::Invalid(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for MapDataError {}

impl From<io::Error> for MapDataError {
    fn from(err: io::Error) -> Self {
        MapDataError::Io(err)
    }
}

impl From<serde_json::Error> for MapDataError {
    fn from(err: serde_json::Error) -> Self {
        MapDataError::Json(err)
    }
}

impl From<PlanError> for MapDataError {
    fn from(err: PlanError) -> Self {
        MapDataError::Invalid(err)
    }
}

/// Parses a map, computing edge costs when any are absent, and validates it.
pub fn load_map_from_json(source: &str) -> Result<Map, MapDataError> {
    let mut map: Map = serde_json::from_str(source)?;

    if map.edges.iter().any(|edge| edge.cost.is_none()) {
        compute_costs(&mut map);
    }
    map.validate()?;

    info!(nodes = map.nodes.len(), edges = map.edges.len(), "loaded hospital map");
    Ok(map)
}

pub fn load_map_from_file(path: impl AsRef<Path>) -> Result<Map, MapDataError> {
    let source = fs::read_to_string(path)?;
    load_map_from_json(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapIssue;
    use crate::graph::NodeType;

    const SIMPLE_MAP_JSON: &str = r#"{
        "nodes": [
            {"id": "X", "x": 0, "y": 0, "type": "main", "name": "Entrance"},
            {"id": "Y", "x": 3, "y": 4, "type": "nav"}
        ],
        "edges": [
            {"u": "X", "v": "Y"}
        ]
    }"#;

    #[test]
    fn test_load_computes_missing_costs() {
        let map = load_map_from_json(SIMPLE_MAP_JSON).expect("load map");
        assert_eq!(map.nodes.len(), 2);
        assert_eq!(map.nodes[1].kind, NodeType::Nav);
        assert_eq!(map.nodes[1].name, None);
        assert_eq!(map.edges[0].cost, Some(7));
    }

    #[test]
    fn test_load_keeps_supplied_costs() {
        let json = r#"{
            "nodes": [
                {"id": "X", "x": 0, "y": 0, "type": "main"},
                {"id": "Y", "x": 3, "y": 4, "type": "main"}
            ],
            "edges": [{"u": "X", "v": "Y", "cost": 12}]
        }"#;
        let map = load_map_from_json(json).expect("load map");
        assert_eq!(map.edges[0].cost, Some(12));
    }

    #[test]
    fn test_load_rejects_dangling_edges() {
        let json = r#"{
            "nodes": [{"id": "X", "x": 0, "y": 0, "type": "main"}],
            "edges": [{"u": "X", "v": "Z"}]
        }"#;
        match load_map_from_json(json) {
            Err(MapDataError::Invalid(PlanError::MapInvalid(MapIssue::DanglingEdge {
                missing, ..
            }))) => assert_eq!(missing, "Z"),
            other => panic!("expected dangling edge, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_unknown_node_type() {
        let json = r#"{
            "nodes": [{"id": "X", "x": 0, "y": 0, "type": "portal"}],
            "edges": []
        }"#;
        assert!(matches!(load_map_from_json(json), Err(MapDataError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_map_from_file("does/not/exist/map.json");
        assert!(matches!(result, Err(MapDataError::Io(_))));
    }
}
