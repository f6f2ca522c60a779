//! Manhattan edge costs.
//!
//! Robots move along axis-aligned corridors, so the cost of an edge is the
//! sum of its axis deltas rather than the straight-line distance.

use std::collections::HashMap;

use crate::graph::Map;

/// Integer delta along one axis, truncated toward zero and saturating at
/// the `i64` bounds.
///
/// Shared with the command compiler so edge costs and move distances agree.
pub(crate) fn axis_delta(from: f64, to: f64) -> i64 {
    (to - from) as i64
}

/// Manhattan distance between two coordinates, saturating at `i64::MAX`.
pub fn manhattan_distance(from: (f64, f64), to: (f64, f64)) -> i64 {
    axis_delta(from.0, to.0)
        .saturating_abs()
        .saturating_add(axis_delta(from.1, to.1).saturating_abs())
}

/// Assigns every edge its Manhattan cost, in place.
///
/// Edges whose endpoints are unknown keep their current cost; validation
/// reports them.
pub fn compute_costs(map: &mut Map) {
    let coords: HashMap<&str, (f64, f64)> = map
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node.coords()))
        .collect();

    for edge in &mut map.edges {
        if let (Some(from), Some(to)) = (coords.get(edge.u.as_str()), coords.get(edge.v.as_str())) {
            edge.cost = Some(manhattan_distance(*from, *to));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node, NodeType, validate_costs};

    #[test]
    fn test_manhattan_same_point() {
        assert_eq!(manhattan_distance((3.0, 4.0), (3.0, 4.0)), 0);
    }

    #[test]
    fn test_manhattan_known_distance() {
        assert_eq!(manhattan_distance((0.0, 0.0), (3.0, 4.0)), 7);
        assert_eq!(manhattan_distance((3.0, 4.0), (0.0, 0.0)), 7);
    }

    #[test]
    fn test_fractional_deltas_truncate() {
        assert_eq!(manhattan_distance((0.0, 0.0), (1.9, -2.5)), 3);
    }

    #[test]
    fn test_huge_coordinates_saturate() {
        assert_eq!(manhattan_distance((0.0, 0.0), (1e19, 1e19)), i64::MAX);
        assert_eq!(manhattan_distance((1e19, 0.0), (-1e19, -1e19)), i64::MAX);
    }

    #[test]
    fn test_compute_costs_on_far_apart_nodes() {
        let mut map = Map::new(
            vec![
                Node::new("near", 0.0, 0.0, NodeType::Main),
                Node::new("far", 1e19, 1e19, NodeType::Main),
            ],
            vec![Edge::new("near", "far")],
        );
        compute_costs(&mut map);
        assert_eq!(map.edges[0].cost, Some(i64::MAX));
        assert!(validate_costs(&map));
    }

    #[test]
    fn test_compute_costs_fills_every_edge() {
        let mut map = Map::new(
            vec![
                Node::new("a", 0.0, 0.0, NodeType::Main),
                Node::new("b", 2.0, 0.0, NodeType::Nav),
                Node::new("c", 2.0, 5.0, NodeType::Main),
            ],
            vec![Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("a", "c").with_cost(99)],
        );
        assert!(!validate_costs(&map));

        compute_costs(&mut map);

        let costs: Vec<_> = map.edges.iter().map(|edge| edge.cost).collect();
        assert_eq!(costs, vec![Some(2), Some(5), Some(7)]);
        assert!(validate_costs(&map));
    }

    #[test]
    fn test_compute_costs_is_idempotent() {
        let mut map = Map::new(
            vec![
                Node::new("a", 1.0, 1.0, NodeType::Main),
                Node::new("b", 4.0, 3.0, NodeType::Main),
            ],
            vec![Edge::new("a", "b")],
        );
        compute_costs(&mut map);
        let first = map.clone();
        compute_costs(&mut map);
        assert_eq!(first, map);
    }

    #[test]
    fn test_dangling_edge_is_left_alone() {
        let mut map = Map::new(
            vec![Node::new("a", 0.0, 0.0, NodeType::Main)],
            vec![Edge::new("a", "ghost")],
        );
        compute_costs(&mut map);
        assert_eq!(map.edges[0].cost, None);
    }
}
