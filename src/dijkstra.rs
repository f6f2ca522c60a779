//! Single-source shortest paths over the hospital map.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::error::PlanError;
use crate::graph::Map;

/// A node sequence from start to end and its cumulative cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    pub nodes: Vec<String>,
    pub cost: i64,
}

/// Dijkstra search over a validated map.
///
/// Edges are bidirectional with weight = cost. The map is borrowed for the
/// finder's lifetime, so costs cannot change underneath a search.
#[derive(Debug, Clone)]
pub struct PathFinder<'a> {
    map: &'a Map,
    index: HashMap<&'a str, usize>,
    adjacency: Vec<Vec<(usize, i64)>>,
}

impl<'a> PathFinder<'a> {
    /// Builds the adjacency list. Refuses maps that fail validation.
    pub fn new(map: &'a Map) -> Result<Self, PlanError> {
        map.validate()?;

        let index: HashMap<&str, usize> = map
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let mut adjacency = vec![Vec::new(); map.nodes.len()];
        // Endpoints and costs were checked by `validate`.
        for edge in &map.edges {
            let u = index[edge.u.as_str()];
            let v = index[edge.v.as_str()];
            let cost = edge.cost.unwrap_or_default();
            adjacency[u].push((v, cost));
            adjacency[v].push((u, cost));
        }

        Ok(Self {
            map,
            index,
            adjacency,
        })
    }

    pub fn map(&self) -> &'a Map {
        self.map
    }

    /// Minimal cumulative cost from `start` to every reachable node.
    ///
    /// An unknown start yields only `{start: 0}`.
    pub fn distances(&self, start: &str) -> HashMap<String, i64> {
        let Some(&source) = self.index.get(start) else {
            return HashMap::from([(start.to_string(), 0)]);
        };

        let (dist, _) = self.search(source, None);
        dist.iter()
            .enumerate()
            .filter(|(_, cost)| **cost != i64::MAX)
            .map(|(i, cost)| (self.map.nodes[i].id.clone(), *cost))
            .collect()
    }

    /// Shortest node sequence from `start` to `end`, or `None` if unreachable.
    pub fn shortest_path(&self, start: &str, end: &str) -> Option<ShortestPath> {
        if start == end {
            return Some(ShortestPath {
                nodes: vec![start.to_string()],
                cost: 0,
            });
        }

        let source = *self.index.get(start)?;
        let target = *self.index.get(end)?;

        let (dist, prev) = self.search(source, Some(target));
        if dist[target] == i64::MAX {
            return None;
        }

        let mut nodes = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            nodes.push(self.map.nodes[node].id.clone());
            current = prev[node];
        }
        nodes.reverse();

        Some(ShortestPath {
            nodes,
            cost: dist[target],
        })
    }

    /// Runs Dijkstra from `source`, stopping early once `target` is settled.
    fn search(&self, source: usize, target: Option<usize>) -> (Vec<i64>, Vec<Option<usize>>) {
        let n = self.adjacency.len();
        let mut dist = vec![i64::MAX; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];

        dist[source] = 0;
        let mut heap = BinaryHeap::new();
        heap.push(Reverse((0i64, source)));

        while let Some(Reverse((cost, node))) = heap.pop() {
            if Some(node) == target {
                break;
            }
            // Stale entry.
            if cost > dist[node] {
                continue;
            }

            for &(neighbor, weight) in &self.adjacency[node] {
                let next_cost = cost.saturating_add(weight);
                if next_cost < dist[neighbor] {
                    dist[neighbor] = next_cost;
                    prev[neighbor] = Some(node);
                    heap.push(Reverse((next_cost, neighbor)));
                }
            }
        }

        (dist, prev)
    }
}
