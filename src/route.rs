//! Routes at main-node granularity and their expansion into full paths.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dijkstra::PathFinder;
use crate::error::PlanError;
use crate::path::FullPath;

/// Default itinerary around the patient's clinic.
const BASE_ITINERARY: [&str; 6] = [
    "entrance",
    "registration_center",
    "",
    "payment_center",
    "pharmacy",
    "quit",
];
const CLINIC_SLOT: usize = 2;

/// One directed hop of a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationLink {
    pub this: String,
    pub next: String,
}

impl LocationLink {
    pub fn new(this: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            this: this.into(),
            next: next.into(),
        }
    }
}

/// Ordered hops where each link's `next` is the following link's `this`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    links: Vec<LocationLink>,
}

impl Route {
    pub fn new(links: Vec<LocationLink>) -> Self {
        Self { links }
    }

    /// Chains consecutive ids: `[a, b, c]` becomes `a->b, b->c`.
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Self {
        let links = ids
            .windows(2)
            .map(|pair| LocationLink::new(pair[0].as_ref(), pair[1].as_ref()))
            .collect();
        Self { links }
    }

    /// Default kiosk itinerary passing through `clinic_id`.
    pub fn base(clinic_id: &str) -> Self {
        let mut ids: [&str; 6] = BASE_ITINERARY;
        ids[CLINIC_SLOT] = clinic_id;
        Self::from_ids(&ids)
    }

    pub fn links(&self) -> &[LocationLink] {
        &self.links
    }

    pub fn into_links(self) -> Vec<LocationLink> {
        self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Visited locations in order: the first `this` followed by every `next`.
    pub fn node_ids(&self) -> Vec<&str> {
        let Some(first) = self.links.first() else {
            return Vec::new();
        };
        std::iter::once(first.this.as_str())
            .chain(self.links.iter().map(|link| link.next.as_str()))
            .collect()
    }

    pub fn validate_chain(&self) -> Result<(), PlanError> {
        for (index, pair) in self.links.windows(2).enumerate() {
            if pair[0].next != pair[1].this {
                return Err(PlanError::RouteBroken {
                    index,
                    next: pair[0].next.clone(),
                    this: pair[1].this.clone(),
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<LocationLink>> for Route {
    fn from(links: Vec<LocationLink>) -> Self {
        Self::new(links)
    }
}

/// Expands main-node hops into every node physically traversed.
///
/// Each hop is replaced by its shortest sub-path; the joining node between
/// consecutive hops appears once. A route whose links do not chain is
/// rejected with `RouteBroken`.
pub fn expand_to_full_path(route: &Route, finder: &PathFinder<'_>) -> Result<FullPath, PlanError> {
    route.validate_chain()?;

    let Some(first) = route.links().first() else {
        return Ok(FullPath::default());
    };

    let mut full_path = FullPath::new(vec![first.this.clone()]);
    for link in route.links() {
        let sub_path = finder
            .shortest_path(&link.this, &link.next)
            .ok_or_else(|| PlanError::NoPathFound {
                from: link.this.clone(),
                to: link.next.clone(),
            })?;
        full_path.extend_joined(sub_path.nodes);
    }

    debug!(hops = route.len(), nodes = full_path.len(), "expanded route");
    Ok(full_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Map, Node, NodeType};
    use crate::manhattan::compute_costs;

    /// Two clinics joined through a nav corridor node.
    fn corridor_map() -> Map {
        let mut map = Map::new(
            vec![
                Node::new("entrance", 0.0, 0.0, NodeType::Main),
                Node::new("hall", 5.0, 0.0, NodeType::Nav),
                Node::new("clinic", 5.0, 5.0, NodeType::Main),
                Node::new("island", 50.0, 50.0, NodeType::Main),
            ],
            vec![Edge::new("entrance", "hall"), Edge::new("hall", "clinic")],
        );
        compute_costs(&mut map);
        map
    }

    #[test]
    fn test_from_ids_and_node_ids() {
        let route = Route::from_ids(&["a", "b", "c"]);
        assert_eq!(
            route.links(),
            &[LocationLink::new("a", "b"), LocationLink::new("b", "c")]
        );
        assert_eq!(route.node_ids(), vec!["a", "b", "c"]);
        assert_eq!(route.validate_chain(), Ok(()));
    }

    #[test]
    fn test_base_route_places_clinic() {
        let route = Route::base("internal_clinic");
        assert_eq!(
            route.node_ids(),
            vec![
                "entrance",
                "registration_center",
                "internal_clinic",
                "payment_center",
                "pharmacy",
                "quit"
            ]
        );
    }

    #[test]
    fn test_broken_chain_is_reported() {
        let route = Route::new(vec![LocationLink::new("a", "b"), LocationLink::new("c", "d")]);
        assert_eq!(
            route.validate_chain(),
            Err(PlanError::RouteBroken {
                index: 0,
                next: "b".to_string(),
                this: "c".to_string(),
            })
        );
    }

    #[test]
    fn test_serializes_as_link_list() {
        let route = Route::from_ids(&["a", "b"]);
        assert_eq!(
            serde_json::to_string(&route).unwrap(),
            r#"[{"this":"a","next":"b"}]"#
        );
    }

    #[test]
    fn test_expansion_inserts_nav_nodes() {
        let map = corridor_map();
        let finder = PathFinder::new(&map).unwrap();
        let route = Route::from_ids(&["entrance", "clinic", "entrance"]);
        let path = expand_to_full_path(&route, &finder).unwrap();
        assert_eq!(
            path,
            FullPath::from(vec!["entrance", "hall", "clinic", "hall", "entrance"])
        );
    }

    #[test]
    fn test_empty_route_expands_to_empty_path() {
        let map = corridor_map();
        let finder = PathFinder::new(&map).unwrap();
        let path = expand_to_full_path(&Route::default(), &finder).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_expansion_rejects_broken_chain() {
        let map = corridor_map();
        let finder = PathFinder::new(&map).unwrap();
        let route = Route::new(vec![
            LocationLink::new("entrance", "hall"),
            LocationLink::new("clinic", "entrance"),
        ]);
        assert_eq!(
            expand_to_full_path(&route, &finder),
            Err(PlanError::RouteBroken {
                index: 0,
                next: "hall".to_string(),
                this: "clinic".to_string(),
            })
        );
    }

    #[test]
    fn test_expansion_reports_missing_path() {
        let map = corridor_map();
        let finder = PathFinder::new(&map).unwrap();
        let route = Route::from_ids(&["entrance", "clinic", "island"]);
        assert_eq!(
            expand_to_full_path(&route, &finder),
            Err(PlanError::NoPathFound {
                from: "clinic".to_string(),
                to: "island".to_string(),
            })
        );
    }
}
