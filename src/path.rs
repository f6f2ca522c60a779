//! Full waypoint paths.
//!
//! A full path is a route expanded to every node the robot physically
//! traverses, main and nav alike. It is produced by route expansion and
//! consumed by the command compiler.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullPath {
    nodes: Vec<String>,
}

impl FullPath {
    pub fn new(nodes: Vec<String>) -> Self {
        Self { nodes }
    }

    /// Node ids in traversal order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<String> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a sub-path whose first node is already the last one here.
    pub(crate) fn extend_joined(&mut self, sub_path: Vec<String>) {
        let skip = usize::from(!self.nodes.is_empty());
        self.nodes.extend(sub_path.into_iter().skip(skip));
    }
}

impl From<Vec<&str>> for FullPath {
    fn from(nodes: Vec<&str>) -> Self {
        Self::new(nodes.into_iter().map(str::to_string).collect())
    }
}
