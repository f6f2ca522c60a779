//! Planning errors.
//!
//! Every failure is scoped to a single planning request and carries the
//! identifiers needed to diagnose it without re-running.

use std::fmt;

use crate::patch::RoutePatch;

/// A structural problem with a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapIssue {
    EmptyNodes,
    EmptyEdges,
    DuplicateNode { id: String },
    DanglingEdge { u: String, v: String, missing: String },
    MissingCost { u: String, v: String },
    NegativeCost { u: String, v: String, cost: i64 },
}

impl fmt::Display for MapIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapIssue::EmptyNodes => write!(f, "map has no nodes"),
            MapIssue::EmptyEdges => write!(f, "map has no edges"),
            MapIssue::DuplicateNode { id } => write!(f, "duplicate node id {}", id),
            MapIssue::DanglingEdge { u, v, missing } => {
                write!(f, "edge {}-{} references unknown node {}", u, v, missing)
            }
            MapIssue::MissingCost { u, v } => write!(f, "edge {}-{} has no cost", u, v),
            MapIssue::NegativeCost { u, v, cost } => {
                write!(f, "edge {}-{} has negative cost {}", u, v, cost)
            }
        }
    }
}

/// Collaborator stage of the triage workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CollectConditions,
    SelectClinic,
    CollectRequirements,
    PatchRoute,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::CollectConditions => "collect conditions",
            Stage::SelectClinic => "select clinic",
            Stage::CollectRequirements => "collect requirements",
            Stage::PatchRoute => "patch route",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    MapInvalid(MapIssue),
    NoPathFound {
        from: String,
        to: String,
    },
    /// `route[index].next` does not match `route[index + 1].this`.
    RouteBroken {
        index: usize,
        next: String,
        this: String,
    },
    PatchApplication {
        patch: RoutePatch,
        reason: String,
    },
    CommandCompilation {
        node_id: String,
    },
    StageRetryExhausted {
        stage: Stage,
        attempts: u32,
    },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::MapInvalid(issue) => write!(f, "invalid map: {}", issue),
            PlanError::NoPathFound { from, to } => {
                write!(f, "no path found between {} and {}", from, to)
            }
            PlanError::RouteBroken { index, next, this } => write!(
                f,
                "route discontinuity at link {}: {} does not connect to {}",
                index, next, this
            ),
            PlanError::PatchApplication { patch, reason } => write!(
                f,
                "cannot apply {} patch ({}, {}, {}): {}",
                patch.kind, patch.previous, patch.this, patch.next, reason
            ),
            PlanError::CommandCompilation { node_id } => {
                write!(f, "node {} has no coordinates", node_id)
            }
            PlanError::StageRetryExhausted { stage, attempts } => {
                write!(f, "{} failed after {} attempts", stage, attempts)
            }
        }
    }
}

impl std::error::Error for PlanError {}

impl From<MapIssue> for PlanError {
    fn from(issue: MapIssue) -> Self {
        PlanError::MapInvalid(issue)
    }
}
