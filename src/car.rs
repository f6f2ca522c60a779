//! Robot command compilation.
//!
//! Turns a full path into turn-then-move actions. Map coordinates grow east
//! along x and south along y.
//!
//! Known limitations:
//! - a 180 degree heading change resolves to `left`, a placeholder for a
//!   U-turn the robot firmware does not define yet;
//! - a diagonal hop takes its direction from x alone while its distance
//!   counts both axes. Maps are expected to be axis-aligned.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dijkstra::PathFinder;
use crate::error::PlanError;
use crate::graph::Map;
use crate::manhattan::{axis_delta, manhattan_distance};
use crate::path::FullPath;
use crate::route::{Route, expand_to_full_path};

/// Turn performed before moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Straight,
    Left,
    Right,
}

/// Turn, then move `distance` units, in the same units as edge costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarAction {
    pub orientation: Orientation,
    pub distance: i64,
}

impl CarAction {
    pub fn new(orientation: Orientation, distance: i64) -> Self {
        Self {
            orientation,
            distance,
        }
    }
}

/// Absolute heading of one path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    East,
    North,
    West,
    South,
}

impl Direction {
    /// Heading of a segment, or `None` when it does not move.
    pub fn of_segment(dx: i64, dy: i64) -> Option<Self> {
        if dx > 0 {
            Some(Direction::East)
        } else if dx < 0 {
            Some(Direction::West)
        } else if dy > 0 {
            Some(Direction::South)
        } else if dy < 0 {
            Some(Direction::North)
        } else {
            None
        }
    }

    /// Compass degrees, counter-clockwise from east.
    pub fn degrees(self) -> u32 {
        match self {
            Direction::East => 0,
            Direction::North => 90,
            Direction::West => 180,
            Direction::South => 270,
        }
    }

    /// Turn needed to go from heading `self` to heading `target`.
    pub fn turn_to(self, target: Direction) -> Orientation {
        match (target.degrees() + 360 - self.degrees()) % 360 {
            0 => Orientation::Straight,
            90 => Orientation::Left,
            270 => Orientation::Right,
            // U-turn placeholder.
            _ => Orientation::Left,
        }
    }
}

/// Compiles a full path into robot actions.
///
/// Consecutive straight moves are merged and zero-length actions dropped.
/// Fewer than two nodes means the robot is already there.
pub fn compile(path: &FullPath, map: &Map) -> Result<Vec<CarAction>, PlanError> {
    let nodes = path.nodes();
    if nodes.len() < 2 {
        return Ok(Vec::new());
    }

    let coords: HashMap<&str, (f64, f64)> = map
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node.coords()))
        .collect();
    let lookup = |id: &String| {
        coords
            .get(id.as_str())
            .copied()
            .ok_or_else(|| PlanError::CommandCompilation { node_id: id.clone() })
    };

    let mut actions: Vec<CarAction> = Vec::with_capacity(nodes.len() - 1);
    let mut heading: Option<Direction> = None;

    for (i, pair) in nodes.windows(2).enumerate() {
        let (x1, y1) = lookup(&pair[0])?;
        let (x2, y2) = lookup(&pair[1])?;
        let dx = axis_delta(x1, x2);
        let dy = axis_delta(y1, y2);
        let distance = manhattan_distance((x1, y1), (x2, y2));

        let direction = Direction::of_segment(dx, dy);
        let orientation = match (i, heading, direction) {
            (0, _, _) => Orientation::Straight,
            (_, Some(previous), Some(target)) => previous.turn_to(target),
            _ => Orientation::Straight,
        };
        // A stationary segment keeps the previous heading.
        if direction.is_some() {
            heading = direction;
        }

        actions.push(CarAction::new(orientation, distance));
    }

    let compiled: Vec<CarAction> = merge_straight_moves(actions)
        .into_iter()
        .filter(|action| action.distance > 0)
        .collect();

    debug!(nodes = nodes.len(), actions = compiled.len(), "compiled car actions");
    Ok(compiled)
}

fn merge_straight_moves(actions: Vec<CarAction>) -> Vec<CarAction> {
    let mut merged: Vec<CarAction> = Vec::with_capacity(actions.len());
    for action in actions {
        match merged.last_mut() {
            Some(last)
                if action.orientation == Orientation::Straight
                    && last.orientation == Orientation::Straight =>
            {
                last.distance = last.distance.saturating_add(action.distance);
            }
            _ => merged.push(action),
        }
    }
    merged
}

/// Expands a route and compiles it in one step.
pub fn route_to_commands(route: &Route, finder: &PathFinder<'_>) -> Result<Vec<CarAction>, PlanError> {
    let full_path = expand_to_full_path(route, finder)?;
    compile(&full_path, finder.map())
}
