//! triage-router core
//!
//! Hospital map routing for a triage kiosk: shortest paths between
//! locations, patient-specific route edits, and compilation of the final
//! route into move/turn commands for a delivery robot.

pub mod error;
pub mod graph;
pub mod manhattan;
pub mod map_data;
pub mod dijkstra;
pub mod path;
pub mod route;
pub mod patch;
pub mod car;
pub mod traits;
pub mod workflow;
pub mod triager_http;
