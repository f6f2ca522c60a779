//! Test fixtures for triage-router.
//!
//! Provides a small hospital floor plan:
//! - main locations along a corridor loop of nav waypoints
//! - an isolated storage room for unreachable-target cases

pub mod hospital;

pub use hospital::*;
