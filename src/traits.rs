//! Collaborator traits for the triage workflow.
//!
//! Symptom extraction, clinic choice, requirement extraction and route
//! editing live outside this crate (language models behind a service).
//! The workflow only sees their structured outputs. Each call returns
//! `None` when the collaborator could not produce a usable result; the
//! workflow retries those.
//!
//! Implementations must be `Sync` so independent collection stages can run
//! concurrently.

use serde::{Deserialize, Serialize};

use crate::patch::RoutePatch;
use crate::route::Route;

/// Structured summary of a patient's symptoms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub body_parts: String,
    pub duration: String,
    pub severity: String,
    pub description: String,
    #[serde(default)]
    pub other_relevant_information: Vec<String>,
}

/// A patient requirement: when it applies and what it asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub when: String,
    pub what: String,
}

impl Requirement {
    pub fn new(when: impl Into<String>, what: impl Into<String>) -> Self {
        Self {
            when: when.into(),
            what: what.into(),
        }
    }
}

/// A main location offered to the clinic selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

pub trait ConditionCollector: Sync {
    fn collect_conditions(&self, user_input: &str) -> Option<ConditionSummary>;
}

pub trait ClinicSelector: Sync {
    /// Picks one of `locations` by id.
    fn select_clinic(&self, conditions: &ConditionSummary, locations: &[LocationInfo]) -> Option<String>;
}

pub trait RequirementCollector: Sync {
    /// An empty list is a valid answer: the patient asked for nothing.
    fn collect_requirements(&self, user_input: &str) -> Option<Vec<Requirement>>;
}

pub trait RoutePatcher: Sync {
    fn patch_route(
        &self,
        destination_clinic_id: &str,
        requirements: &[Requirement],
        origin_route: &Route,
    ) -> Option<Vec<RoutePatch>>;
}
