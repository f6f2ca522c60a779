//! Triage workflow: collaborator calls with bounded retries, feeding the
//! patch engine and the command compiler.
//!
//! Pipeline: collect conditions and requirements, select a clinic, ask the
//! route patcher for edits, apply them, expand the route and compile robot
//! actions. The first stage that fails aborts the request.

use std::thread;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::car::{CarAction, compile};
use crate::dijkstra::PathFinder;
use crate::error::{PlanError, Stage};
use crate::graph::Map;
use crate::patch::{RoutePatch, apply_patches};
use crate::path::FullPath;
use crate::route::{Route, expand_to_full_path};
use crate::traits::{
    ClinicSelector, ConditionCollector, ConditionSummary, Requirement, RequirementCollector,
    RoutePatcher,
};

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total calls per stage, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    pub retry: RetryPolicy,
    /// Run condition and requirement collection concurrently. Disable when
    /// both collectors share one non-reentrant backend.
    pub concurrent_collection: bool,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            concurrent_collection: true,
        }
    }
}

/// The four external collaborators of a triage request.
///
/// One backend may fill several roles; pass the same reference twice.
pub struct Collaborators<'a, C, S, Q, P> {
    pub conditions: &'a C,
    pub clinic: &'a S,
    pub requirements: &'a Q,
    pub patcher: &'a P,
}

impl<C, S, Q, P> Clone for Collaborators<'_, C, S, Q, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, S, Q, P> Copy for Collaborators<'_, C, S, Q, P> {}

/// Output of the collaborator stages.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteModification {
    pub conditions: ConditionSummary,
    pub clinic_id: String,
    pub requirements: Vec<Requirement>,
    pub patches: Vec<RoutePatch>,
}

/// A fully planned request, ready for the robot.
#[derive(Debug, Clone, PartialEq)]
pub struct TriagePlan {
    pub modification: RouteModification,
    pub route: Route,
    pub full_path: FullPath,
    pub actions: Vec<CarAction>,
}

/// Calls `attempt` until it yields a value or the policy runs out.
pub fn with_retries<T>(
    stage: Stage,
    policy: &RetryPolicy,
    mut attempt: impl FnMut() -> Option<T>,
) -> Result<T, PlanError> {
    let attempts = policy.max_attempts.max(1);

    for tried in 1..=attempts {
        if let Some(value) = attempt() {
            return Ok(value);
        }
        warn!(%stage, attempt = tried, max_attempts = attempts, "stage returned no usable result");
        if tried < attempts && !policy.delay.is_zero() {
            thread::sleep(policy.delay);
        }
    }

    error!(%stage, attempts, "stage failed, giving up");
    Err(PlanError::StageRetryExhausted { stage, attempts })
}

pub fn collect_conditions<C: ConditionCollector>(
    collector: &C,
    user_input: &str,
    policy: &RetryPolicy,
) -> Result<ConditionSummary, PlanError> {
    with_retries(Stage::CollectConditions, policy, || {
        collector.collect_conditions(user_input)
    })
}

/// Asks for a clinic among the map's main nodes. An id that is not a main
/// node counts as a failed attempt.
pub fn select_clinic<S: ClinicSelector>(
    selector: &S,
    conditions: &ConditionSummary,
    map: &Map,
    policy: &RetryPolicy,
) -> Result<String, PlanError> {
    let locations = map.main_locations();
    with_retries(Stage::SelectClinic, policy, || {
        let clinic_id = selector.select_clinic(conditions, &locations)?;
        let clinic_id = clinic_id.trim();
        if map.is_main_node(clinic_id) {
            Some(clinic_id.to_string())
        } else {
            warn!(clinic_id, "clinic selector chose an unknown location");
            None
        }
    })
}

pub fn collect_requirements<Q: RequirementCollector>(
    collector: &Q,
    user_input: &str,
    policy: &RetryPolicy,
) -> Result<Vec<Requirement>, PlanError> {
    with_retries(Stage::CollectRequirements, policy, || {
        collector.collect_requirements(user_input)
    })
}

pub fn patch_route<P: RoutePatcher>(
    patcher: &P,
    destination_clinic_id: &str,
    requirements: &[Requirement],
    origin_route: &Route,
    policy: &RetryPolicy,
) -> Result<Vec<RoutePatch>, PlanError> {
    with_retries(Stage::PatchRoute, policy, || {
        patcher.patch_route(destination_clinic_id, requirements, origin_route)
    })
}

/// Runs the collaborator stages and returns the patches for `origin_route`
/// without applying them.
pub fn modify_route<C, S, Q, P>(
    user_input: &str,
    origin_route: &Route,
    map: &Map,
    collaborators: Collaborators<'_, C, S, Q, P>,
    options: &WorkflowOptions,
) -> Result<RouteModification, PlanError>
where
    C: ConditionCollector,
    S: ClinicSelector,
    Q: RequirementCollector,
    P: RoutePatcher,
{
    let policy = &options.retry;

    let (conditions, requirements) = if options.concurrent_collection {
        let (conditions, requirements) = rayon::join(
            || collect_conditions(collaborators.conditions, user_input, policy),
            || collect_requirements(collaborators.requirements, user_input, policy),
        );
        (conditions?, requirements?)
    } else {
        let conditions = collect_conditions(collaborators.conditions, user_input, policy)?;
        let requirements = collect_requirements(collaborators.requirements, user_input, policy)?;
        (conditions, requirements)
    };

    let clinic_id = select_clinic(collaborators.clinic, &conditions, map, policy)?;
    let patches = patch_route(
        collaborators.patcher,
        &clinic_id,
        &requirements,
        origin_route,
        policy,
    )?;

    debug!(
        clinic_id = %clinic_id,
        requirements = requirements.len(),
        patches = patches.len(),
        "collected route modification"
    );

    Ok(RouteModification {
        conditions,
        clinic_id,
        requirements,
        patches,
    })
}

/// Full pipeline from patient input to robot actions.
pub fn plan<C, S, Q, P>(
    user_input: &str,
    origin_route: &Route,
    finder: &PathFinder<'_>,
    collaborators: Collaborators<'_, C, S, Q, P>,
    options: &WorkflowOptions,
) -> Result<TriagePlan, PlanError>
where
    C: ConditionCollector,
    S: ClinicSelector,
    Q: RequirementCollector,
    P: RoutePatcher,
{
    origin_route.validate_chain()?;

    let modification = modify_route(user_input, origin_route, finder.map(), collaborators, options)?;
    let route = apply_patches(origin_route, &modification.patches)?;
    let full_path = expand_to_full_path(&route, finder)?;
    let actions = compile(&full_path, finder.map())?;

    Ok(TriagePlan {
        modification,
        route,
        full_path,
        actions,
    })
}
