//! HTTP adapter for the kiosk's triage service.
//!
//! The service wraps the language-model agents and answers with a
//! `{success, data, error}` envelope. Every failure maps to `None` so the
//! workflow's retry policy decides what happens next.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::patch::RoutePatch;
use crate::route::Route;
use crate::traits::{
    ClinicSelector, ConditionCollector, ConditionSummary, LocationInfo, Requirement,
    RequirementCollector, RoutePatcher,
};

#[derive(Debug, Clone)]
pub struct TriagerConfig {
    pub base_url: String,
    /// Use the hosted models instead of the kiosk's local ones.
    pub online_model: bool,
    pub timeout_secs: u64,
}

impl Default for TriagerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            online_model: true,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TriagerClient {
    config: TriagerConfig,
    client: reqwest::blocking::Client,
}

impl TriagerClient {
    pub fn new(config: TriagerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &TriagerConfig {
        &self.config
    }

    fn post<B, T>(&self, endpoint: &str, body: &B) -> Option<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = endpoint_url(&self.config.base_url, endpoint);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Envelope<T>>());

        match response {
            Ok(envelope) => envelope.into_data(endpoint),
            Err(err) => {
                warn!(endpoint, error = %err, "triager request failed");
                None
            }
        }
    }
}

fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/triager/{}/", base_url.trim_end_matches('/'), endpoint)
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> Envelope<T> {
    fn into_data(self, endpoint: &str) -> Option<T> {
        match self {
            Envelope {
                success: true,
                data: Some(data),
                ..
            } => Some(data),
            Envelope { error, .. } => {
                warn!(
                    endpoint,
                    error = error.as_deref().unwrap_or("empty response"),
                    "triager reported failure"
                );
                None
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct UserInputRequest<'a> {
    user_input: &'a str,
    online_model: bool,
}

#[derive(Debug, Serialize)]
struct SelectClinicRequest<'a> {
    conditions: &'a ConditionSummary,
    online_model: bool,
}

#[derive(Debug, Deserialize)]
struct ClinicSelection {
    clinic_selection: String,
}

#[derive(Debug, Serialize)]
struct PatchRouteRequest<'a> {
    destination_clinic_id: &'a str,
    requirement_summary: &'a [Requirement],
    origin_route: &'a Route,
    online_model: bool,
}

#[derive(Debug, Deserialize)]
struct PatchList {
    patches: Vec<RoutePatch>,
}

impl ConditionCollector for TriagerClient {
    fn collect_conditions(&self, user_input: &str) -> Option<ConditionSummary> {
        let body = UserInputRequest {
            user_input,
            online_model: self.config.online_model,
        };
        self.post("collect_conditions", &body)
    }
}

impl ClinicSelector for TriagerClient {
    /// The service selects from its own copy of the map, so `locations` is
    /// not sent; the workflow checks the answer against the local map.
    fn select_clinic(&self, conditions: &ConditionSummary, _locations: &[LocationInfo]) -> Option<String> {
        let body = SelectClinicRequest {
            conditions,
            online_model: self.config.online_model,
        };
        self.post::<_, ClinicSelection>("select_clinic", &body)
            .map(|selection| selection.clinic_selection)
    }
}

impl RequirementCollector for TriagerClient {
    fn collect_requirements(&self, user_input: &str) -> Option<Vec<Requirement>> {
        let body = UserInputRequest {
            user_input,
            online_model: self.config.online_model,
        };
        self.post("collect_requirement", &body)
    }
}

impl RoutePatcher for TriagerClient {
    fn patch_route(
        &self,
        destination_clinic_id: &str,
        requirements: &[Requirement],
        origin_route: &Route,
    ) -> Option<Vec<RoutePatch>> {
        let body = PatchRouteRequest {
            destination_clinic_id,
            requirement_summary: requirements,
            origin_route,
            online_model: self.config.online_model,
        };
        self.post::<_, PatchList>("patch_route", &body)
            .map(|list| list.patches)
    }
}
