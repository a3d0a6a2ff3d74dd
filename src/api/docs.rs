//! Machine-readable endpoint index

use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::auth::{Access, AccessPolicy};

const ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/health"),
    ("GET", "/live"),
    ("GET", "/docs"),
    ("POST", "/auth/login"),
    ("POST", "/auth/token"),
    ("GET", "/auth/me"),
    ("POST", "/otel/v1/{metrics|traces|logs}"),
    ("GET", "/export/{metrics|traces|logs}"),
    ("POST", "/alerts"),
    ("GET", "/alerts"),
    ("GET", "/alerts/unresolved"),
    ("GET", "/alerts/unresolved/count"),
    ("PUT", "/alerts/{id}/resolve"),
    ("GET", "/admin/teams"),
    ("POST", "/admin/teams"),
    ("GET", "/admin/teams/{id}"),
    ("PATCH", "/admin/teams/{id}"),
    ("DELETE", "/admin/teams/{id}"),
    ("POST", "/admin/teams/{id}/roles"),
    ("DELETE", "/admin/teams/{id}/roles/{roleName}"),
];

#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub access: String,
}

#[derive(Debug, Serialize)]
pub struct DocsResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointDoc>,
}

fn describe(policy: &AccessPolicy, path: &str) -> String {
    match policy.rule_for(path).map(|rule| rule.access()) {
        Some(Access::Public) => "public".to_string(),
        Some(Access::Authenticated) => "authenticated".to_string(),
        Some(Access::AnyRole(roles)) => roles.authorities().join(" | "),
        None => "denied".to_string(),
    }
}

/// GET /docs
pub async fn docs_index(State(state): State<AppState>) -> Json<DocsResponse> {
    let endpoints = ENDPOINTS
        .iter()
        .map(|&(method, path)| EndpointDoc {
            method,
            path,
            access: describe(&state.policy, path),
        })
        .collect();

    Json(DocsResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    })
}
