//! OTLP-style telemetry ingest and team-scoped export

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::middleware::CurrentPrincipal;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path, Query};
use crate::domain::auth::TeamScopeResolver;
use crate::domain::page::{Page, PageRequest};
use crate::domain::telemetry::{TelemetryRecord, TelemetrySignal};
use crate::infrastructure::telemetry::IngestRequest;

/// Routes mounted under `/otel/v1`
pub fn create_ingest_router() -> Router<AppState> {
    Router::new().route("/{signal}", post(ingest))
}

/// Routes mounted under `/export`
pub fn create_export_router() -> Router<AppState> {
    Router::new().route("/{signal}", get(export))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtelIngestRequest {
    pub team_tag: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub payload_json: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    pub team_tag: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

fn parse_signal(signal: &str) -> Result<TelemetrySignal, ApiError> {
    signal
        .parse::<TelemetrySignal>()
        .map_err(ApiError::not_found)
}

/// POST /otel/v1/{metrics|traces|logs}
pub async fn ingest(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(signal): Path<String>,
    Json(request): Json<OtelIngestRequest>,
) -> Result<StatusCode, ApiError> {
    let signal = parse_signal(&signal)?;
    let team_tag = TeamScopeResolver::resolve(&principal, request.team_tag.as_deref());

    state
        .telemetry_service
        .ingest(IngestRequest {
            signal,
            team_tag: team_tag.to_string(),
            timestamp: request.timestamp.unwrap_or_else(Utc::now),
            payload_json: request.payload_json,
        })
        .await?;

    Ok(StatusCode::ACCEPTED)
}

/// GET /export/{metrics|traces|logs}
pub async fn export(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(signal): Path<String>,
    Query(params): Query<ExportParams>,
) -> Result<Json<Page<TelemetryRecord>>, ApiError> {
    let signal = parse_signal(&signal)?;
    let team_tag = TeamScopeResolver::resolve(&principal, params.team_tag.as_deref());

    let page = state
        .telemetry_service
        .export(signal, team_tag, PageRequest::new(params.page, params.size))
        .await?;

    Ok(Json(page))
}
