//! Cognitive alert endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::CurrentPrincipal;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path, Query};
use crate::domain::alert::{Alert, AlertQuery, AlertType};
use crate::domain::auth::{Principal, TeamScopeResolver};
use crate::domain::page::{Page, PageRequest};
use crate::infrastructure::alert::CreateAlertRequest;

/// Alert routes, merged at the root
pub fn create_alerts_router() -> Router<AppState> {
    Router::new()
        .route("/alerts", get(list_alerts).post(create_alert))
        .route("/alerts/unresolved", get(list_unresolved))
        .route("/alerts/unresolved/count", get(count_unresolved))
        .route("/alerts/{id}/resolve", put(resolve_alert))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertBody {
    pub team_tag: Option<String>,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AlertParams {
    pub team: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

fn scoped_query(principal: &Principal, params: &AlertParams) -> AlertQuery {
    let team_tag = TeamScopeResolver::resolve(principal, params.team.as_deref());
    AlertQuery::for_team(team_tag).with_page(PageRequest::new(params.page, params.size))
}

/// POST /alerts
pub async fn create_alert(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(body): Json<CreateAlertBody>,
) -> Result<(StatusCode, Json<Alert>), ApiError> {
    let team_tag = TeamScopeResolver::resolve(&principal, body.team_tag.as_deref());

    let alert = state
        .alert_service
        .create(CreateAlertRequest {
            team_tag: team_tag.to_string(),
            alert_type: body.alert_type,
            message: body.message,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(alert)))
}

/// GET /alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Query(params): Query<AlertParams>,
) -> Result<Json<Page<Alert>>, ApiError> {
    let query = scoped_query(&principal, &params);
    Ok(Json(state.alert_service.list(&query).await?))
}

/// GET /alerts/unresolved
pub async fn list_unresolved(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Query(params): Query<AlertParams>,
) -> Result<Json<Page<Alert>>, ApiError> {
    let query = scoped_query(&principal, &params).unresolved();
    Ok(Json(state.alert_service.list(&query).await?))
}

/// GET /alerts/unresolved/count
pub async fn count_unresolved(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Query(params): Query<AlertParams>,
) -> Result<Json<CountResponse>, ApiError> {
    let query = scoped_query(&principal, &params).unresolved();
    let count = state.alert_service.count(&query).await?;

    Ok(Json(CountResponse { count }))
}

/// PUT /alerts/{id}/resolve
pub async fn resolve_alert(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<i64>,
) -> Result<Json<Alert>, ApiError> {
    Ok(Json(state.alert_service.resolve(id, &principal).await?))
}
