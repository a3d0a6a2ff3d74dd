//! Team management admin endpoints

use axum::{
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::CurrentPrincipal;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path};
use crate::domain::auth::RoleSet;
use crate::domain::team::{Team, TeamId};
use crate::infrastructure::team::{CreateTeamRequest, UpdateTeamRequest};

/// Request to create a new team
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamApiRequest {
    pub tag: String,
    pub secret: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
}

/// Request to update a team
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeamApiRequest {
    pub description: Option<String>,
    pub emails: Option<Vec<String>>,
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    pub role_name: String,
}

/// Team as exposed by the admin API; the secret hash never leaves the server
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: TeamId,
    pub tag: String,
    pub description: Option<String>,
    pub emails: Vec<String>,
    pub roles: RoleSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            tag: team.tag().to_string(),
            description: team.description().map(String::from),
            emails: team.emails().to_vec(),
            roles: team.roles(),
            created_at: team.created_at(),
            updated_at: team.updated_at(),
        }
    }
}

/// GET /admin/teams
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<Vec<TeamResponse>>, ApiError> {
    let teams = state.team_service.list().await?;
    Ok(Json(teams.iter().map(TeamResponse::from).collect()))
}

/// POST /admin/teams
pub async fn create_team(
    State(state): State<AppState>,
    CurrentPrincipal(admin): CurrentPrincipal,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    debug!(admin = %admin.team_tag(), tag = %request.tag, "Admin creating team");

    let team = state
        .team_service
        .create(CreateTeamRequest {
            tag: request.tag,
            secret: request.secret,
            description: request.description,
            emails: request.emails,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// GET /admin/teams/{id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeamResponse>, ApiError> {
    let team = state.team_service.get(TeamId::new(id)).await?;
    Ok(Json(TeamResponse::from(&team)))
}

/// PATCH /admin/teams/{id}
pub async fn update_team(
    State(state): State<AppState>,
    CurrentPrincipal(admin): CurrentPrincipal,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTeamApiRequest>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(admin = %admin.team_tag(), id = id, "Admin updating team");

    let team = state
        .team_service
        .update(
            TeamId::new(id),
            UpdateTeamRequest {
                description: request.description,
                emails: request.emails,
                secret: request.secret,
            },
        )
        .await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// DELETE /admin/teams/{id}
pub async fn delete_team(
    State(state): State<AppState>,
    CurrentPrincipal(admin): CurrentPrincipal,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    debug!(admin = %admin.team_tag(), id = id, "Admin deleting team");

    state.team_service.delete(TeamId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/teams/{id}/roles
pub async fn add_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AssignRoleRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let team = state
        .team_service
        .add_role(TeamId::new(id), &request.role_name)
        .await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// DELETE /admin/teams/{id}/roles/{role_name}
pub async fn remove_role(
    State(state): State<AppState>,
    Path((id, role_name)): Path<(i64, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .team_service
        .remove_role(TeamId::new(id), &role_name)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
