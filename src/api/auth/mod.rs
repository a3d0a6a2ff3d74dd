//! Authentication API endpoints
//!
//! Team secret login, API key token exchange and the current principal.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::middleware::{extract_api_key, CurrentPrincipal};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::auth::RoleSet;
use crate::domain::DomainError;
use crate::infrastructure::auth::key_prefix;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/token", post(token))
        .route("/me", get(me))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub secret: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub team: String,
    pub roles: RoleSet,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub team_id: Option<i64>,
    pub team_tag: String,
    pub email: String,
    pub roles: RoleSet,
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = state
        .login_service
        .login(&request.team, &request.secret)
        .await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        team: outcome.team_tag,
        roles: outcome.roles,
        expires_at: outcome.expires_at,
    }))
}

/// POST /auth/token
///
/// Exchange the `X-API-KEY` header for a token carrying the key's identity.
pub async fn token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let key = extract_api_key(&headers).ok_or(DomainError::InvalidApiKey)?;

    let Some(identity) = state.api_keys.lookup(key) else {
        warn!(key = %key_prefix(key), "Token exchange rejected");
        return Err(DomainError::InvalidApiKey.into());
    };

    let issued = state.tokens.issue(&identity.to_principal())?;
    info!(team = %identity.team_tag, "Token issued for API key");

    Ok(Json(TokenResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

/// GET /auth/me
pub async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> Json<MeResponse> {
    Json(MeResponse {
        team_id: principal.team_id(),
        team_tag: principal.team_tag().to_string(),
        email: principal.email().to_string(),
        roles: principal.roles(),
    })
}
