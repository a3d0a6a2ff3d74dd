use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::admin;
use super::alerts;
use super::auth;
use super::docs;
use super::health;
use super::middleware::{authentication_middleware, authorization_middleware, logging_middleware};
use super::state::AppState;
use super::telemetry;
use super::types::ApiError;

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}

/// Create the full router with application state.
///
/// Authentication runs first, then the access policy, for every route and
/// the fallback; handlers only ever see allowed requests.
pub fn create_router_with_state(state: AppState) -> Router {
    with_gateway_layers(routes(), state)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/docs", get(docs::docs_index))
        .nest("/auth", auth::create_auth_router())
        .nest("/otel/v1", telemetry::create_ingest_router())
        .nest("/export", telemetry::create_export_router())
        .merge(alerts::create_alerts_router())
        .nest("/admin", admin::create_admin_router())
        .fallback(not_found)
}

fn with_gateway_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(from_fn_with_state(state.clone(), authorization_middleware))
        .layer(from_fn_with_state(state.clone(), authentication_middleware))
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
