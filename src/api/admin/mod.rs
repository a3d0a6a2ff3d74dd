//! Admin API endpoints for team administration

pub mod teams;

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/{id}",
            get(teams::get_team)
                .patch(teams::update_team)
                .delete(teams::delete_team),
        )
        .route("/teams/{id}/roles", post(teams::add_role))
        .route("/teams/{id}/roles/{role_name}", delete(teams::remove_role))
}
