//! Extractor for the authenticated principal

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::api::types::ApiError;
use crate::domain::auth::Principal;

/// The principal attached by the authentication middleware.
///
/// Rejects with 401 when the request is anonymous.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S: Send + Sync> FromRequestParts<S> for CurrentPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use crate::domain::auth::{Role, RoleSet};

    #[tokio::test]
    async fn test_extracts_principal() {
        let mut request = Request::builder().uri("/auth/me").body(()).unwrap();
        request
            .extensions_mut()
            .insert(Principal::new("IA", Some(2), RoleSet::of(&[Role::Ia])));
        let (mut parts, _) = request.into_parts();

        let CurrentPrincipal(principal) = CurrentPrincipal::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(principal.team_tag(), "IA");
    }

    #[tokio::test]
    async fn test_anonymous_is_rejected() {
        let (mut parts, _) = Request::builder().uri("/auth/me").body(()).unwrap().into_parts();

        let err = CurrentPrincipal::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
