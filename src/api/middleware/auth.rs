//! Per-request authentication and route authorization

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::auth::Principal;
use crate::infrastructure::auth::{key_prefix, ApiKeyRegistry, TokenService};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Resolves the principal of a request from its headers.
///
/// A registered API key wins over a bearer token. Any failure leaves the
/// request anonymous; rejecting it is the access policy's decision.
#[derive(Debug, Clone)]
pub struct RequestAuthenticationChain {
    api_keys: Arc<ApiKeyRegistry>,
    tokens: Arc<dyn TokenService>,
}

impl RequestAuthenticationChain {
    pub fn new(api_keys: Arc<ApiKeyRegistry>, tokens: Arc<dyn TokenService>) -> Self {
        Self { api_keys, tokens }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Option<Principal> {
        if let Some(key) = extract_api_key(headers) {
            match self.api_keys.lookup(key) {
                Some(identity) => {
                    debug!(team = %identity.team_tag, "Authenticated by API key");
                    return Some(identity.to_principal());
                }
                None => warn!(key = %key_prefix(key), "Unknown API key"),
            }
        }

        let token = extract_bearer_token(headers)?;
        match self.tokens.verify(token) {
            Ok(principal) => {
                debug!(team = %principal.team_tag(), "Authenticated by bearer token");
                Some(principal)
            }
            Err(e) => {
                warn!(error = %e, "Bearer token rejected");
                None
            }
        }
    }
}

/// Extract the API key header value, if present and non-empty
pub fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Attach the resolved principal, if any, to the request extensions
pub async fn authentication_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let chain = RequestAuthenticationChain::new(state.api_keys.clone(), state.tokens.clone());

    if let Some(principal) = chain.authenticate(request.headers()) {
        request.extensions_mut().insert(principal);
    }

    next.run(request).await
}

/// Enforce the access policy before any handler runs
pub async fn authorization_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();
    let principal = request.extensions().get::<Principal>();

    if let Err(e) = state.policy.check(path, principal) {
        warn!(
            path = %path,
            team = principal.map(Principal::team_tag).unwrap_or("-"),
            "Request denied"
        );
        return ApiError::from(e).into_response();
    }

    next.run(request).await
}
