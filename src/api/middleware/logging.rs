//! Request/response logging middleware
//!
//! Credentials never reach the log: an API key is shown by its prefix and a
//! bearer token only by its presence.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, info, warn};

use super::auth::{extract_api_key, extract_bearer_token};
use crate::infrastructure::auth::key_prefix;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Headers worth logging verbatim
const LOGGED_HEADERS: &[&str] = &["content-type", "content-length", "user-agent", "x-forwarded-for"];

/// Log each request and its outcome.
/// No span is opened here; `TraceLayer` owns the request span.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = route_path(&request);
    let request_id = request_id(&request);
    let credential = describe_credential(&request);

    debug!(
        method = %method,
        path = %path,
        request_id = %request_id,
        credential = %credential,
        headers = %logged_headers(&request),
        "Incoming request"
    );

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            credential = %credential,
            request_id = %request_id,
            "Request denied"
        ),
        s if s.is_server_error() => error!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request failed"
        ),
        s if s.is_client_error() => warn!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request rejected"
        ),
        s => info!(
            method = %method,
            path = %path,
            status = s.as_u16(),
            duration_ms,
            request_id = %request_id,
            "Request completed"
        ),
    }

    response
}

fn route_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Which credential the request presented, safe to log
fn describe_credential(request: &Request<Body>) -> String {
    let headers = request.headers();

    match (extract_api_key(headers), extract_bearer_token(headers)) {
        (Some(key), _) => format!("api-key:{}", key_prefix(key)),
        (None, Some(_)) => "bearer".to_string(),
        (None, None) => "none".to_string(),
    }
}

fn logged_headers(request: &Request<Body>) -> String {
    LOGGED_HEADERS
        .iter()
        .filter_map(|name| {
            request
                .headers()
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .map(|v| format!("{}={}", name, v))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
