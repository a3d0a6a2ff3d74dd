//! API middleware components

pub mod auth;
pub mod logging;
pub mod principal;

pub use auth::{
    authentication_middleware, authorization_middleware, extract_api_key, extract_bearer_token,
    RequestAuthenticationChain, API_KEY_HEADER,
};
pub use logging::logging_middleware;
pub use principal::CurrentPrincipal;
