//! API layer - HTTP endpoints and middleware

pub mod admin;
pub mod alerts;
pub mod auth;
pub mod docs;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod telemetry;
pub mod types;

pub use router::create_router_with_state;
pub use state::AppState;
