//! Infrastructure layer - Service and repository implementations

pub mod alert;
pub mod auth;
pub mod logging;
pub mod seed;
pub mod team;
pub mod telemetry;
