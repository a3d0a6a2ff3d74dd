//! Shared HTTP types

pub mod error;
pub mod json;
pub mod params;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use params::{Path, Query};
