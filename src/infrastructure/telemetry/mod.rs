//! Telemetry infrastructure implementations

mod service;
mod store;

pub use service::{IngestRequest, TelemetryService};
pub use store::InMemoryTelemetryStore;
