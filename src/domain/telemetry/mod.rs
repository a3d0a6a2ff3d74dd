//! Telemetry domain module

mod entity;
mod store;

pub use entity::{NewTelemetryRecord, TelemetryRecord, TelemetrySignal};
pub use store::TelemetryStore;

#[cfg(test)]
pub use store::MockTelemetryStore;
