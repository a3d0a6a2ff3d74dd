//! Telemetry store trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{NewTelemetryRecord, TelemetryRecord, TelemetrySignal};
use crate::domain::page::{Page, PageRequest};
use crate::domain::DomainError;

/// Storage for pushed telemetry payloads
///
/// Callers pass an already scoped team tag; the store itself does no
/// authorization.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    async fn store(&self, record: NewTelemetryRecord) -> Result<TelemetryRecord, DomainError>;

    /// Records of one signal for one team, newest first
    async fn export(
        &self,
        signal: TelemetrySignal,
        team_tag: &str,
        page: PageRequest,
    ) -> Result<Page<TelemetryRecord>, DomainError>;
}
