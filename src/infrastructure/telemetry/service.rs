//! Telemetry ingest and export

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::page::{Page, PageRequest};
use crate::domain::telemetry::{
    NewTelemetryRecord, TelemetryRecord, TelemetrySignal, TelemetryStore,
};
use crate::domain::DomainError;

/// Push request with an already scoped team tag
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub signal: TelemetrySignal,
    pub team_tag: String,
    pub timestamp: DateTime<Utc>,
    pub payload_json: String,
}

#[derive(Debug)]
pub struct TelemetryService<S: TelemetryStore> {
    store: Arc<S>,
}

impl<S: TelemetryStore> TelemetryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn ingest(&self, request: IngestRequest) -> Result<TelemetryRecord, DomainError> {
        if request.payload_json.trim().is_empty() {
            return Err(DomainError::validation("payloadJson cannot be empty"));
        }

        let record = self
            .store
            .store(NewTelemetryRecord {
                signal: request.signal,
                team_tag: request.team_tag,
                timestamp: request.timestamp,
                payload_json: request.payload_json,
            })
            .await?;

        debug!(id = record.id, signal = %record.signal, team = %record.team_tag, "Telemetry accepted");
        Ok(record)
    }

    pub async fn export(
        &self,
        signal: TelemetrySignal,
        team_tag: &str,
        page: PageRequest,
    ) -> Result<Page<TelemetryRecord>, DomainError> {
        self.store.export(signal, team_tag, page).await
    }
}
