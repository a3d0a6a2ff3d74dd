//! In-memory telemetry store

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::page::{Page, PageRequest};
use crate::domain::telemetry::{
    NewTelemetryRecord, TelemetryRecord, TelemetrySignal, TelemetryStore,
};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct RecordLog {
    records: Vec<TelemetryRecord>,
    last_id: i64,
}

/// Append-only in-memory implementation of TelemetryStore
#[derive(Debug, Default)]
pub struct InMemoryTelemetryStore {
    log: Arc<RwLock<RecordLog>>,
}

impl InMemoryTelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TelemetryStore for InMemoryTelemetryStore {
    async fn store(&self, record: NewTelemetryRecord) -> Result<TelemetryRecord, DomainError> {
        let mut log = self.log.write().await;

        log.last_id += 1;
        let record = TelemetryRecord::from_new(log.last_id, record);
        log.records.push(record.clone());

        Ok(record)
    }

    async fn export(
        &self,
        signal: TelemetrySignal,
        team_tag: &str,
        page: PageRequest,
    ) -> Result<Page<TelemetryRecord>, DomainError> {
        let log = self.log.read().await;

        let mut matching: Vec<TelemetryRecord> = log
            .records
            .iter()
            .filter(|r| r.signal == signal && r.team_tag.eq_ignore_ascii_case(team_tag))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

        Ok(Page::paginate(matching, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(signal: TelemetrySignal, team: &str, minutes_ago: i64) -> NewTelemetryRecord {
        NewTelemetryRecord {
            signal,
            team_tag: team.to_string(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            payload_json: "{}".to_string(),
        }
    }

    #[tokio::test]
    async fn test_export_filters_and_orders() {
        let store = InMemoryTelemetryStore::new();
        store.store(record(TelemetrySignal::Metrics, "IA", 10)).await.unwrap();
        store.store(record(TelemetrySignal::Metrics, "IA", 1)).await.unwrap();
        store.store(record(TelemetrySignal::Metrics, "IOT", 0)).await.unwrap();
        store.store(record(TelemetrySignal::Logs, "IA", 0)).await.unwrap();

        let page = store
            .export(TelemetrySignal::Metrics, "IA", PageRequest::default())
            .await
            .unwrap();
        let ids: Vec<_> = page.content.iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![2, 1]);
        assert_eq!(page.total_elements, 2);
    }

    #[tokio::test]
    async fn test_export_pages() {
        let store = InMemoryTelemetryStore::new();
        for minutes in 0..5 {
            store
                .store(record(TelemetrySignal::Traces, "JAVA", minutes))
                .await
                .unwrap();
        }

        let page = store
            .export(TelemetrySignal::Traces, "JAVA", PageRequest::new(Some(1), Some(2)))
            .await
            .unwrap();

        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_pages, 3);
    }
}
