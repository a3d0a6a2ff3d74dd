//! In-memory alert repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::alert::{Alert, AlertQuery, AlertRepository, NewAlert};
use crate::domain::page::Page;
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct AlertTable {
    alerts: BTreeMap<i64, Alert>,
    last_id: i64,
}

/// In-memory implementation of AlertRepository
#[derive(Debug, Default)]
pub struct InMemoryAlertRepository {
    table: Arc<RwLock<AlertTable>>,
}

impl InMemoryAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertRepository for InMemoryAlertRepository {
    async fn create(&self, alert: NewAlert) -> Result<Alert, DomainError> {
        let mut table = self.table.write().await;

        table.last_id += 1;
        let alert = Alert::from_new(table.last_id, alert);
        table.alerts.insert(alert.id, alert.clone());

        Ok(alert)
    }

    async fn get(&self, id: i64) -> Result<Option<Alert>, DomainError> {
        let table = self.table.read().await;
        Ok(table.alerts.get(&id).cloned())
    }

    async fn update(&self, alert: Alert) -> Result<Alert, DomainError> {
        let mut table = self.table.write().await;

        if !table.alerts.contains_key(&alert.id) {
            return Err(DomainError::not_found(format!("Alert {} not found", alert.id)));
        }

        table.alerts.insert(alert.id, alert.clone());
        Ok(alert)
    }

    async fn list(&self, query: &AlertQuery) -> Result<Page<Alert>, DomainError> {
        let table = self.table.read().await;

        // ids grow monotonically, so reverse id order is newest first
        let matching: Vec<Alert> = table
            .alerts
            .values()
            .rev()
            .filter(|alert| query.matches(alert))
            .cloned()
            .collect();

        Ok(Page::paginate(matching, query.page))
    }

    async fn count(&self, query: &AlertQuery) -> Result<usize, DomainError> {
        let table = self.table.read().await;
        Ok(table.alerts.values().filter(|alert| query.matches(alert)).count())
    }
}
