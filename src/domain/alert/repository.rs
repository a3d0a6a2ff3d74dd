//! Alert repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Alert, AlertQuery, NewAlert};
use crate::domain::page::Page;
use crate::domain::DomainError;

/// Repository for managing alerts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Store a new alert, assigning its ID
    async fn create(&self, alert: NewAlert) -> Result<Alert, DomainError>;

    /// Get an alert by ID
    async fn get(&self, id: i64) -> Result<Option<Alert>, DomainError>;

    /// Replace a stored alert
    async fn update(&self, alert: Alert) -> Result<Alert, DomainError>;

    /// List alerts matching the query, newest first
    async fn list(&self, query: &AlertQuery) -> Result<Page<Alert>, DomainError>;

    /// Count alerts matching the query, ignoring its page
    async fn count(&self, query: &AlertQuery) -> Result<usize, DomainError>;
}
