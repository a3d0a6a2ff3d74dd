//! Alert service

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::alert::{Alert, AlertQuery, AlertRepository, AlertType, NewAlert};
use crate::domain::auth::Principal;
use crate::domain::page::Page;
use crate::domain::team::TeamRepository;
use crate::domain::DomainError;

/// Request for raising an alert; the team tag is already scoped
#[derive(Debug, Clone)]
pub struct CreateAlertRequest {
    pub team_tag: String,
    pub alert_type: AlertType,
    pub message: String,
}

const MAX_MESSAGE_LENGTH: usize = 1024;

/// Alert service
#[derive(Debug)]
pub struct AlertService<A: AlertRepository, T: TeamRepository> {
    alerts: Arc<A>,
    teams: Arc<T>,
}

impl<A: AlertRepository, T: TeamRepository> AlertService<A, T> {
    pub fn new(alerts: Arc<A>, teams: Arc<T>) -> Self {
        Self { alerts, teams }
    }

    pub async fn create(&self, request: CreateAlertRequest) -> Result<Alert, DomainError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(DomainError::validation("Alert message cannot be empty"));
        }

        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(DomainError::validation(format!(
                "Alert message cannot exceed {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        let alert = self
            .alerts
            .create(NewAlert {
                team_tag: request.team_tag,
                alert_type: request.alert_type,
                message: message.to_string(),
            })
            .await?;

        info!(id = alert.id, team = %alert.team_tag, alert_type = %alert.alert_type, "Alert raised");
        self.notify(&alert).await?;

        Ok(alert)
    }

    pub async fn list(&self, query: &AlertQuery) -> Result<Page<Alert>, DomainError> {
        self.alerts.list(query).await
    }

    pub async fn count(&self, query: &AlertQuery) -> Result<usize, DomainError> {
        self.alerts.count(query).await
    }

    /// Mark an alert resolved. Alerts of other teams are invisible to non-admins.
    pub async fn resolve(&self, id: i64, principal: &Principal) -> Result<Alert, DomainError> {
        let mut alert = self
            .alerts
            .get(id)
            .await?
            .filter(|alert| principal.is_admin() || alert.belongs_to(principal.team_tag()))
            .ok_or_else(|| DomainError::not_found("Alert not found"))?;

        alert.resolved = true;
        let alert = self.alerts.update(alert).await?;

        info!(id = alert.id, team = %alert.team_tag, "Alert resolved");
        Ok(alert)
    }

    /// Announce an alert to the owning team's contacts. Delivery is log-only.
    async fn notify(&self, alert: &Alert) -> Result<(), DomainError> {
        let Some(team) = self.teams.find_by_tag(&alert.team_tag).await? else {
            debug!(team = %alert.team_tag, "No team registered for alert, skipping notification");
            return Ok(());
        };

        if team.emails().is_empty() {
            debug!(team = %team.tag(), "Team has no contact emails, skipping notification");
            return Ok(());
        }

        info!(
            id = alert.id,
            recipients = %team.emails().join(","),
            subject = %format!("Alert {}", alert.alert_type),
            "Alert notification"
        );

        Ok(())
    }
}
