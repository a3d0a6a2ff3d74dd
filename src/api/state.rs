//! Application state for shared services

use std::sync::Arc;

use crate::domain::alert::{Alert, AlertQuery, AlertRepository};
use crate::domain::auth::{AccessPolicy, Principal};
use crate::domain::page::{Page, PageRequest};
use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::telemetry::{TelemetryRecord, TelemetrySignal, TelemetryStore};
use crate::domain::DomainError;
use crate::infrastructure::alert::{AlertService, CreateAlertRequest};
use crate::infrastructure::auth::{ApiKeyRegistry, CredentialAuthenticator, LoginOutcome, TokenService};
use crate::infrastructure::team::{CreateTeamRequest, TeamService, UpdateTeamRequest};
use crate::infrastructure::telemetry::{IngestRequest, TelemetryService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub api_keys: Arc<ApiKeyRegistry>,
    pub tokens: Arc<dyn TokenService>,
    pub policy: Arc<AccessPolicy>,
    pub login_service: Arc<dyn LoginServiceTrait>,
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub alert_service: Arc<dyn AlertServiceTrait>,
    pub telemetry_service: Arc<dyn TelemetryServiceTrait>,
}

/// Trait for team secret login
#[async_trait::async_trait]
pub trait LoginServiceTrait: Send + Sync {
    async fn login(&self, team_tag: &str, secret: &str) -> Result<LoginOutcome, DomainError>;
}

/// Trait for team administration
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError>;
    async fn get(&self, id: TeamId) -> Result<Team, DomainError>;
    async fn list(&self) -> Result<Vec<Team>, DomainError>;
    async fn update(&self, id: TeamId, request: UpdateTeamRequest) -> Result<Team, DomainError>;
    async fn delete(&self, id: TeamId) -> Result<(), DomainError>;
    async fn add_role(&self, id: TeamId, role_name: &str) -> Result<Team, DomainError>;
    async fn remove_role(&self, id: TeamId, role_name: &str) -> Result<Team, DomainError>;
}

/// Trait for alert operations
#[async_trait::async_trait]
pub trait AlertServiceTrait: Send + Sync {
    async fn create(&self, request: CreateAlertRequest) -> Result<Alert, DomainError>;
    async fn list(&self, query: &AlertQuery) -> Result<Page<Alert>, DomainError>;
    async fn count(&self, query: &AlertQuery) -> Result<usize, DomainError>;
    async fn resolve(&self, id: i64, principal: &Principal) -> Result<Alert, DomainError>;
}

/// Trait for telemetry ingest and export
#[async_trait::async_trait]
pub trait TelemetryServiceTrait: Send + Sync {
    async fn ingest(&self, request: IngestRequest) -> Result<TelemetryRecord, DomainError>;
    async fn export(
        &self,
        signal: TelemetrySignal,
        team_tag: &str,
        page: PageRequest,
    ) -> Result<Page<TelemetryRecord>, DomainError>;
}

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> LoginServiceTrait for CredentialAuthenticator<R> {
    async fn login(&self, team_tag: &str, secret: &str) -> Result<LoginOutcome, DomainError> {
        CredentialAuthenticator::login(self, team_tag, secret).await
    }
}

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> TeamServiceTrait for TeamService<R> {
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        TeamService::create(self, request).await
    }

    async fn get(&self, id: TeamId) -> Result<Team, DomainError> {
        TeamService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        TeamService::list(self).await
    }

    async fn update(&self, id: TeamId, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        TeamService::update(self, id, request).await
    }

    async fn delete(&self, id: TeamId) -> Result<(), DomainError> {
        TeamService::delete(self, id).await
    }

    async fn add_role(&self, id: TeamId, role_name: &str) -> Result<Team, DomainError> {
        TeamService::add_role(self, id, role_name).await
    }

    async fn remove_role(&self, id: TeamId, role_name: &str) -> Result<Team, DomainError> {
        TeamService::remove_role(self, id, role_name).await
    }
}

#[async_trait::async_trait]
impl<A, T> AlertServiceTrait for AlertService<A, T>
where
    A: AlertRepository + 'static,
    T: TeamRepository + 'static,
{
    async fn create(&self, request: CreateAlertRequest) -> Result<Alert, DomainError> {
        AlertService::create(self, request).await
    }

    async fn list(&self, query: &AlertQuery) -> Result<Page<Alert>, DomainError> {
        AlertService::list(self, query).await
    }

    async fn count(&self, query: &AlertQuery) -> Result<usize, DomainError> {
        AlertService::count(self, query).await
    }

    async fn resolve(&self, id: i64, principal: &Principal) -> Result<Alert, DomainError> {
        AlertService::resolve(self, id, principal).await
    }
}

#[async_trait::async_trait]
impl<S: TelemetryStore + 'static> TelemetryServiceTrait for TelemetryService<S> {
    async fn ingest(&self, request: IngestRequest) -> Result<TelemetryRecord, DomainError> {
        TelemetryService::ingest(self, request).await
    }

    async fn export(
        &self,
        signal: TelemetrySignal,
        team_tag: &str,
        page: PageRequest,
    ) -> Result<Page<TelemetryRecord>, DomainError> {
        TelemetryService::export(self, signal, team_tag, page).await
    }
}
