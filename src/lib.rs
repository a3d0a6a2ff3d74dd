//! Telemetry Gateway
//!
//! Team-scoped telemetry and alert collection behind:
//! - Static API keys and HS256 team tokens
//! - Team secret login with Argon2-hashed secrets
//! - A first-match, deny-by-default route access policy
//! - Admin-only cross-team visibility

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::auth::AccessPolicy;
use infrastructure::{
    alert::{AlertService, InMemoryAlertRepository},
    auth::{
        ApiKeyRegistry, Argon2Hasher, CredentialAuthenticator, JwtConfig, JwtTokenService,
        SecretHasher, TokenService,
    },
    seed::seed_teams,
    team::{InMemoryTeamRepository, TeamService},
    telemetry::{InMemoryTelemetryStore, TelemetryService},
};
use tracing::info;

/// Alert service over the in-memory repositories
pub type GatewayAlertService = AlertService<InMemoryAlertRepository, InMemoryTeamRepository>;

/// Assembled gateway: the HTTP state plus the services background tasks share with it
pub struct Gateway {
    pub state: AppState,
    pub alerts: Arc<GatewayAlertService>,
}

/// Create the application state with all services initialized.
///
/// Fails when the configuration is unusable; the server must not start then.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    Ok(build_gateway(config).await?.state)
}

/// Build every service from configuration
pub async fn build_gateway(config: &AppConfig) -> anyhow::Result<Gateway> {
    config.validate()?;

    let api_keys = Arc::new(ApiKeyRegistry::from_entries(&config.api_keys)?);
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig::new(
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        config.auth.secret.clone(),
        config.auth.expiration_minutes,
    ))?);
    let hasher: Arc<dyn SecretHasher> = Arc::new(Argon2Hasher::new());

    let team_repository = Arc::new(InMemoryTeamRepository::new());
    seed_teams(team_repository.as_ref(), hasher.as_ref(), &config.seed).await?;

    let alerts = Arc::new(AlertService::new(
        Arc::new(InMemoryAlertRepository::new()),
        team_repository.clone(),
    ));
    let telemetry_store = Arc::new(InMemoryTelemetryStore::new());

    info!(
        api_keys = api_keys.len(),
        token_ttl_minutes = config.auth.expiration_minutes,
        "Application state initialized"
    );

    let state = AppState {
        api_keys,
        tokens: tokens.clone(),
        policy: Arc::new(AccessPolicy::standard()),
        login_service: Arc::new(CredentialAuthenticator::new(
            team_repository.clone(),
            hasher.clone(),
            tokens,
        )),
        team_service: Arc::new(TeamService::new(team_repository.clone(), hasher)),
        alert_service: alerts.clone(),
        telemetry_service: Arc::new(TelemetryService::new(telemetry_store)),
    };

    Ok(Gateway { state, alerts })
}
