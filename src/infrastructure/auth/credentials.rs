//! Team secret login

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::jwt::TokenService;
use super::password::SecretHasher;
use crate::domain::auth::{Principal, RoleSet};
use crate::domain::team::TeamRepository;
use crate::domain::DomainError;

/// Result of a successful login
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub token: String,
    /// Canonical tag as stored, whatever case was supplied
    pub team_tag: String,
    pub roles: RoleSet,
    pub expires_at: DateTime<Utc>,
}

/// Validates team tag and secret logins and issues tokens
#[derive(Debug)]
pub struct CredentialAuthenticator<R: TeamRepository> {
    teams: Arc<R>,
    hasher: Arc<dyn SecretHasher>,
    tokens: Arc<dyn TokenService>,
}

impl<R: TeamRepository> CredentialAuthenticator<R> {
    pub fn new(teams: Arc<R>, hasher: Arc<dyn SecretHasher>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            teams,
            hasher,
            tokens,
        }
    }

    pub async fn login(&self, team_tag: &str, secret: &str) -> Result<LoginOutcome, DomainError> {
        let team_tag = team_tag.trim();
        if team_tag.is_empty() || secret.is_empty() {
            return Err(DomainError::validation("Team and secret are required"));
        }

        let team = self
            .teams
            .find_by_tag(team_tag)
            .await?
            .ok_or_else(|| DomainError::team_not_found(team_tag))?;

        if !self.hasher.verify(secret, team.secret_hash()) {
            warn!(team = %team.tag(), "Login rejected: invalid credentials");
            return Err(DomainError::InvalidCredentials);
        }

        let principal = Principal::new(team.tag(), Some(team.id().value()), team.roles());
        let issued = self.tokens.issue(&principal)?;

        info!(team = %team.tag(), "Team logged in");

        Ok(LoginOutcome {
            token: issued.token,
            team_tag: team.tag().to_string(),
            roles: team.roles(),
            expires_at: issued.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::Role;
    use crate::domain::team::{MockTeamRepository, Team, TeamDraft, TeamId};
    use crate::infrastructure::auth::{Argon2Hasher, JwtConfig, JwtTokenService};

    fn token_service() -> Arc<JwtTokenService> {
        Arc::new(
            JwtTokenService::new(JwtConfig::new(
                "telemetry-gateway",
                "telemetry-clients",
                "0123456789abcdef0123456789abcdef",
                120,
            ))
            .unwrap(),
        )
    }

    fn ia_team(hasher: &Argon2Hasher) -> Team {
        Team::from_draft(
            TeamId::new(2),
            TeamDraft::new("IA", hasher.hash("ia-secret").unwrap()).with_role(Role::Ia),
        )
    }

    fn authenticator(repo: MockTeamRepository) -> CredentialAuthenticator<MockTeamRepository> {
        CredentialAuthenticator::new(Arc::new(repo), Arc::new(Argon2Hasher::new()), token_service())
    }

    #[tokio::test]
    async fn test_login_success() {
        let team = ia_team(&Argon2Hasher::new());
        let mut repo = MockTeamRepository::new();
        repo.expect_find_by_tag()
            .withf(|tag| tag == "ia")
            .returning(move |_| Ok(Some(team.clone())));

        let tokens = token_service();
        let outcome = authenticator(repo).login("ia", "ia-secret").await.unwrap();

        assert_eq!(outcome.team_tag, "IA");
        assert!(outcome.roles.contains(Role::Ia));

        let principal = tokens.verify(&outcome.token).unwrap();
        assert_eq!(principal.team_tag(), "IA");
        assert_eq!(principal.team_id(), Some(2));
        assert!(principal.has_role(Role::Ia));
    }

    #[tokio::test]
    async fn test_login_wrong_secret() {
        let team = ia_team(&Argon2Hasher::new());
        let mut repo = MockTeamRepository::new();
        repo.expect_find_by_tag()
            .returning(move |_| Ok(Some(team.clone())));

        let result = authenticator(repo).login("IA", "wrong").await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_team() {
        let mut repo = MockTeamRepository::new();
        repo.expect_find_by_tag().returning(|_| Ok(None));

        let result = authenticator(repo).login("NOPE", "whatever").await;
        assert!(matches!(result, Err(DomainError::TeamNotFound { .. })));
    }

    #[tokio::test]
    async fn test_login_blank_input() {
        let mut repo = MockTeamRepository::new();
        repo.expect_find_by_tag().never();

        let auth = authenticator(repo);
        assert!(matches!(
            auth.login("  ", "secret").await,
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            auth.login("IA", "").await,
            Err(DomainError::Validation { .. })
        ));
    }
}
