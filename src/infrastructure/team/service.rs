//! Team service for team administration

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::auth::Role;
use crate::domain::team::{
    team_change, validate_team_description, validate_team_emails, validate_team_secret,
    validate_team_tag, Team, TeamDraft, TeamId, TeamRepository,
};
use crate::domain::DomainError;
use crate::infrastructure::auth::SecretHasher;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub tag: String,
    pub secret: String,
    pub description: Option<String>,
    pub emails: Vec<String>,
}

/// Request for updating a team; absent fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamRequest {
    pub description: Option<String>,
    pub emails: Option<Vec<String>>,
    pub secret: Option<String>,
}

/// Team service for managing teams and their roles
#[derive(Debug)]
pub struct TeamService<R: TeamRepository> {
    repository: Arc<R>,
    hasher: Arc<dyn SecretHasher>,
}

impl<R: TeamRepository> TeamService<R> {
    pub fn new(repository: Arc<R>, hasher: Arc<dyn SecretHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Create a new team with no roles
    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(tag = %request.tag, "Creating team");

        let tag = request.tag.trim();
        validate_team_tag(tag).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_team_secret(&request.secret)
            .map_err(|e| DomainError::validation(e.to_string()))?;
        if let Some(description) = &request.description {
            validate_team_description(description)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        validate_team_emails(&request.emails)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.find_by_tag(tag).await?.is_some() {
            return Err(DomainError::conflict(format!("Team '{}' already exists", tag)));
        }

        let mut draft = TeamDraft::new(tag, self.hasher.hash(&request.secret)?)
            .with_emails(request.emails);
        draft.description = request.description;

        self.repository.create(draft).await
    }

    pub async fn get(&self, id: TeamId) -> Result<Team, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        self.repository.list().await
    }

    pub async fn update(&self, id: TeamId, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        info!(id = %id, "Updating team");

        if let Some(description) = &request.description {
            validate_team_description(description)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(emails) = &request.emails {
            validate_team_emails(emails).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        // hash before taking the repository lock
        let secret_hash = match &request.secret {
            Some(secret) => {
                validate_team_secret(secret).map_err(|e| DomainError::validation(e.to_string()))?;
                Some(self.hasher.hash(secret)?)
            }
            None => None,
        };

        let team = self
            .modify(id, move |team| {
                if let Some(description) = request.description {
                    team.set_description(Some(description));
                }
                if let Some(emails) = request.emails {
                    team.set_emails(emails);
                }
                if let Some(hash) = secret_hash {
                    team.set_secret_hash(hash);
                }
                Ok(())
            })
            .await?;

        if request.secret.is_some() {
            debug!(id = %id, "Team secret rotated");
        }

        Ok(team)
    }

    pub async fn delete(&self, id: TeamId) -> Result<(), DomainError> {
        info!(id = %id, "Deleting team");

        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(format!("Team '{}' not found", id)));
        }

        Ok(())
    }

    /// Assign a role by authority name
    pub async fn add_role(&self, id: TeamId, role_name: &str) -> Result<Team, DomainError> {
        let role = parse_role(role_name)?;

        let team = self
            .modify(id, move |team| {
                if team.add_role(role) {
                    Ok(())
                } else {
                    Err(DomainError::conflict(format!(
                        "Team '{}' already has role {}",
                        team.tag(),
                        role
                    )))
                }
            })
            .await?;

        info!(team = %team.tag(), role = %role, "Role assigned");
        Ok(team)
    }

    /// Revoke a role by authority name
    pub async fn remove_role(&self, id: TeamId, role_name: &str) -> Result<Team, DomainError> {
        let role = parse_role(role_name)?;

        let team = self
            .modify(id, move |team| {
                if team.remove_role(role) {
                    Ok(())
                } else {
                    Err(DomainError::not_found(format!(
                        "Team '{}' does not have role {}",
                        team.tag(),
                        role
                    )))
                }
            })
            .await?;

        info!(team = %team.tag(), role = %role, "Role revoked");
        Ok(team)
    }

    /// Edit a stored team in one repository step
    async fn modify<F>(&self, id: TeamId, change: F) -> Result<Team, DomainError>
    where
        F: FnOnce(&mut Team) -> Result<(), DomainError> + Send + 'static,
    {
        self.repository
            .modify(id, team_change(change))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))
    }
}

fn parse_role(name: &str) -> Result<Role, DomainError> {
    name.trim()
        .parse::<Role>()
        .map_err(|e| DomainError::validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::auth::Argon2Hasher;
    use crate::infrastructure::team::InMemoryTeamRepository;

    fn create_service() -> TeamService<InMemoryTeamRepository> {
        TeamService::new(
            Arc::new(InMemoryTeamRepository::new()),
            Arc::new(Argon2Hasher::new()),
        )
    }

    fn create_request(tag: &str) -> CreateTeamRequest {
        CreateTeamRequest {
            tag: tag.to_string(),
            secret: "java-secret".to_string(),
            description: Some("JVM services".to_string()),
            emails: vec!["java@example.com".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_hashes_secret() {
        let service = create_service();

        let team = service.create(create_request("JAVA")).await.unwrap();

        assert_eq!(team.tag(), "JAVA");
        assert!(team.roles().is_empty());
        assert_ne!(team.secret_hash(), "java-secret");
        assert!(Argon2Hasher::new().verify("java-secret", team.secret_hash()));
    }

    #[tokio::test]
    async fn test_create_validation() {
        let service = create_service();

        let mut request = create_request("JAVA");
        request.secret = "short".to_string();
        assert!(matches!(
            service.create(request).await,
            Err(DomainError::Validation { .. })
        ));

        let mut request = create_request("JAVA");
        request.emails = vec!["nope".to_string()];
        assert!(service.create(request).await.is_err());

        assert!(service.create(create_request("bad tag")).await.is_err());
    }

    #[tokio::test]
    async fn test_create_duplicate_ignores_case() {
        let service = create_service();
        service.create(create_request("JAVA")).await.unwrap();

        let result = service.create(create_request("java")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_team() {
        let service = create_service();
        let team = service.create(create_request("JAVA")).await.unwrap();

        let updated = service
            .update(
                team.id(),
                UpdateTeamRequest {
                    description: Some("Backend".to_string()),
                    secret: Some("rotated-secret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description(), Some("Backend"));
        assert_eq!(updated.emails(), team.emails());
        assert!(Argon2Hasher::new().verify("rotated-secret", updated.secret_hash()));
    }

    #[tokio::test]
    async fn test_missing_team() {
        let service = create_service();

        assert!(matches!(
            service.get(TeamId::new(42)).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete(TeamId::new(42)).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_role_assignment() {
        let service = create_service();
        let team = service.create(create_request("JAVA")).await.unwrap();

        let team = service.add_role(team.id(), "ROLE_JAVA").await.unwrap();
        assert!(team.roles().contains(Role::Java));

        assert!(matches!(
            service.add_role(team.id(), "ROLE_JAVA").await,
            Err(DomainError::Conflict { .. })
        ));
        assert!(matches!(
            service.add_role(team.id(), "ROLE_SUPER").await,
            Err(DomainError::Validation { .. })
        ));

        let team = service.remove_role(team.id(), "ROLE_JAVA").await.unwrap();
        assert!(team.roles().is_empty());

        assert!(matches!(
            service.remove_role(team.id(), "ROLE_JAVA").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_role_and_secret_edits_are_all_kept() {
        let service = Arc::new(create_service());
        let id = service.create(create_request("JAVA")).await.unwrap().id();

        let mut handles = Vec::new();
        for role in ["ROLE_JAVA", "ROLE_IOT", "ROLE_IA"] {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.add_role(id, role).await.map(|_| ())
            }));
        }
        let rotate = service.clone();
        handles.push(tokio::spawn(async move {
            rotate
                .update(
                    id,
                    UpdateTeamRequest {
                        secret: Some("rotated-secret".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .map(|_| ())
        }));

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let team = service.get(id).await.unwrap();
        assert!(team.roles().contains(Role::Java));
        assert!(team.roles().contains(Role::Iot));
        assert!(team.roles().contains(Role::Ia));
        assert!(Argon2Hasher::new().verify("rotated-secret", team.secret_hash()));
    }

    #[tokio::test]
    async fn test_edits_of_missing_team() {
        let service = create_service();
        let missing = TeamId::new(42);

        assert!(matches!(
            service.add_role(missing, "ROLE_IA").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.update(missing, UpdateTeamRequest::default()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_team() {
        let service = create_service();
        let team = service.create(create_request("JAVA")).await.unwrap();

        service.delete(team.id()).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }
}
