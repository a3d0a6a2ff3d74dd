//! Development team seeding

use tracing::{debug, info};

use crate::config::SeedConfig;
use crate::domain::auth::Role;
use crate::domain::team::{TeamDraft, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::SecretHasher;

/// Ensure the ADMIN, IA and IOT teams exist with their roles.
///
/// Safe to run on every start: existing teams keep their secret and only
/// missing roles are added.
pub async fn seed_teams<R: TeamRepository + ?Sized>(
    teams: &R,
    hasher: &dyn SecretHasher,
    config: &SeedConfig,
) -> Result<(), DomainError> {
    if !config.enabled {
        debug!("Team seeding disabled");
        return Ok(());
    }

    let seeds = [
        ("ADMIN", config.admin_secret.as_str(), Role::Admin),
        ("IA", config.ia_secret.as_str(), Role::Ia),
        ("IOT", config.iot_secret.as_str(), Role::Iot),
    ];

    for (tag, secret, role) in seeds {
        match teams.find_by_tag(tag).await? {
            Some(mut team) => {
                if team.add_role(role) {
                    teams.update(team).await?;
                    info!(team = tag, role = %role, "Seeded missing role");
                }
            }
            None => {
                let draft = TeamDraft::new(tag, hasher.hash(secret)?)
                    .with_emails(vec![format!("{}@telemetry.local", tag.to_lowercase())])
                    .with_role(role);
                teams.create(draft).await?;
                info!(team = tag, role = %role, "Seeded team");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::TeamId;
    use crate::infrastructure::auth::Argon2Hasher;
    use crate::infrastructure::team::InMemoryTeamRepository;

    #[tokio::test]
    async fn test_seed_creates_teams() {
        let repo = InMemoryTeamRepository::new();
        let hasher = Argon2Hasher::new();

        seed_teams(&repo, &hasher, &SeedConfig::default()).await.unwrap();

        let admin = repo.get(TeamId::new(1)).await.unwrap().unwrap();
        assert_eq!(admin.tag(), "ADMIN");
        assert!(admin.roles().contains(Role::Admin));
        assert_eq!(admin.emails(), &["admin@telemetry.local".to_string()]);

        let ia = repo.find_by_tag("IA").await.unwrap().unwrap();
        assert!(hasher.verify("ia-secret", ia.secret_hash()));
        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = InMemoryTeamRepository::new();
        let hasher = Argon2Hasher::new();

        seed_teams(&repo, &hasher, &SeedConfig::default()).await.unwrap();
        seed_teams(&repo, &hasher, &SeedConfig::default()).await.unwrap();

        let teams = repo.list().await.unwrap();
        assert_eq!(teams.len(), 3);
        assert!(teams.iter().all(|t| t.roles().len() == 1));
    }

    #[tokio::test]
    async fn test_seed_restores_missing_role() {
        let repo = InMemoryTeamRepository::new();
        let hasher = Argon2Hasher::new();
        repo.create(TeamDraft::new("IOT", "existing-hash")).await.unwrap();

        seed_teams(&repo, &hasher, &SeedConfig::default()).await.unwrap();

        let iot = repo.find_by_tag("IOT").await.unwrap().unwrap();
        assert!(iot.roles().contains(Role::Iot));
        assert_eq!(iot.secret_hash(), "existing-hash");
    }

    #[tokio::test]
    async fn test_seed_disabled() {
        let repo = InMemoryTeamRepository::new();
        let config = SeedConfig {
            enabled: false,
            ..Default::default()
        };

        seed_teams(&repo, &Argon2Hasher::new(), &config).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }
}
