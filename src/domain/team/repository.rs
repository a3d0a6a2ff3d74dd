//! Team repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Team, TeamDraft, TeamId};
use crate::domain::DomainError;

/// An edit applied to a stored team; an error leaves the team untouched
pub type TeamChange = Box<dyn FnOnce(&mut Team) -> Result<(), DomainError> + Send>;

/// Box an edit for [`TeamRepository::modify`]
pub fn team_change<F>(change: F) -> TeamChange
where
    F: FnOnce(&mut Team) -> Result<(), DomainError> + Send + 'static,
{
    Box::new(change)
}

/// Repository for managing teams
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by ID
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// Find a team by tag, ignoring case
    async fn find_by_tag(&self, tag: &str) -> Result<Option<Team>, DomainError>;

    /// Create a team, assigning its ID; fails on a duplicate tag
    async fn create(&self, draft: TeamDraft) -> Result<Team, DomainError>;

    /// Update an existing team
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// Apply `change` to the team atomically.
    /// Returns `None` when no team has this ID.
    async fn modify(&self, id: TeamId, change: TeamChange) -> Result<Option<Team>, DomainError>;

    /// Delete a team by ID
    async fn delete(&self, id: TeamId) -> Result<bool, DomainError>;

    /// List all teams ordered by ID
    async fn list(&self) -> Result<Vec<Team>, DomainError>;
}
