//! In-memory team repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::team::{Team, TeamChange, TeamDraft, TeamId, TeamRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct TeamTable {
    teams: BTreeMap<TeamId, Team>,
    last_id: i64,
}

impl TeamTable {
    fn tag_taken(&self, tag: &str, except: Option<TeamId>) -> bool {
        self.teams
            .values()
            .any(|team| team.has_tag(tag) && Some(team.id()) != except)
    }
}

/// In-memory implementation of TeamRepository
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    table: Arc<RwLock<TeamTable>>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        let table = self.table.read().await;
        Ok(table.teams.get(&id).cloned())
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Option<Team>, DomainError> {
        let table = self.table.read().await;
        Ok(table.teams.values().find(|team| team.has_tag(tag)).cloned())
    }

    async fn create(&self, draft: TeamDraft) -> Result<Team, DomainError> {
        let mut table = self.table.write().await;

        if table.tag_taken(&draft.tag, None) {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                draft.tag
            )));
        }

        table.last_id += 1;
        let team = Team::from_draft(TeamId::new(table.last_id), draft);
        table.teams.insert(team.id(), team.clone());

        Ok(team)
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        let mut table = self.table.write().await;

        if !table.teams.contains_key(&team.id()) {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.id()
            )));
        }

        if table.tag_taken(team.tag(), Some(team.id())) {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.tag()
            )));
        }

        table.teams.insert(team.id(), team.clone());
        Ok(team)
    }

    async fn modify(&self, id: TeamId, change: TeamChange) -> Result<Option<Team>, DomainError> {
        let mut table = self.table.write().await;

        let Some(stored) = table.teams.get_mut(&id) else {
            return Ok(None);
        };

        let mut team = stored.clone();
        change(&mut team)?;
        *stored = team.clone();

        Ok(Some(team))
    }

    async fn delete(&self, id: TeamId) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.teams.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let table = self.table.read().await;
        Ok(table.teams.values().cloned().collect())
    }
}
