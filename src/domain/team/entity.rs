//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::auth::{Role, RoleSet};

/// Team identifier assigned by the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(i64);

impl TeamId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields of a team that does not exist yet
#[derive(Debug, Clone, PartialEq)]
pub struct TeamDraft {
    pub tag: String,
    pub secret_hash: String,
    pub description: Option<String>,
    pub emails: Vec<String>,
    pub roles: RoleSet,
}

impl TeamDraft {
    pub fn new(tag: impl Into<String>, secret_hash: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            secret_hash: secret_hash.into(),
            description: None,
            emails: Vec::new(),
            roles: RoleSet::empty(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_emails(mut self, emails: Vec<String>) -> Self {
        self.emails = emails;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }
}

/// Team entity
///
/// A tenant of the gateway. The tag is unique ignoring case and the secret is
/// only ever held as a one-way hash.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    id: TeamId,
    tag: String,
    secret_hash: String,
    description: Option<String>,
    emails: Vec<String>,
    roles: RoleSet,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Materialise a draft under a repository-assigned id
    pub fn from_draft(id: TeamId, draft: TeamDraft) -> Self {
        let now = Utc::now();

        Self {
            id,
            tag: draft.tag,
            secret_hash: draft.secret_hash,
            description: draft.description,
            emails: draft.emails,
            roles: draft.roles,
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn secret_hash(&self) -> &str {
        &self.secret_hash
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    pub fn roles(&self) -> RoleSet {
        self.roles
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Case-insensitive tag comparison
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    // Mutators

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    pub fn set_emails(&mut self, emails: Vec<String>) {
        self.emails = emails;
        self.touch();
    }

    pub fn set_secret_hash(&mut self, secret_hash: impl Into<String>) {
        self.secret_hash = secret_hash.into();
        self.touch();
    }

    /// Assign a role, returning false if the team already holds it
    pub fn add_role(&mut self, role: Role) -> bool {
        let added = self.roles.insert(role);
        if added {
            self.touch();
        }
        added
    }

    /// Revoke a role, returning false if the team did not hold it
    pub fn remove_role(&mut self, role: Role) -> bool {
        let removed = self.roles.remove(role);
        if removed {
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
