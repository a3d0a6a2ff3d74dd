//! Static API key table

use std::collections::HashMap;

use tracing::debug;

use crate::config::ApiKeyEntry;
use crate::domain::auth::{ApiKeyIdentity, RoleSet};
use crate::domain::DomainError;

/// Immutable mapping of API key to team identity.
///
/// Built once at startup and shared by reference; lookups never lock.
#[derive(Clone, Default)]
pub struct ApiKeyRegistry {
    keys: HashMap<String, ApiKeyIdentity>,
}

impl std::fmt::Debug for ApiKeyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyRegistry")
            .field("keys", &self.keys.len())
            .finish()
    }
}

impl ApiKeyRegistry {
    /// Build the registry from configured entries
    pub fn from_entries(entries: &[ApiKeyEntry]) -> Result<Self, DomainError> {
        let mut keys = HashMap::with_capacity(entries.len());

        for entry in entries {
            if entry.key.is_empty() {
                return Err(DomainError::configuration("API key cannot be blank"));
            }

            let roles = RoleSet::parse(&entry.roles)
                .map_err(|e| DomainError::configuration(e.to_string()))?;
            let identity = ApiKeyIdentity::new(entry.team_tag.clone(), entry.team_id, roles);

            if keys.insert(entry.key.clone(), identity).is_some() {
                return Err(DomainError::configuration(format!(
                    "Duplicate API key for team {}",
                    entry.team_tag
                )));
            }
        }

        debug!(count = keys.len(), "API key registry initialized");

        Ok(Self { keys })
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, key: &str) -> Option<&ApiKeyIdentity> {
        self.keys.get(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// First characters of a key, safe to log
pub fn key_prefix(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{}***", prefix)
}
