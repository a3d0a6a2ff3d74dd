//! Domain layer - Core business logic and entities

pub mod alert;
pub mod auth;
pub mod error;
pub mod page;
pub mod team;
pub mod telemetry;

pub use alert::{Alert, AlertQuery, AlertRepository, AlertType, NewAlert};
pub use auth::{
    Access, AccessDecision, AccessPolicy, AccessRule, ApiKeyIdentity, PathPattern, Principal,
    Role, RoleSet, TeamScopeResolver, UnknownRole,
};
pub use error::DomainError;
pub use page::{Page, PageRequest};
pub use team::{Team, TeamDraft, TeamId, TeamRepository};
pub use telemetry::{NewTelemetryRecord, TelemetryRecord, TelemetrySignal, TelemetryStore};
