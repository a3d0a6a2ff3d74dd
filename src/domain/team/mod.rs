//! Team domain module
//!
//! Teams are the tenants of the gateway: the unit of authentication and of
//! data ownership. Every telemetry record and alert belongs to a team tag.

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamDraft, TeamId};
pub use repository::{team_change, TeamChange, TeamRepository};
pub use validation::{
    validate_team_description, validate_team_emails, validate_team_secret, validate_team_tag,
    TeamValidationError,
};

#[cfg(test)]
pub use repository::MockTeamRepository;
