//! Authentication and authorization domain
//!
//! Roles, the per-request principal, the route access policy and the team
//! scoping rule. Everything here is pure and immutable after construction.

mod policy;
mod principal;
mod role;
mod scope;

pub use policy::{Access, AccessDecision, AccessPolicy, AccessRule, PathPattern};
pub use principal::{ApiKeyIdentity, Principal};
pub use role::{Role, RoleSet, UnknownRole};
pub use scope::TeamScopeResolver;
