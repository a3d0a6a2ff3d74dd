//! Team data scoping

use super::principal::Principal;

/// Decides which team's data a request may read or write
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamScopeResolver;

impl TeamScopeResolver {
    /// Admins may target any team by passing a non-blank tag. Everyone else is
    /// silently pinned to their own team, whatever they asked for.
    pub fn resolve<'a>(principal: &'a Principal, requested: Option<&'a str>) -> &'a str {
        match requested.map(str::trim) {
            Some(tag) if principal.is_admin() && !tag.is_empty() => tag,
            _ => principal.team_tag(),
        }
    }
}
