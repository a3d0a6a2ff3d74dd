//! Route access policy
//!
//! An ordered table of path patterns, evaluated first-match-wins. Paths that
//! match no rule are denied.

use crate::domain::DomainError;

use super::principal::Principal;
use super::role::{Role, RoleSet};

/// Path pattern in the `/exact` or `/prefix/**` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches one path exactly
    Exact(String),
    /// Matches the prefix itself and every path below it
    Subtree(String),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/**") {
            Some(prefix) => Self::Subtree(prefix.to_string()),
            None => Self::Exact(pattern.to_string()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Subtree(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(path) => write!(f, "{}", path),
            Self::Subtree(prefix) => write!(f, "{}/**", prefix),
        }
    }
}

/// What a rule requires from the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No credential needed
    Public,
    /// Any authenticated principal, even without roles
    Authenticated,
    /// At least one of the listed roles
    AnyRole(RoleSet),
}

impl Access {
    pub fn any_of(roles: &[Role]) -> Self {
        Self::AnyRole(RoleSet::of(roles))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pattern: PathPattern,
    access: Access,
}

impl AccessRule {
    pub fn new(pattern: &str, access: Access) -> Self {
        Self {
            pattern: PathPattern::parse(pattern),
            access,
        }
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn access(&self) -> &Access {
        &self.access
    }
}

/// Outcome of evaluating the policy for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Denied and the caller presented no usable credential
    Unauthenticated,
    /// Denied although the caller is authenticated
    Forbidden,
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    /// Build a policy from an ordered rule list; an empty table is rejected
    pub fn new(rules: Vec<AccessRule>) -> Result<Self, DomainError> {
        if rules.is_empty() {
            return Err(DomainError::configuration("Access policy has no rules"));
        }

        Ok(Self { rules })
    }

    /// The gateway's route table
    pub fn standard() -> Self {
        use Role::{Admin, Ia, Iot, Java};

        Self {
            rules: vec![
                AccessRule::new("/auth/login", Access::Public),
                AccessRule::new("/auth/token", Access::Public),
                AccessRule::new("/health", Access::Public),
                AccessRule::new("/live", Access::Public),
                AccessRule::new("/docs/**", Access::Public),
                AccessRule::new("/auth/me", Access::Authenticated),
                AccessRule::new("/otel/v1/**", Access::any_of(&[Ia, Iot, Java])),
                AccessRule::new("/export/**", Access::any_of(&[Ia, Iot, Java, Admin])),
                AccessRule::new("/admin/**", Access::any_of(&[Admin])),
                AccessRule::new("/alerts/**", Access::any_of(&[Ia, Admin])),
            ],
        }
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    /// First rule whose pattern matches the path
    pub fn rule_for(&self, path: &str) -> Option<&AccessRule> {
        if has_dot_segment(path) {
            return None;
        }

        self.rules.iter().find(|rule| rule.pattern.matches(path))
    }

    pub fn decide(&self, path: &str, principal: Option<&Principal>) -> AccessDecision {
        let allowed = match (self.rule_for(path).map(AccessRule::access), principal) {
            (Some(Access::Public), _) => true,
            (Some(Access::Authenticated), Some(_)) => true,
            (Some(Access::AnyRole(required)), Some(principal)) => {
                principal.roles().intersects(required)
            }
            _ => false,
        };

        match (allowed, principal) {
            (true, _) => AccessDecision::Allow,
            (false, None) => AccessDecision::Unauthenticated,
            (false, Some(_)) => AccessDecision::Forbidden,
        }
    }

    /// Evaluate the policy, mapping a denial to the matching error
    pub fn check(&self, path: &str, principal: Option<&Principal>) -> Result<(), DomainError> {
        match self.decide(path, principal) {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Unauthenticated => Err(DomainError::Unauthenticated),
            AccessDecision::Forbidden => Err(DomainError::forbidden(format!(
                "Insufficient role for {}",
                path
            ))),
        }
    }
}

fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == ".." || segment == ".")
}
