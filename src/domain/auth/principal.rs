//! Authenticated identity attached to a request

use super::role::{Role, RoleSet};

/// The identity resolved for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    team_id: Option<i64>,
    team_tag: String,
    email: String,
    roles: RoleSet,
}

impl Principal {
    /// Create a principal whose display string mirrors the team tag
    pub fn new(team_tag: impl Into<String>, team_id: Option<i64>, roles: RoleSet) -> Self {
        let team_tag = team_tag.into();

        Self {
            team_id,
            email: team_tag.clone(),
            team_tag,
            roles,
        }
    }

    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    pub fn team_tag(&self) -> &str {
        &self.team_tag
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn roles(&self) -> RoleSet {
        self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// Identity bound to a static API key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyIdentity {
    pub team_tag: String,
    pub team_id: i64,
    pub roles: RoleSet,
}

impl ApiKeyIdentity {
    pub fn new(team_tag: impl Into<String>, team_id: i64, roles: RoleSet) -> Self {
        Self {
            team_tag: team_tag.into(),
            team_id,
            roles,
        }
    }

    pub fn to_principal(&self) -> Principal {
        Principal::new(self.team_tag.clone(), Some(self.team_id), self.roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_defaults_to_team_tag() {
        let principal = Principal::new("IA", Some(2), RoleSet::of(&[Role::Ia]));
        assert_eq!(principal.email(), "IA");
        assert_eq!(principal.team_tag(), "IA");
        assert_eq!(principal.team_id(), Some(2));
    }

    #[test]
    fn test_is_admin() {
        let admin = Principal::new("ADMIN", Some(1), RoleSet::of(&[Role::Admin]));
        let ia = Principal::new("IA", Some(2), RoleSet::of(&[Role::Ia]));

        assert!(admin.is_admin());
        assert!(!ia.is_admin());
    }

    #[test]
    fn test_api_key_identity_to_principal() {
        let identity = ApiKeyIdentity::new("IOT", 3, RoleSet::of(&[Role::Iot]));
        let principal = identity.to_principal();

        assert_eq!(principal.team_tag(), "IOT");
        assert_eq!(principal.team_id(), Some(3));
        assert!(principal.has_role(Role::Iot));
    }
}
