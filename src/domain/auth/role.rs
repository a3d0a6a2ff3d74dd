//! Role and role-set types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a role name does not match a known authority
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Capability granted to a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_IA")]
    Ia,
    #[serde(rename = "ROLE_IOT")]
    Iot,
    #[serde(rename = "ROLE_JAVA")]
    Java,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 4] = [Role::Admin, Role::Ia, Role::Iot, Role::Java];

    /// Authority name as carried in tokens and configuration
    pub fn authority(&self) -> &'static str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::Ia => "ROLE_IA",
            Self::Iot => "ROLE_IOT",
            Self::Java => "ROLE_JAVA",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Admin => 1 << 0,
            Self::Ia => 1 << 1,
            Self::Iot => 1 << 2,
            Self::Java => 1 << 3,
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.authority() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.authority())
    }
}

/// Fixed-size set of roles, one bit per variant
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn of(roles: &[Role]) -> Self {
        roles.iter().copied().collect()
    }

    /// Parse a list of authority names, rejecting unknown ones
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, UnknownRole> {
        names
            .iter()
            .map(|name| name.as_ref().parse::<Role>())
            .collect()
    }

    pub fn with(mut self, role: Role) -> Self {
        self.insert(role);
        self
    }

    /// Insert a role, returning false if it was already present
    pub fn insert(&mut self, role: Role) -> bool {
        let present = self.contains(role);
        self.0 |= role.bit();
        !present
    }

    /// Remove a role, returning false if it was not present
    pub fn remove(&mut self, role: Role) -> bool {
        let present = self.contains(role);
        self.0 &= !role.bit();
        present
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// True if at least one role is shared with `other`
    pub fn intersects(&self, other: &RoleSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.contains(*role))
    }

    pub fn authorities(&self) -> Vec<String> {
        self.iter().map(|role| role.authority().to_string()).collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for RoleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let roles = Vec::<Role>::deserialize(deserializer)?;
        Ok(roles.into_iter().collect())
    }
}
