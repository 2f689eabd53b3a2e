use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role identifier issued by the HR backend (e.g. `"HR"`).
///
/// Roles stay opaque strings; only the four landing roles below have meaning
/// on the client, and only for picking where a user lands after login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("ADMIN"));
    pub const STORE: Role = Role(Cow::Borrowed("STORE"));
    pub const HR: Role = Role(Cow::Borrowed("HR"));
    pub const USER: Role = Role(Cow::Borrowed("USER"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered set of roles held by an account.
///
/// Persisted and transmitted as a comma-joined string (`"HR,USER"`). Parsing
/// trims each name, drops empty segments and duplicates, and keeps the order
/// in which roles were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a comma-joined role list.
    pub fn parse(joined: &str) -> Self {
        joined.split(',').map(str::to_owned).collect()
    }

    pub fn insert(&mut self, role: Role) -> bool {
        if role.as_str().is_empty() || self.contains(&role) {
            return false;
        }
        self.0.push(role);
        true
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.0.iter().any(|r| r == role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }

    /// Comma-joined form used for storage.
    pub fn to_joined(&self) -> String {
        self.0
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl FromIterator<String> for RoleSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        iter.into_iter()
            .map(|name| Role::new(name.trim().to_owned()))
            .collect()
    }
}

impl FromStr for RoleSet {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl core::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_joined())
    }
}

impl Serialize for RoleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_joined())
    }
}

/// The login endpoint has been seen returning roles both as `"HR,USER"` and
/// as `["HR", "USER"]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRoles {
    Joined(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawRoles::deserialize(deserializer)? {
            RawRoles::Joined(joined) => RoleSet::parse(&joined),
            RawRoles::List(list) => list.into_iter().collect(),
        })
    }
}
