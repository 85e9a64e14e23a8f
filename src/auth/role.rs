//! Roles and the redirect map.
//!
//! DESIGN
//! ======
//! The role claim arrives as free text. It is parsed once into [`Role`] and
//! every screen goes through [`Destination::for_role`], so there is a single
//! table from role to landing area.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Authenticated subject's role, parsed from the token's role claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Client,
    Freelancer,
}

impl Role {
    /// Parse a role claim. `"normal"` is the legacy spelling of a client
    /// account. Matching is exact; unknown values yield `None`.
    #[must_use]
    pub fn from_claim(raw: &str) -> Option<Self> {
        match raw {
            "Admin" => Some(Self::Admin),
            "Client" | "normal" => Some(Self::Client),
            "Freelancer" => Some(Self::Freelancer),
            _ => None,
        }
    }
}

// =============================================================================
// ROLE SELECTOR
// =============================================================================

/// Account type chosen on the registration form. Sent as `0` or `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RoleSelector {
    #[default]
    Client = 0,
    Freelancer = 1,
}

impl RoleSelector {
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Client),
            1 => Some(Self::Freelancer),
            _ => None,
        }
    }
}

impl Serialize for RoleSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for RoleSelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code).ok_or_else(|| serde::de::Error::custom(format!("unknown role selector: {code}")))
    }
}

// =============================================================================
// DESTINATION
// =============================================================================

/// Landing area after a successful login. Navigation is a full-page redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Admin,
    User,
    Freelancer,
    Fallback,
}

impl Destination {
    /// The redirect map.
    #[must_use]
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Admin) => Self::Admin,
            Some(Role::Client) => Self::User,
            Some(Role::Freelancer) => Self::Freelancer,
            None => Self::Fallback,
        }
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Admin => "/admin/",
            Self::User => "/user/",
            Self::Freelancer => "/freelancer/",
            Self::Fallback => "/",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
#[path = "role_test.rs"]
mod tests;
