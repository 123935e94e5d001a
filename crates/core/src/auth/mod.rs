//! Authentication and roles.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - User role definitions and primary-role selection

mod password;

pub use password::{PasswordError, hash_password, verify_dummy_password, verify_password};

use serde::{Deserialize, Serialize};

/// Site roles, highest privilege first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access to the admin console.
    Admin,
    /// Can moderate contact messages and content.
    Moderator,
    /// Regular signed-up user.
    User,
}

impl UserRole {
    /// Every role, highest privilege first.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Moderator, Self::User];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::User => "user",
        }
    }

    /// Parses a wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    /// Returns true if this role may use the admin console.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Picks the highest-privilege role from raw names, `user` when none match.
    pub fn primary<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        roles
            .into_iter()
            .filter_map(|r| Self::parse(r.as_ref()))
            .min()
            .unwrap_or(Self::User)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
