//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of token a set of claims was issued as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token accepted by protected routes.
    #[default]
    Access,
    /// Long-lived token only accepted by the refresh endpoint.
    Refresh,
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// User email.
    pub email: String,
    /// Primary role.
    pub role: String,
    /// Every role assigned to the user.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Convenience flag for admin checks.
    #[serde(default)]
    pub is_admin: bool,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// Token kind.
    #[serde(default)]
    pub typ: TokenType,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: &str,
        email: &str,
        role: &str,
        roles: &[String],
        typ: TokenType,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            roles: roles.to_vec(),
            is_admin: role == "admin" || roles.iter().any(|r| r == "admin"),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            typ,
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Returns true if the claims carry the given role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role || self.roles.iter().any(|r| r == role)
    }

    /// Returns true if the claims grant admin access.
    #[must_use]
    pub fn grants_admin(&self) -> bool {
        self.is_admin || self.has_role("admin")
    }
}

/// Token pair returned after successful authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived).
    pub access_token: String,
    /// Refresh token (long-lived).
    pub refresh_token: String,
    /// Always `bearer`.
    pub token_type: String,
    /// Access token expiration in seconds.
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new bearer token pair.
    #[must_use]
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}
