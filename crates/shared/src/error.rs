//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed. `code` is a fixed machine-readable reason.
    #[error("Authentication failed: {message}")]
    Unauthorized {
        /// Reason code, e.g. `no_token`.
        code: &'static str,
        /// Human-readable message.
        message: String,
    },

    /// Access denied.
    #[error("Access denied: {message}")]
    Forbidden {
        /// Reason code, e.g. `admin_required`.
        code: &'static str,
        /// Human-readable message.
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request could not be understood (malformed body, bad path).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body is not well-formed JSON for the endpoint.
    #[error("Invalid body: {0}")]
    InvalidBody(String),

    /// Payload failed schema validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Summary message.
        message: String,
        /// Per-field details.
        details: Option<serde_json::Value>,
    },

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Client exceeded its request budget.
    #[error("Too many requests")]
    RateLimited,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 401 with the `no_token` reason.
    #[must_use]
    pub fn no_token() -> Self {
        Self::Unauthorized {
            code: "no_token",
            message: "Authentication token is required".to_string(),
        }
    }

    /// 403 with the `admin_required` reason.
    #[must_use]
    pub fn admin_required() -> Self {
        Self::Forbidden {
            code: "admin_required",
            message: "Administrator role is required".to_string(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized { .. } => 401,
            Self::Forbidden { .. } => 403,
            Self::NotFound(_) => 404,
            Self::BadRequest(_) | Self::InvalidBody(_) => 400,
            Self::Validation { .. } => 422,
            Self::Conflict(_) => 409,
            Self::RateLimited => 429,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { code, .. } | Self::Forbidden { code, .. } => *code,
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::InvalidBody(_) => "invalid_body",
            Self::Validation { .. } => "validation_error",
            Self::Conflict(_) => "conflict",
            Self::RateLimited => "rate_limited",
            Self::Database(_) => "database_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Returns true for server-side failures whose message must not leak.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}
