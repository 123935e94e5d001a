//! HTTP error responses.
//!
//! Every failure leaves the API as
//! `{ "error": { "code": ..., "message": ..., "details": ... } }`.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use toronto_core::auth::PasswordError;
use toronto_db::RepositoryError;
use toronto_shared::{AppError, JwtError};

static EXPOSE_INTERNAL_DETAILS: AtomicBool = AtomicBool::new(false);

/// Controls whether 500 responses carry `details.cause`. Off in production.
pub fn expose_internal_details(enabled: bool) {
    EXPOSE_INTERNAL_DETAILS.store(enabled, Ordering::Relaxed);
}

/// Handler error wrapping [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        Self(err.into())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        let app = match err {
            JwtError::Expired => AppError::Unauthorized {
                code: "token_expired",
                message: "Token has expired".to_string(),
            },
            JwtError::EncodingError(e) => AppError::Internal(e),
            JwtError::DecodingError(_) | JwtError::Invalid => AppError::Unauthorized {
                code: "invalid_token",
                message: "Invalid or malformed token".to_string(),
            },
        };
        Self(app)
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = err.error_code();

        let (message, details) = if err.is_internal() {
            tracing::error!(error = %err, "Request failed");
            let details = EXPOSE_INTERNAL_DETAILS
                .load(Ordering::Relaxed)
                .then(|| json!({ "cause": err.to_string() }));
            ("Internal server error".to_string(), details)
        } else {
            match err {
                AppError::Validation { message, details } => (message, details),
                AppError::Unauthorized { message, .. }
                | AppError::Forbidden { message, .. }
                | AppError::NotFound(message)
                | AppError::BadRequest(message)
                | AppError::InvalidBody(message)
                | AppError::Conflict(message) => (message, None),
                other => (other.to_string(), None),
            }
        };

        let mut body = json!({ "code": code, "message": message });
        if let (Some(details), Value::Object(map)) = (details, &mut body) {
            map.insert("details".to_string(), details);
        }
        (status, Json(json!({ "error": body }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn envelope_carries_code_and_message() {
        let (status, body) = body_of(AppError::no_token().into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "no_token");
        assert_eq!(body["error"]["message"], "Authentication token is required");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn validation_details_are_passed_through() {
        let err = AppError::Validation {
            message: "Invalid payload".into(),
            details: Some(json!({ "slug": ["invalid_slug"] })),
        };
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["details"]["slug"][0], "invalid_slug");
    }

    #[tokio::test]
    async fn unique_violation_from_repository_is_conflict() {
        let err: ApiError = RepositoryError::Conflict("Project slug 'a' already exists".into()).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "conflict");
    }

    #[tokio::test]
    async fn internal_errors_hide_their_message() {
        let (status, body) = body_of(AppError::Database("connection refused".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "database_error");
        assert_eq!(body["error"]["message"], "Internal server error");
    }

    #[test]
    fn expired_jwt_maps_to_token_expired() {
        let ApiError(err) = JwtError::Expired.into();
        assert_eq!(err.error_code(), "token_expired");
        let ApiError(err) = JwtError::Invalid.into();
        assert_eq!(err.error_code(), "invalid_token");
    }
}
