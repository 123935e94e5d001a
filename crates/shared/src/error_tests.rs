use rstest::rstest;

use crate::error::AppError;

#[rstest]
#[case(AppError::no_token(), 401, "no_token")]
#[case(AppError::admin_required(), 403, "admin_required")]
#[case(AppError::NotFound("project".into()), 404, "not_found")]
#[case(AppError::BadRequest("body".into()), 400, "bad_request")]
#[case(AppError::InvalidBody("expected value".into()), 400, "invalid_body")]
#[case(AppError::Validation { message: "slug".into(), details: None }, 422, "validation_error")]
#[case(AppError::Conflict("slug".into()), 409, "conflict")]
#[case(AppError::RateLimited, 429, "rate_limited")]
#[case(AppError::Database("down".into()), 500, "database_error")]
#[case(AppError::Internal("boom".into()), 500, "internal_error")]
fn status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
    assert_eq!(err.status_code(), status);
    assert_eq!(err.error_code(), code);
}

#[test]
fn unauthorized_carries_custom_code() {
    let err = AppError::Unauthorized {
        code: "token_expired",
        message: "Token has expired".into(),
    };
    assert_eq!(err.error_code(), "token_expired");
    assert_eq!(err.to_string(), "Authentication failed: Token has expired");
}

#[test]
fn only_server_failures_are_internal() {
    assert!(AppError::Database("x".into()).is_internal());
    assert!(AppError::Internal("x".into()).is_internal());
    assert!(!AppError::Conflict("x".into()).is_internal());
    assert!(!AppError::no_token().is_internal());
}

#[test]
fn validation_display() {
    assert_eq!(
        AppError::Validation {
            message: "title is required".into(),
            details: None,
        }
        .to_string(),
        "Validation error: title is required"
    );
}
