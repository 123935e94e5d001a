//! Request extractors shared by the route modules.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use toronto_core::query::ListQuery;
use toronto_shared::AppError;
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// JSON body that passed `validator` rules.
///
/// Malformed JSON is rejected with 400 `invalid_body`; rule violations with
/// 422 `validation_error` and per-field details.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(AppError::InvalidBody(rejection.body_text())))?;
        value.validate().map_err(validation_error)?;
        Ok(Self(value))
    }
}

/// Like [`ValidatedJson`], but yields `None` when the request carries no JSON
/// content type. A JSON body that fails to parse is still a 400.
#[derive(Debug, Clone)]
pub struct OptionalValidatedJson<T>(pub Option<T>);

impl<S, T> FromRequest<S> for OptionalValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.trim_start().starts_with("application/json"));
        if !is_json {
            return Ok(Self(None));
        }
        let ValidatedJson(value) = ValidatedJson::<T>::from_request(req, state).await?;
        Ok(Self(Some(value)))
    }
}

/// Converts `validator` errors into a 422.
pub fn validation_error(errors: ValidationErrors) -> ApiError {
    ApiError(AppError::Validation {
        message: "Request validation failed".to_string(),
        details: serde_json::to_value(&errors).ok(),
    })
}

/// Parsed list query (`?col=op.value&order=...&limit=...`). Never rejects.
#[derive(Debug, Clone, Default)]
pub struct ListParams(pub ListQuery);

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        let query = ListQuery::parse(pairs);
        if !query.ignored.is_empty() {
            tracing::debug!(ignored = ?query.ignored, path = %parts.uri.path(), "Ignoring unrecognized filters");
        }
        Ok(Self(query))
    }
}

/// Distinguishes an absent field from an explicit `null` in PATCH bodies.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
