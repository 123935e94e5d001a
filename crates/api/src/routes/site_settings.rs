//! Site setting routes. Public reads are resolved for the request locale.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use toronto_db::{
    SiteSettingRepository,
    entities::site_settings::ANY_LOCALE,
    repositories::{CreateSiteSettingInput, UpdateSiteSettingInput},
};
use validator::Validate;

use super::helpers::{field_error, supported_locale};
use crate::{
    AppState,
    error::ApiResult,
    extract::{ListParams, ValidatedJson},
    middleware::Locale,
    response::{item_json, list_json},
};

/// Public site setting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/site_settings", get(list_settings))
        .route("/site_settings/{key}", get(get_setting))
}

/// Admin site setting routes (mounted under `/admin`).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/site_settings",
            get(admin_list_settings).post(create_setting),
        )
        .route(
            "/site_settings/{id}",
            get(admin_get_setting)
                .patch(update_setting)
                .delete(delete_setting),
        )
}

/// Request body for `POST /admin/site_settings`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSettingRequest {
    /// Setting key, e.g. `contact_info`.
    #[validate(length(min = 1, max = 100))]
    pub key: String,
    /// Locale code, or `*` for every locale (the default).
    pub locale: Option<String>,
    /// Arbitrary JSON value.
    pub value: Value,
}

/// Request body for `PATCH /admin/site_settings/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSettingRequest {
    /// Setting key.
    #[validate(length(min = 1, max = 100))]
    pub key: Option<String>,
    /// Locale code or `*`.
    pub locale: Option<String>,
    /// Arbitrary JSON value.
    pub value: Option<Value>,
}

/// GET /site_settings - One value per key for the request locale.
async fn list_settings(
    State(state): State<AppState>,
    locale: Locale,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = SiteSettingRepository::new(state.db.clone());
    let settings = repo.list_resolved(&query, locale.chain()).await?;
    list_json(&settings, query.select.as_deref())
}

/// GET /site_settings/{key}
async fn get_setting(
    State(state): State<AppState>,
    locale: Locale,
    Path(key): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = SiteSettingRepository::new(state.db.clone());
    item_json(&repo.get_resolved(&key, locale.chain()).await?)
}

/// GET /admin/site_settings - Raw rows for every locale.
async fn admin_list_settings(
    State(state): State<AppState>,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = SiteSettingRepository::new(state.db.clone());
    let settings = repo.list(&query).await?;
    list_json(&settings, query.select.as_deref())
}

/// GET /admin/site_settings/{id}
async fn admin_get_setting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = SiteSettingRepository::new(state.db.clone());
    item_json(&repo.find_by_id(&id).await?)
}

/// POST /admin/site_settings
async fn create_setting(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSettingRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let locale = match payload.locale.as_deref() {
        None => ANY_LOCALE.to_string(),
        Some(raw) => setting_locale(&state, raw)?,
    };

    let repo = SiteSettingRepository::new(state.db.clone());
    let created = repo
        .create(CreateSiteSettingInput {
            key: setting_key(&payload.key)?,
            locale,
            value: payload.value,
        })
        .await?;
    Ok((StatusCode::CREATED, item_json(&created)?))
}

/// PATCH /admin/site_settings/{id}
async fn update_setting(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateSettingRequest>,
) -> ApiResult<Json<Value>> {
    let locale = payload
        .locale
        .as_deref()
        .map(|raw| setting_locale(&state, raw))
        .transpose()?;

    let repo = SiteSettingRepository::new(state.db.clone());
    let updated = repo
        .update(
            &id,
            UpdateSiteSettingInput {
                key: payload.key.as_deref().map(setting_key).transpose()?,
                locale,
                value: payload.value,
            },
        )
        .await?;
    item_json(&updated)
}

/// DELETE /admin/site_settings/{id}
async fn delete_setting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = SiteSettingRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn setting_key(raw: &str) -> ApiResult<String> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(field_error("key", "blank_key", "Setting key must not be blank"));
    }
    Ok(key.to_string())
}

fn setting_locale(state: &AppState, raw: &str) -> ApiResult<String> {
    if raw.trim() == ANY_LOCALE {
        Ok(ANY_LOCALE.to_string())
    } else {
        supported_locale(state, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_trimmed() {
        assert_eq!(setting_key("  contact_info ").unwrap(), "contact_info");
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = setting_key("   ").unwrap_err();
        assert_eq!(err.0.error_code(), "validation_error");
    }
}
