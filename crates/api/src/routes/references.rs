//! Reference (client logo) routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use toronto_db::{
    ReferenceRepository,
    repositories::{CreateReferenceInput, UpdateReferenceInput},
};
use validator::Validate;

use super::helpers::default_true;
use crate::{
    AppState,
    error::ApiResult,
    extract::{ListParams, ValidatedJson, double_option},
    response::{item_json, list_json},
};

/// Public reference routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/references", get(list_references))
        .route("/references/{id}", get(get_reference))
}

/// Admin reference routes (mounted under `/admin`).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/references",
            get(admin_list_references).post(create_reference),
        )
        .route(
            "/references/{id}",
            get(admin_get_reference)
                .patch(update_reference)
                .delete(delete_reference),
        )
}

/// Request body for `POST /admin/references`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReferenceRequest {
    /// Client name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Logo URL.
    #[validate(length(max = 1000))]
    pub logo_url: Option<String>,
    /// Client website.
    #[validate(url)]
    pub website_url: Option<String>,
    /// Grouping label.
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// Publicly visible.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Sort position.
    #[serde(default)]
    pub display_order: i32,
}

/// Request body for `PATCH /admin/references/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReferenceRequest {
    /// Client name.
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// Logo URL.
    #[serde(default, deserialize_with = "double_option")]
    pub logo_url: Option<Option<String>>,
    /// Client website.
    #[serde(default, deserialize_with = "double_option")]
    pub website_url: Option<Option<String>>,
    /// Grouping label.
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    /// Publicly visible.
    pub is_active: Option<bool>,
    /// Sort position.
    pub display_order: Option<i32>,
}

/// GET /references
async fn list_references(
    State(state): State<AppState>,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = ReferenceRepository::new(state.db.clone());
    let items = repo.list(&query, true).await?;
    list_json(&items, query.select.as_deref())
}

/// GET /references/{id}
async fn get_reference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = ReferenceRepository::new(state.db.clone());
    item_json(&repo.find_by_id(&id, true).await?)
}

/// GET /admin/references
async fn admin_list_references(
    State(state): State<AppState>,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = ReferenceRepository::new(state.db.clone());
    let items = repo.list(&query, false).await?;
    list_json(&items, query.select.as_deref())
}

/// GET /admin/references/{id}
async fn admin_get_reference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = ReferenceRepository::new(state.db.clone());
    item_json(&repo.find_by_id(&id, false).await?)
}

/// POST /admin/references
async fn create_reference(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateReferenceRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let repo = ReferenceRepository::new(state.db.clone());
    let created = repo
        .create(CreateReferenceInput {
            name: payload.name,
            logo_url: payload.logo_url,
            website_url: payload.website_url,
            category: payload.category,
            is_active: payload.is_active,
            display_order: payload.display_order,
        })
        .await?;
    Ok((StatusCode::CREATED, item_json(&created)?))
}

/// PATCH /admin/references/{id}
async fn update_reference(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateReferenceRequest>,
) -> ApiResult<Json<Value>> {
    let repo = ReferenceRepository::new(state.db.clone());
    let updated = repo
        .update(
            &id,
            UpdateReferenceInput {
                name: payload.name,
                logo_url: payload.logo_url,
                website_url: payload.website_url,
                category: payload.category,
                is_active: payload.is_active,
                display_order: payload.display_order,
            },
        )
        .await?;
    item_json(&updated)
}

/// DELETE /admin/references/{id}
async fn delete_reference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = ReferenceRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
