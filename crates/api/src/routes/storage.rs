//! Storage asset metadata routes (admin only).
//!
//! Files live in the external media store; these rows only describe them.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use toronto_db::{
    StorageAssetRepository,
    repositories::{CreateStorageAssetInput, UpdateStorageAssetInput},
};
use validator::Validate;

use crate::{
    AppState,
    error::ApiResult,
    extract::{ListParams, ValidatedJson, double_option},
    response::{item_json, list_json},
};

/// Admin storage routes (mounted under `/admin`).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/storage/assets", get(list_assets).post(create_asset))
        .route(
            "/storage/assets/{id}",
            get(get_asset).patch(update_asset).delete(delete_asset),
        )
}

/// Request body for `POST /admin/storage/assets`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssetRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Bucket in the media store.
    #[validate(length(min = 1, max = 100))]
    pub bucket: String,
    /// Object path within the bucket.
    #[validate(length(min = 1, max = 500))]
    pub path: String,
    /// Logical folder in the media picker.
    #[validate(length(max = 255))]
    pub folder: Option<String>,
    /// MIME type.
    #[validate(length(min = 1, max = 127))]
    pub mime: String,
    /// Size in bytes.
    #[validate(range(min = 0))]
    pub size: i64,
    /// Public URL.
    #[validate(url)]
    pub url: Option<String>,
    /// Pixel width for images.
    #[validate(range(min = 0))]
    pub width: Option<i32>,
    /// Pixel height for images.
    #[validate(range(min = 0))]
    pub height: Option<i32>,
    /// Provider-specific metadata.
    pub metadata: Option<Value>,
}

/// Request body for `PATCH /admin/storage/assets/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAssetRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// Logical folder.
    #[serde(default, deserialize_with = "double_option")]
    pub folder: Option<Option<String>>,
    /// Public URL.
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    /// Provider-specific metadata.
    #[serde(default, deserialize_with = "double_option")]
    pub metadata: Option<Option<Value>>,
}

/// GET /admin/storage/assets
async fn list_assets(
    State(state): State<AppState>,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = StorageAssetRepository::new(state.db.clone());
    let assets = repo.list(&query).await?;
    list_json(&assets, query.select.as_deref())
}

/// GET /admin/storage/assets/{id}
async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = StorageAssetRepository::new(state.db.clone());
    item_json(&repo.find_by_id(&id).await?)
}

/// POST /admin/storage/assets
async fn create_asset(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAssetRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let repo = StorageAssetRepository::new(state.db.clone());
    let asset = repo
        .create(CreateStorageAssetInput {
            name: payload.name,
            bucket: payload.bucket,
            path: payload.path.trim_start_matches('/').to_string(),
            folder: payload.folder,
            mime: payload.mime,
            size: payload.size,
            url: payload.url,
            width: payload.width,
            height: payload.height,
            metadata: payload.metadata,
        })
        .await?;
    Ok((StatusCode::CREATED, item_json(&asset)?))
}

/// PATCH /admin/storage/assets/{id}
async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateAssetRequest>,
) -> ApiResult<Json<Value>> {
    let repo = StorageAssetRepository::new(state.db.clone());
    let asset = repo
        .update(
            &id,
            UpdateStorageAssetInput {
                name: payload.name,
                folder: payload.folder,
                url: payload.url,
                metadata: payload.metadata,
            },
        )
        .await?;
    item_json(&asset)
}

/// DELETE /admin/storage/assets/{id}
async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = StorageAssetRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
