//! Role assignment routes (admin only).

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use serde::Deserialize;
use serde_json::Value;
use toronto_core::auth::UserRole;
use toronto_db::UserRoleRepository;
use validator::Validate;

use super::helpers::field_error;
use crate::{
    AppState,
    error::ApiResult,
    extract::{ListParams, ValidatedJson},
    response::{item_json, list_json},
};

/// Admin role routes (mounted under `/admin`).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/user_roles", get(list_roles).post(grant_role))
        .route("/user_roles/{id}", delete(revoke_role))
}

/// Request body for `POST /admin/user_roles`.
#[derive(Debug, Deserialize, Validate)]
pub struct GrantRoleRequest {
    /// User to grant the role to.
    #[validate(length(equal = 36))]
    pub user_id: String,
    /// `admin`, `moderator` or `user`.
    pub role: String,
}

/// GET /admin/user_roles
async fn list_roles(
    State(state): State<AppState>,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = UserRoleRepository::new(state.db.clone());
    let roles = repo.list(&query).await?;
    list_json(&roles, query.select.as_deref())
}

/// POST /admin/user_roles
async fn grant_role(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GrantRoleRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let role = UserRole::parse(&payload.role).ok_or_else(|| {
        field_error("role", "invalid_role", "Role must be one of: admin, moderator, user")
    })?;

    let repo = UserRoleRepository::new(state.db.clone());
    let assignment = repo.create(&payload.user_id, role).await?;
    Ok((StatusCode::CREATED, item_json(&assignment)?))
}

/// DELETE /admin/user_roles/{id}
async fn revoke_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = UserRoleRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
