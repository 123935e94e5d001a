//! The signed-in user's own profile.

use axum::{Json, Router, extract::State, routing::get};
use serde::Deserialize;
use serde_json::Value;
use toronto_db::{ProfileRepository, repositories::UpdateProfileInput};
use validator::Validate;

use crate::{
    AppState,
    error::ApiResult,
    extract::{ValidatedJson, double_option},
    middleware::AuthUser,
    response::item_json,
};

/// Profile routes (require auth middleware).
pub fn routes() -> Router<AppState> {
    Router::new().route("/profiles/me", get(get_profile).put(update_profile))
}

/// Request body for `PUT /profiles/me`. Absent fields are kept, `null` clears.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Display name.
    #[serde(default, deserialize_with = "double_option")]
    pub full_name: Option<Option<String>>,
    /// Phone number.
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    /// Avatar URL.
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
    /// Street address.
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    /// City.
    #[serde(default, deserialize_with = "double_option")]
    pub city: Option<Option<String>>,
    /// Country.
    #[serde(default, deserialize_with = "double_option")]
    pub country: Option<Option<String>>,
}

/// GET /profiles/me
async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Value>> {
    let repo = ProfileRepository::new(state.db.clone());
    item_json(&repo.get_or_create(auth.user_id()).await?)
}

/// PUT /profiles/me
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<Value>> {
    let repo = ProfileRepository::new(state.db.clone());
    let profile = repo
        .update(
            auth.user_id(),
            UpdateProfileInput {
                full_name: payload.full_name,
                phone: payload.phone,
                avatar_url: payload.avatar_url,
                address: payload.address,
                city: payload.city,
                country: payload.country,
            },
        )
        .await?;
    tracing::info!(user_id = %auth.user_id(), "Profile updated");
    item_json(&profile)
}
