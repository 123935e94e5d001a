//! Contact form submission and the admin inbox.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::Value;
use toronto_db::{
    ContactRepository,
    repositories::{CreateContactInput, UpdateContactInput, contact::STATUSES},
};
use validator::Validate;

use super::helpers::field_error;
use crate::{
    AppState,
    error::ApiResult,
    extract::{ListParams, ValidatedJson, double_option},
    middleware::{ClientIp, Locale},
    response::{item_json, list_json},
};

/// `POST /contacts`; the caller applies the rate limit.
pub fn submit_routes() -> Router<AppState> {
    Router::new().route("/contacts", post(submit_contact))
}

/// Admin inbox routes (mounted under `/admin`).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(list_contacts))
        .route(
            "/contacts/{id}",
            get(get_contact).patch(update_contact).delete(delete_contact),
        )
}

/// Request body for `POST /contacts`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    /// Sender name.
    #[validate(length(min = 2, max = 255))]
    pub name: String,
    /// Reply address.
    #[validate(email)]
    pub email: String,
    /// Phone number.
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    /// Subject line.
    #[validate(length(max = 255))]
    pub subject: Option<String>,
    /// Message body.
    #[validate(length(min = 10, max = 5000))]
    pub message: String,
}

/// Request body for `PATCH /admin/contacts/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContactRequest {
    /// Workflow status.
    pub status: Option<String>,
    /// Resolved flag.
    pub is_resolved: Option<bool>,
    /// Internal note.
    #[serde(default, deserialize_with = "double_option")]
    pub admin_note: Option<Option<String>>,
}

/// POST /contacts - Store a message from the public form.
async fn submit_contact(
    State(state): State<AppState>,
    locale: Locale,
    ClientIp(ip): ClientIp,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<ContactRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let repo = ContactRepository::new(state.db.clone());
    let message = repo
        .create(CreateContactInput {
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_lowercase(),
            phone: payload.phone,
            subject: payload.subject,
            message: payload.message,
            locale: Some(locale.code().to_string()),
            ip: Some(ip),
            user_agent: headers
                .get(USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(|ua| ua.chars().take(500).collect()),
        })
        .await?;

    Ok((StatusCode::CREATED, item_json(&message)?))
}

/// GET /admin/contacts
async fn list_contacts(
    State(state): State<AppState>,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = ContactRepository::new(state.db.clone());
    let items = repo.list(&query).await?;
    list_json(&items, query.select.as_deref())
}

/// GET /admin/contacts/{id}
async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = ContactRepository::new(state.db.clone());
    item_json(&repo.find_by_id(&id).await?)
}

/// PATCH /admin/contacts/{id}
async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateContactRequest>,
) -> ApiResult<Json<Value>> {
    if let Some(status) = payload.status.as_deref()
        && !STATUSES.contains(&status)
    {
        return Err(field_error(
            "status",
            "invalid_status",
            &format!("Status must be one of: {}", STATUSES.join(", ")),
        ));
    }

    let repo = ContactRepository::new(state.db.clone());
    let updated = repo
        .update(
            &id,
            UpdateContactInput {
                status: payload.status,
                is_resolved: payload.is_resolved,
                admin_note: payload.admin_note,
            },
        )
        .await?;
    item_json(&updated)
}

/// DELETE /admin/contacts/{id}
async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = ContactRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
