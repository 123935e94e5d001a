//! Service routes: public localized reads and admin CRUD.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use toronto_db::{
    ServiceRepository,
    entities::{services, services_i18n},
    repositories::{
        CreateServiceInput, LocalizedService, ServiceTranslationInput, ServiceWithTranslations,
        UpdateServiceInput,
    },
};
use validator::Validate;

use super::helpers::{check_slug, default_true, slug_or_derive, supported_locale};
use crate::{
    AppState,
    error::ApiResult,
    extract::{ListParams, ValidatedJson, double_option},
    middleware::Locale,
    response::{item_json, list_json},
};

/// Public service routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/services/by-slug/{slug}", get(get_service_by_slug))
        .route("/services/{id}", get(get_service))
}

/// Admin service routes (mounted under `/admin`).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(admin_list_services).post(create_service))
        .route(
            "/services/{id}",
            get(admin_get_service)
                .patch(update_service)
                .delete(delete_service),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// One locale's copy in an admin payload.
#[derive(Debug, Deserialize, Validate)]
pub struct ServiceTranslationRequest {
    /// Locale code.
    #[validate(length(min = 2, max = 10))]
    pub locale: String,
    /// Display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Short summary.
    #[validate(length(max = 1000))]
    pub summary: Option<String>,
    /// Rich-text body.
    pub content: Option<String>,
}

impl ServiceTranslationRequest {
    fn into_input(self, state: &AppState) -> ApiResult<ServiceTranslationInput> {
        Ok(ServiceTranslationInput {
            locale: supported_locale(state, &self.locale)?,
            name: self.name,
            summary: self.summary,
            content: self.content,
        })
    }
}

/// Request body for `POST /admin/services`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    /// URL slug; derived from the first name when omitted.
    pub slug: Option<String>,
    /// Icon name or URL.
    #[validate(length(max = 255))]
    pub icon: Option<String>,
    /// Image URL.
    #[validate(length(max = 1000))]
    pub image_url: Option<String>,
    /// Featured on the home page.
    #[serde(default)]
    pub is_featured: bool,
    /// Publicly visible.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Sort position.
    #[serde(default)]
    pub display_order: i32,
    /// Per-locale copy, at least one.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<ServiceTranslationRequest>,
}

/// Request body for `PATCH /admin/services/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    /// URL slug.
    pub slug: Option<String>,
    /// Icon name or URL.
    #[serde(default, deserialize_with = "double_option")]
    pub icon: Option<Option<String>>,
    /// Image URL.
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    /// Featured on the home page.
    pub is_featured: Option<bool>,
    /// Publicly visible.
    pub is_active: Option<bool>,
    /// Sort position.
    pub display_order: Option<i32>,
    /// Translations to upsert by locale.
    #[serde(default)]
    #[validate(nested)]
    pub translations: Vec<ServiceTranslationRequest>,
}

/// A service rendered in the request locale.
#[derive(Debug, Serialize)]
pub struct ServiceView {
    /// Base row.
    #[serde(flatten)]
    pub service: services::Model,
    /// Locale of the picked copy, or the request locale when there is none.
    pub locale: String,
    /// Display name.
    pub name: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Rich-text body.
    pub content: Option<String>,
}

impl ServiceView {
    fn new(localized: LocalizedService, request_locale: &str) -> Self {
        let LocalizedService {
            item: service,
            translation,
        } = localized;
        match translation {
            Some(t) => Self {
                service,
                locale: t.locale,
                name: Some(t.name),
                summary: t.summary,
                content: t.content,
            },
            None => Self {
                service,
                locale: request_locale.to_string(),
                name: None,
                summary: None,
                content: None,
            },
        }
    }
}

/// A service with every translation, for the admin console.
#[derive(Debug, Serialize)]
pub struct AdminServiceView {
    /// Base row.
    #[serde(flatten)]
    pub service: services::Model,
    /// All locales' copy.
    pub translations: Vec<services_i18n::Model>,
}

impl From<ServiceWithTranslations> for AdminServiceView {
    fn from(s: ServiceWithTranslations) -> Self {
        Self {
            service: s.service,
            translations: s.translations,
        }
    }
}

// ============================================================================
// Public handlers
// ============================================================================

/// GET /services - Active services in the request locale.
async fn list_services(
    State(state): State<AppState>,
    locale: Locale,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = ServiceRepository::new(state.db.clone());
    let views = views(
        repo.list_localized(&query, locale.chain(), true).await?,
        locale.code(),
    );
    list_json(&views, query.select.as_deref())
}

/// GET /services/{id}
async fn get_service(
    State(state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = ServiceRepository::new(state.db.clone());
    let service = repo.find_localized(&id, locale.chain(), true).await?;
    item_json(&ServiceView::new(service, locale.code()))
}

/// GET /services/by-slug/{slug}
async fn get_service_by_slug(
    State(state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = ServiceRepository::new(state.db.clone());
    let service = repo.find_by_slug_localized(&slug, locale.chain()).await?;
    item_json(&ServiceView::new(service, locale.code()))
}

// ============================================================================
// Admin handlers
// ============================================================================

/// GET /admin/services
async fn admin_list_services(
    State(state): State<AppState>,
    locale: Locale,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = ServiceRepository::new(state.db.clone());
    let views = views(
        repo.list_localized(&query, locale.chain(), false).await?,
        locale.code(),
    );
    list_json(&views, query.select.as_deref())
}

/// GET /admin/services/{id}
async fn admin_get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = ServiceRepository::new(state.db.clone());
    item_json(&AdminServiceView::from(repo.get_with_translations(&id).await?))
}

/// POST /admin/services
async fn create_service(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateServiceRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let slug = slug_or_derive(
        payload.slug,
        payload.translations.first().map(|t| t.name.as_str()),
    )?;
    let translations = payload
        .translations
        .into_iter()
        .map(|t| t.into_input(&state))
        .collect::<ApiResult<Vec<_>>>()?;

    let repo = ServiceRepository::new(state.db.clone());
    let created = repo
        .create(CreateServiceInput {
            slug,
            icon: payload.icon,
            image_url: payload.image_url,
            is_featured: payload.is_featured,
            is_active: payload.is_active,
            display_order: payload.display_order,
            translations,
        })
        .await?;

    Ok((StatusCode::CREATED, item_json(&AdminServiceView::from(created))?))
}

/// PATCH /admin/services/{id}
async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateServiceRequest>,
) -> ApiResult<Json<Value>> {
    if let Some(slug) = &payload.slug {
        check_slug(slug)?;
    }
    let translations = payload
        .translations
        .into_iter()
        .map(|t| t.into_input(&state))
        .collect::<ApiResult<Vec<_>>>()?;

    let repo = ServiceRepository::new(state.db.clone());
    let updated = repo
        .update(
            &id,
            UpdateServiceInput {
                slug: payload.slug,
                icon: payload.icon,
                image_url: payload.image_url,
                is_featured: payload.is_featured,
                is_active: payload.is_active,
                display_order: payload.display_order,
                translations,
            },
        )
        .await?;

    item_json(&AdminServiceView::from(updated))
}

/// DELETE /admin/services/{id}
async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = ServiceRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn views(items: Vec<LocalizedService>, request_locale: &str) -> Vec<ServiceView> {
    items
        .into_iter()
        .map(|s| ServiceView::new(s, request_locale))
        .collect()
}
