//! Project routes: public localized reads and admin CRUD.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use toronto_db::{
    ProjectRepository,
    entities::{projects, projects_i18n},
    repositories::{
        CreateProjectInput, LocalizedProject, ProjectTranslationInput, ProjectWithTranslations,
        UpdateProjectInput,
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

/// Public project routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects/by-slug/{slug}", get(get_project_by_slug))
        .route("/projects/{id}", get(get_project))
}

/// Admin project routes (mounted under `/admin`).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(admin_list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(admin_get_project)
                .patch(update_project)
                .delete(delete_project),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// One locale's copy in an admin payload.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectTranslationRequest {
    /// Locale code.
    #[validate(length(min = 2, max = 10))]
    pub locale: String,
    /// Title.
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Short summary.
    #[validate(length(max = 1000))]
    pub summary: Option<String>,
    /// Rich-text body.
    pub content: Option<String>,
    /// SEO title.
    #[validate(length(max = 255))]
    pub meta_title: Option<String>,
    /// SEO description.
    #[validate(length(max = 500))]
    pub meta_description: Option<String>,
}

impl ProjectTranslationRequest {
    fn into_input(self, state: &AppState) -> ApiResult<ProjectTranslationInput> {
        Ok(ProjectTranslationInput {
            locale: supported_locale(state, &self.locale)?,
            title: self.title,
            summary: self.summary,
            content: self.content,
            meta_title: self.meta_title,
            meta_description: self.meta_description,
        })
    }
}

/// Request body for `POST /admin/projects`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// URL slug; derived from the first title when omitted.
    pub slug: Option<String>,
    /// Category label.
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// Client name.
    #[validate(length(max = 255))]
    pub client_name: Option<String>,
    /// Location.
    #[validate(length(max = 255))]
    pub location: Option<String>,
    /// Completion year.
    #[validate(range(min = 1900, max = 2200))]
    pub project_year: Option<i32>,
    /// Cover image URL.
    #[validate(length(max = 1000))]
    pub cover_image_url: Option<String>,
    /// Gallery image list.
    pub gallery: Option<Value>,
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
    pub translations: Vec<ProjectTranslationRequest>,
}

/// Request body for `PATCH /admin/projects/{id}`. Absent fields are kept.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    /// URL slug.
    pub slug: Option<String>,
    /// Category label.
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    /// Client name.
    #[serde(default, deserialize_with = "double_option")]
    pub client_name: Option<Option<String>>,
    /// Location.
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    /// Completion year.
    #[serde(default, deserialize_with = "double_option")]
    pub project_year: Option<Option<i32>>,
    /// Cover image URL.
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image_url: Option<Option<String>>,
    /// Gallery image list.
    #[serde(default, deserialize_with = "double_option")]
    pub gallery: Option<Option<Value>>,
    /// Featured on the home page.
    pub is_featured: Option<bool>,
    /// Publicly visible.
    pub is_active: Option<bool>,
    /// Sort position.
    pub display_order: Option<i32>,
    /// Translations to upsert by locale.
    #[serde(default)]
    #[validate(nested)]
    pub translations: Vec<ProjectTranslationRequest>,
}

/// A project rendered in the request locale.
#[derive(Debug, Serialize)]
pub struct ProjectView {
    /// Base row.
    #[serde(flatten)]
    pub project: projects::Model,
    /// Locale of the picked copy, or the request locale when there is none.
    pub locale: String,
    /// Title.
    pub title: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Rich-text body.
    pub content: Option<String>,
    /// SEO title.
    pub meta_title: Option<String>,
    /// SEO description.
    pub meta_description: Option<String>,
}

impl ProjectView {
    fn new(localized: LocalizedProject, request_locale: &str) -> Self {
        let LocalizedProject {
            item: project,
            translation,
        } = localized;
        match translation {
            Some(t) => Self {
                project,
                locale: t.locale,
                title: Some(t.title),
                summary: t.summary,
                content: t.content,
                meta_title: t.meta_title,
                meta_description: t.meta_description,
            },
            None => Self {
                project,
                locale: request_locale.to_string(),
                title: None,
                summary: None,
                content: None,
                meta_title: None,
                meta_description: None,
            },
        }
    }
}

/// A project with every translation, for the admin console.
#[derive(Debug, Serialize)]
pub struct AdminProjectView {
    /// Base row.
    #[serde(flatten)]
    pub project: projects::Model,
    /// All locales' copy.
    pub translations: Vec<projects_i18n::Model>,
}

impl From<ProjectWithTranslations> for AdminProjectView {
    fn from(p: ProjectWithTranslations) -> Self {
        Self {
            project: p.project,
            translations: p.translations,
        }
    }
}

// ============================================================================
// Public handlers
// ============================================================================

/// GET /projects - Active projects in the request locale.
async fn list_projects(
    State(state): State<AppState>,
    locale: Locale,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = ProjectRepository::new(state.db.clone());
    let views = views(
        repo.list_localized(&query, locale.chain(), true).await?,
        locale.code(),
    );
    list_json(&views, query.select.as_deref())
}

/// GET /projects/{id}
async fn get_project(
    State(state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = ProjectRepository::new(state.db.clone());
    let project = repo.find_localized(&id, locale.chain(), true).await?;
    item_json(&ProjectView::new(project, locale.code()))
}

/// GET /projects/by-slug/{slug}
async fn get_project_by_slug(
    State(state): State<AppState>,
    locale: Locale,
    Path(slug): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = ProjectRepository::new(state.db.clone());
    let project = repo.find_by_slug_localized(&slug, locale.chain()).await?;
    item_json(&ProjectView::new(project, locale.code()))
}

// ============================================================================
// Admin handlers
// ============================================================================

/// GET /admin/projects - Every project, active or not.
async fn admin_list_projects(
    State(state): State<AppState>,
    locale: Locale,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = ProjectRepository::new(state.db.clone());
    let views = views(
        repo.list_localized(&query, locale.chain(), false).await?,
        locale.code(),
    );
    list_json(&views, query.select.as_deref())
}

/// GET /admin/projects/{id}
async fn admin_get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = ProjectRepository::new(state.db.clone());
    item_json(&AdminProjectView::from(repo.get_with_translations(&id).await?))
}

/// POST /admin/projects
async fn create_project(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let slug = slug_or_derive(
        payload.slug,
        payload.translations.first().map(|t| t.title.as_str()),
    )?;
    let translations = payload
        .translations
        .into_iter()
        .map(|t| t.into_input(&state))
        .collect::<ApiResult<Vec<_>>>()?;

    let repo = ProjectRepository::new(state.db.clone());
    let created = repo
        .create(CreateProjectInput {
            slug,
            category: payload.category,
            client_name: payload.client_name,
            location: payload.location,
            project_year: payload.project_year,
            cover_image_url: payload.cover_image_url,
            gallery: payload.gallery,
            is_featured: payload.is_featured,
            is_active: payload.is_active,
            display_order: payload.display_order,
            translations,
        })
        .await?;

    Ok((StatusCode::CREATED, item_json(&AdminProjectView::from(created))?))
}

/// PATCH /admin/projects/{id}
async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateProjectRequest>,
) -> ApiResult<Json<Value>> {
    if let Some(slug) = &payload.slug {
        check_slug(slug)?;
    }
    let translations = payload
        .translations
        .into_iter()
        .map(|t| t.into_input(&state))
        .collect::<ApiResult<Vec<_>>>()?;

    let repo = ProjectRepository::new(state.db.clone());
    let updated = repo
        .update(
            &id,
            UpdateProjectInput {
                slug: payload.slug,
                category: payload.category,
                client_name: payload.client_name,
                location: payload.location,
                project_year: payload.project_year,
                cover_image_url: payload.cover_image_url,
                gallery: payload.gallery,
                is_featured: payload.is_featured,
                is_active: payload.is_active,
                display_order: payload.display_order,
                translations,
            },
        )
        .await?;

    item_json(&AdminProjectView::from(updated))
}

/// DELETE /admin/projects/{id}
async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = ProjectRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn views(items: Vec<LocalizedProject>, request_locale: &str) -> Vec<ProjectView> {
    items
        .into_iter()
        .map(|p| ProjectView::new(p, request_locale))
        .collect()
}
