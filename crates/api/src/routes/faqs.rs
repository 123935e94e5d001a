//! FAQ routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use toronto_db::{
    FaqRepository,
    entities::{faqs, faqs_i18n},
    repositories::{
        CreateFaqInput, FaqTranslationInput, FaqWithTranslations, LocalizedFaq, UpdateFaqInput,
    },
};
use validator::Validate;

use super::helpers::{default_true, supported_locale};
use crate::{
    AppState,
    error::ApiResult,
    extract::{ListParams, ValidatedJson, double_option},
    middleware::Locale,
    response::{item_json, list_json},
};

/// Public FAQ routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/faqs", get(list_faqs))
        .route("/faqs/{id}", get(get_faq))
}

/// Admin FAQ routes (mounted under `/admin`).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/faqs", get(admin_list_faqs).post(create_faq))
        .route(
            "/faqs/{id}",
            get(admin_get_faq).patch(update_faq).delete(delete_faq),
        )
}

/// One locale's question and answer.
#[derive(Debug, Deserialize, Validate)]
pub struct FaqTranslationRequest {
    /// Locale code.
    #[validate(length(min = 2, max = 10))]
    pub locale: String,
    /// Question.
    #[validate(length(min = 1, max = 500))]
    pub question: String,
    /// Answer.
    #[validate(length(min = 1))]
    pub answer: String,
}

impl FaqTranslationRequest {
    fn into_input(self, state: &AppState) -> ApiResult<FaqTranslationInput> {
        Ok(FaqTranslationInput {
            locale: supported_locale(state, &self.locale)?,
            question: self.question,
            answer: self.answer,
        })
    }
}

/// Request body for `POST /admin/faqs`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFaqRequest {
    /// Grouping label.
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// Publicly visible.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Sort position.
    #[serde(default)]
    pub display_order: i32,
    /// Per-locale copy, at least one.
    #[validate(length(min = 1), nested)]
    pub translations: Vec<FaqTranslationRequest>,
}

/// Request body for `PATCH /admin/faqs/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFaqRequest {
    /// Grouping label.
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    /// Publicly visible.
    pub is_active: Option<bool>,
    /// Sort position.
    pub display_order: Option<i32>,
    /// Translations to upsert by locale.
    #[serde(default)]
    #[validate(nested)]
    pub translations: Vec<FaqTranslationRequest>,
}

/// A FAQ entry rendered in the request locale.
#[derive(Debug, Serialize)]
pub struct FaqView {
    /// Base row.
    #[serde(flatten)]
    pub faq: faqs::Model,
    /// Locale of the picked copy, or the request locale when there is none.
    pub locale: String,
    /// Question.
    pub question: Option<String>,
    /// Answer.
    pub answer: Option<String>,
}

impl FaqView {
    fn new(localized: LocalizedFaq, request_locale: &str) -> Self {
        let LocalizedFaq { item, translation } = localized;
        match translation {
            Some(t) => Self {
                faq: item,
                locale: t.locale,
                question: Some(t.question),
                answer: Some(t.answer),
            },
            None => Self {
                faq: item,
                locale: request_locale.to_string(),
                question: None,
                answer: None,
            },
        }
    }
}

/// A FAQ entry with every translation.
#[derive(Debug, Serialize)]
pub struct AdminFaqView {
    /// Base row.
    #[serde(flatten)]
    pub faq: faqs::Model,
    /// All locales' copy.
    pub translations: Vec<faqs_i18n::Model>,
}

impl From<FaqWithTranslations> for AdminFaqView {
    fn from(f: FaqWithTranslations) -> Self {
        Self {
            faq: f.faq,
            translations: f.translations,
        }
    }
}

/// GET /faqs
async fn list_faqs(
    State(state): State<AppState>,
    locale: Locale,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = FaqRepository::new(state.db.clone());
    let views = views(
        repo.list_localized(&query, locale.chain(), true).await?,
        locale.code(),
    );
    list_json(&views, query.select.as_deref())
}

/// GET /faqs/{id}
async fn get_faq(
    State(state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = FaqRepository::new(state.db.clone());
    let faq = repo.find_localized(&id, locale.chain(), true).await?;
    item_json(&FaqView::new(faq, locale.code()))
}

/// GET /admin/faqs
async fn admin_list_faqs(
    State(state): State<AppState>,
    locale: Locale,
    ListParams(query): ListParams,
) -> ApiResult<Json<Value>> {
    let repo = FaqRepository::new(state.db.clone());
    let views = views(
        repo.list_localized(&query, locale.chain(), false).await?,
        locale.code(),
    );
    list_json(&views, query.select.as_deref())
}

/// GET /admin/faqs/{id}
async fn admin_get_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let repo = FaqRepository::new(state.db.clone());
    item_json(&AdminFaqView::from(repo.get_with_translations(&id).await?))
}

/// POST /admin/faqs
async fn create_faq(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateFaqRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let translations = payload
        .translations
        .into_iter()
        .map(|t| t.into_input(&state))
        .collect::<ApiResult<Vec<_>>>()?;

    let repo = FaqRepository::new(state.db.clone());
    let created = repo
        .create(CreateFaqInput {
            category: payload.category,
            is_active: payload.is_active,
            display_order: payload.display_order,
            translations,
        })
        .await?;

    Ok((StatusCode::CREATED, item_json(&AdminFaqView::from(created))?))
}

/// PATCH /admin/faqs/{id}
async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateFaqRequest>,
) -> ApiResult<Json<Value>> {
    let translations = payload
        .translations
        .into_iter()
        .map(|t| t.into_input(&state))
        .collect::<ApiResult<Vec<_>>>()?;

    let repo = FaqRepository::new(state.db.clone());
    let updated = repo
        .update(
            &id,
            UpdateFaqInput {
                category: payload.category,
                is_active: payload.is_active,
                display_order: payload.display_order,
                translations,
            },
        )
        .await?;

    item_json(&AdminFaqView::from(updated))
}

/// DELETE /admin/faqs/{id}
async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = FaqRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn views(items: Vec<LocalizedFaq>, request_locale: &str) -> Vec<FaqView> {
    items
        .into_iter()
        .map(|f| FaqView::new(f, request_locale))
        .collect()
}
