//! Project repository: portfolio entries with per-locale copy.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use toronto_core::query::ListQuery;

use super::{
    error::{RepoResult, RepositoryError},
    listing::{ListSpec, apply_list_query},
    translation::{Localized, localize, pick_translation},
};
use crate::{
    entities::{projects, projects_i18n},
    new_id, now,
};

/// A project with its picked translation.
pub type LocalizedProject = Localized<projects::Model, projects_i18n::Model>;

/// One locale's copy of a project.
#[derive(Debug, Clone)]
pub struct ProjectTranslationInput {
    /// Locale code.
    pub locale: String,
    /// Title.
    pub title: String,
    /// Short summary.
    pub summary: Option<String>,
    /// Rich-text body.
    pub content: Option<String>,
    /// SEO title.
    pub meta_title: Option<String>,
    /// SEO description.
    pub meta_description: Option<String>,
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Unique URL slug.
    pub slug: String,
    /// Category label.
    pub category: Option<String>,
    /// Client name.
    pub client_name: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Completion year.
    pub project_year: Option<i32>,
    /// Cover image URL.
    pub cover_image_url: Option<String>,
    /// Gallery image list.
    pub gallery: Option<serde_json::Value>,
    /// Featured on the home page.
    pub is_featured: bool,
    /// Publicly visible.
    pub is_active: bool,
    /// Sort position.
    pub display_order: i32,
    /// Per-locale copy.
    pub translations: Vec<ProjectTranslationInput>,
}

/// Input for updating a project. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectInput {
    /// Unique URL slug.
    pub slug: Option<String>,
    /// Category label.
    pub category: Option<Option<String>>,
    /// Client name.
    pub client_name: Option<Option<String>>,
    /// Location.
    pub location: Option<Option<String>>,
    /// Completion year.
    pub project_year: Option<Option<i32>>,
    /// Cover image URL.
    pub cover_image_url: Option<Option<String>>,
    /// Gallery image list.
    pub gallery: Option<Option<serde_json::Value>>,
    /// Featured on the home page.
    pub is_featured: Option<bool>,
    /// Publicly visible.
    pub is_active: Option<bool>,
    /// Sort position.
    pub display_order: Option<i32>,
    /// Translations upserted by locale.
    pub translations: Vec<ProjectTranslationInput>,
}

/// A project with every translation, as the admin console edits it.
#[derive(Debug, Clone)]
pub struct ProjectWithTranslations {
    /// The base row.
    pub project: projects::Model,
    /// All locale rows.
    pub translations: Vec<projects_i18n::Model>,
}

impl ListSpec for projects::Entity {
    fn exposed_columns() -> Vec<Self::Column> {
        vec![
            projects::Column::Id,
            projects::Column::Slug,
            projects::Column::Category,
            projects::Column::ClientName,
            projects::Column::Location,
            projects::Column::ProjectYear,
            projects::Column::IsFeatured,
            projects::Column::IsActive,
            projects::Column::DisplayOrder,
            projects::Column::CreatedAt,
            projects::Column::UpdatedAt,
        ]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![
            (projects::Column::DisplayOrder, Order::Asc),
            (projects::Column::CreatedAt, Order::Desc),
        ]
    }
}

/// Project repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: Arc<DatabaseConnection>,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists projects matching `query`, localized along `chain`.
    pub async fn list_localized(
        &self,
        query: &ListQuery,
        chain: &[String],
        active_only: bool,
    ) -> RepoResult<Vec<LocalizedProject>> {
        let mut select = projects::Entity::find();
        if active_only {
            select = select.filter(projects::Column::IsActive.eq(true));
        }
        let items = apply_list_query(select, query).all(self.db.as_ref()).await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let rows = projects_i18n::Entity::find()
            .filter(projects_i18n::Column::ProjectId.is_in(items.iter().map(|p| p.id.clone())))
            .all(self.db.as_ref())
            .await?;
        tracing::debug!(projects = items.len(), translations = rows.len(), "Loaded project translations");
        Ok(localize(items, &rows, chain, |p| &p.id))
    }

    /// Finds one project by ID, localized along `chain`.
    pub async fn find_localized(
        &self,
        id: &str,
        chain: &[String],
        active_only: bool,
    ) -> RepoResult<LocalizedProject> {
        let mut select = projects::Entity::find_by_id(id.to_string());
        if active_only {
            select = select.filter(projects::Column::IsActive.eq(true));
        }
        let project = select
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Project"))?;
        self.localize_one(project, chain).await
    }

    /// Finds one active project by slug, localized along `chain`.
    pub async fn find_by_slug_localized(
        &self,
        slug: &str,
        chain: &[String],
    ) -> RepoResult<LocalizedProject> {
        let project = projects::Entity::find()
            .filter(projects::Column::Slug.eq(slug))
            .filter(projects::Column::IsActive.eq(true))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Project"))?;
        self.localize_one(project, chain).await
    }

    /// Loads a project with all of its translations.
    pub async fn get_with_translations(&self, id: &str) -> RepoResult<ProjectWithTranslations> {
        let project = projects::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Project"))?;
        let translations = load_translations(self.db.as_ref(), &project.id).await?;
        Ok(ProjectWithTranslations {
            project,
            translations,
        })
    }

    /// Checks if a slug is taken by a project other than `except_id`.
    pub async fn slug_exists(&self, slug: &str, except_id: Option<&str>) -> RepoResult<bool> {
        let mut select = projects::Entity::find().filter(projects::Column::Slug.eq(slug));
        if let Some(id) = except_id {
            select = select.filter(projects::Column::Id.ne(id));
        }
        Ok(select.one(self.db.as_ref()).await?.is_some())
    }

    /// Creates a project and its translations in one transaction.
    pub async fn create(&self, input: CreateProjectInput) -> RepoResult<ProjectWithTranslations> {
        if self.slug_exists(&input.slug, None).await? {
            return Err(RepositoryError::Conflict(format!(
                "Project slug '{}' already exists",
                input.slug
            )));
        }

        let ts = now();
        let id = new_id();
        let txn = self.db.begin().await?;

        let project = projects::ActiveModel {
            id: Set(id.clone()),
            slug: Set(input.slug),
            category: Set(input.category),
            client_name: Set(input.client_name),
            location: Set(input.location),
            project_year: Set(input.project_year),
            cover_image_url: Set(input.cover_image_url),
            gallery: Set(input.gallery),
            is_featured: Set(input.is_featured),
            is_active: Set(input.is_active),
            display_order: Set(input.display_order),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(&txn)
        .await?;

        for translation in input.translations {
            upsert_translation(&txn, &id, translation).await?;
        }
        let translations = load_translations(&txn, &id).await?;
        txn.commit().await?;

        tracing::info!(project_id = %id, slug = %project.slug, "Project created");
        Ok(ProjectWithTranslations {
            project,
            translations,
        })
    }

    /// Updates a project and upserts the given translations.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateProjectInput,
    ) -> RepoResult<ProjectWithTranslations> {
        let existing = projects::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Project"))?;

        if let Some(slug) = &input.slug
            && *slug != existing.slug
            && self.slug_exists(slug, Some(id)).await?
        {
            return Err(RepositoryError::Conflict(format!(
                "Project slug '{slug}' already exists"
            )));
        }

        let txn = self.db.begin().await?;
        let mut active: projects::ActiveModel = existing.into();
        if let Some(slug) = input.slug {
            active.slug = Set(slug);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(client_name) = input.client_name {
            active.client_name = Set(client_name);
        }
        if let Some(location) = input.location {
            active.location = Set(location);
        }
        if let Some(project_year) = input.project_year {
            active.project_year = Set(project_year);
        }
        if let Some(cover_image_url) = input.cover_image_url {
            active.cover_image_url = Set(cover_image_url);
        }
        if let Some(gallery) = input.gallery {
            active.gallery = Set(gallery);
        }
        if let Some(is_featured) = input.is_featured {
            active.is_featured = Set(is_featured);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(display_order) = input.display_order {
            active.display_order = Set(display_order);
        }
        active.updated_at = Set(now());
        let project = active.update(&txn).await?;

        for translation in input.translations {
            upsert_translation(&txn, id, translation).await?;
        }
        let translations = load_translations(&txn, id).await?;
        txn.commit().await?;

        tracing::info!(project_id = %id, "Project updated");
        Ok(ProjectWithTranslations {
            project,
            translations,
        })
    }

    /// Deletes a project; translations cascade.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = projects::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Project"));
        }
        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }

    /// Slugs and modification times of active projects.
    pub async fn active_slugs(&self) -> RepoResult<Vec<(String, chrono::NaiveDateTime)>> {
        let rows = projects::Entity::find()
            .filter(projects::Column::IsActive.eq(true))
            .order_by_asc(projects::Column::DisplayOrder)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(|p| (p.slug, p.updated_at)).collect())
    }

    async fn localize_one(
        &self,
        project: projects::Model,
        chain: &[String],
    ) -> RepoResult<LocalizedProject> {
        let rows = load_translations(self.db.as_ref(), &project.id).await?;
        let translation = pick_translation(&rows, &project.id, chain).cloned();
        Ok(Localized {
            item: project,
            translation,
        })
    }
}

async fn load_translations<C: ConnectionTrait>(
    db: &C,
    project_id: &str,
) -> RepoResult<Vec<projects_i18n::Model>> {
    Ok(projects_i18n::Entity::find()
        .filter(projects_i18n::Column::ProjectId.eq(project_id))
        .order_by_asc(projects_i18n::Column::Locale)
        .all(db)
        .await?)
}

async fn upsert_translation<C: ConnectionTrait>(
    db: &C,
    project_id: &str,
    input: ProjectTranslationInput,
) -> RepoResult<()> {
    let existing = projects_i18n::Entity::find()
        .filter(projects_i18n::Column::ProjectId.eq(project_id))
        .filter(projects_i18n::Column::Locale.eq(&input.locale))
        .one(db)
        .await?;
    let ts = now();

    match existing {
        Some(row) => {
            let mut active: projects_i18n::ActiveModel = row.into();
            active.title = Set(input.title);
            active.summary = Set(input.summary);
            active.content = Set(input.content);
            active.meta_title = Set(input.meta_title);
            active.meta_description = Set(input.meta_description);
            active.updated_at = Set(ts);
            active.update(db).await?;
        }
        None => {
            projects_i18n::ActiveModel {
                id: Set(new_id()),
                project_id: Set(project_id.to_string()),
                locale: Set(input.locale),
                title: Set(input.title),
                summary: Set(input.summary),
                content: Set(input.content),
                meta_title: Set(input.meta_title),
                meta_description: Set(input.meta_description),
                created_at: Set(ts),
                updated_at: Set(ts),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}
