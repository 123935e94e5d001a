//! Service repository: offered services with per-locale copy.

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
    entities::{services, services_i18n},
    new_id, now,
};

/// A service with its picked translation.
pub type LocalizedService = Localized<services::Model, services_i18n::Model>;

/// One locale's copy of a service.
#[derive(Debug, Clone)]
pub struct ServiceTranslationInput {
    /// Locale code.
    pub locale: String,
    /// Display name.
    pub name: String,
    /// Short summary.
    pub summary: Option<String>,
    /// Rich-text body.
    pub content: Option<String>,
}

/// Input for creating a service.
#[derive(Debug, Clone)]
pub struct CreateServiceInput {
    /// Unique URL slug.
    pub slug: String,
    /// Icon name.
    pub icon: Option<String>,
    /// Image URL.
    pub image_url: Option<String>,
    /// Featured on the home page.
    pub is_featured: bool,
    /// Publicly visible.
    pub is_active: bool,
    /// Sort position.
    pub display_order: i32,
    /// Per-locale copy.
    pub translations: Vec<ServiceTranslationInput>,
}

/// Input for updating a service. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateServiceInput {
    /// Unique URL slug.
    pub slug: Option<String>,
    /// Icon name.
    pub icon: Option<Option<String>>,
    /// Image URL.
    pub image_url: Option<Option<String>>,
    /// Featured on the home page.
    pub is_featured: Option<bool>,
    /// Publicly visible.
    pub is_active: Option<bool>,
    /// Sort position.
    pub display_order: Option<i32>,
    /// Translations upserted by locale.
    pub translations: Vec<ServiceTranslationInput>,
}

/// A service with every translation.
#[derive(Debug, Clone)]
pub struct ServiceWithTranslations {
    /// The base row.
    pub service: services::Model,
    /// All locale rows.
    pub translations: Vec<services_i18n::Model>,
}

impl ListSpec for services::Entity {
    fn exposed_columns() -> Vec<Self::Column> {
        vec![
            services::Column::Id,
            services::Column::Slug,
            services::Column::Icon,
            services::Column::IsFeatured,
            services::Column::IsActive,
            services::Column::DisplayOrder,
            services::Column::CreatedAt,
            services::Column::UpdatedAt,
        ]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![
            (services::Column::DisplayOrder, Order::Asc),
            (services::Column::CreatedAt, Order::Desc),
        ]
    }
}

/// Service repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    db: Arc<DatabaseConnection>,
}

impl ServiceRepository {
    /// Creates a new service repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists services matching `query`, localized along `chain`.
    pub async fn list_localized(
        &self,
        query: &ListQuery,
        chain: &[String],
        active_only: bool,
    ) -> RepoResult<Vec<LocalizedService>> {
        let mut select = services::Entity::find();
        if active_only {
            select = select.filter(services::Column::IsActive.eq(true));
        }
        let items = apply_list_query(select, query).all(self.db.as_ref()).await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let rows = services_i18n::Entity::find()
            .filter(services_i18n::Column::ServiceId.is_in(items.iter().map(|s| s.id.clone())))
            .all(self.db.as_ref())
            .await?;
        Ok(localize(items, &rows, chain, |s| &s.id))
    }

    /// Finds one service by ID, localized along `chain`.
    pub async fn find_localized(
        &self,
        id: &str,
        chain: &[String],
        active_only: bool,
    ) -> RepoResult<LocalizedService> {
        let mut select = services::Entity::find_by_id(id.to_string());
        if active_only {
            select = select.filter(services::Column::IsActive.eq(true));
        }
        let service = select
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Service"))?;
        self.localize_one(service, chain).await
    }

    /// Finds one active service by slug, localized along `chain`.
    pub async fn find_by_slug_localized(
        &self,
        slug: &str,
        chain: &[String],
    ) -> RepoResult<LocalizedService> {
        let service = services::Entity::find()
            .filter(services::Column::Slug.eq(slug))
            .filter(services::Column::IsActive.eq(true))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Service"))?;
        self.localize_one(service, chain).await
    }

    /// Loads a service with all of its translations.
    pub async fn get_with_translations(&self, id: &str) -> RepoResult<ServiceWithTranslations> {
        let service = services::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Service"))?;
        let translations = load_translations(self.db.as_ref(), &service.id).await?;
        Ok(ServiceWithTranslations {
            service,
            translations,
        })
    }

    /// Checks if a slug is taken by a service other than `except_id`.
    pub async fn slug_exists(&self, slug: &str, except_id: Option<&str>) -> RepoResult<bool> {
        let mut select = services::Entity::find().filter(services::Column::Slug.eq(slug));
        if let Some(id) = except_id {
            select = select.filter(services::Column::Id.ne(id));
        }
        Ok(select.one(self.db.as_ref()).await?.is_some())
    }

    /// Creates a service and its translations in one transaction.
    pub async fn create(&self, input: CreateServiceInput) -> RepoResult<ServiceWithTranslations> {
        if self.slug_exists(&input.slug, None).await? {
            return Err(RepositoryError::Conflict(format!(
                "Service slug '{}' already exists",
                input.slug
            )));
        }

        let ts = now();
        let id = new_id();
        let txn = self.db.begin().await?;

        let service = services::ActiveModel {
            id: Set(id.clone()),
            slug: Set(input.slug),
            icon: Set(input.icon),
            image_url: Set(input.image_url),
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

        tracing::info!(service_id = %id, slug = %service.slug, "Service created");
        Ok(ServiceWithTranslations {
            service,
            translations,
        })
    }

    /// Updates a service and upserts the given translations.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateServiceInput,
    ) -> RepoResult<ServiceWithTranslations> {
        let existing = services::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Service"))?;

        if let Some(slug) = &input.slug
            && *slug != existing.slug
            && self.slug_exists(slug, Some(id)).await?
        {
            return Err(RepositoryError::Conflict(format!(
                "Service slug '{slug}' already exists"
            )));
        }

        let txn = self.db.begin().await?;
        let mut active: services::ActiveModel = existing.into();
        if let Some(slug) = input.slug {
            active.slug = Set(slug);
        }
        if let Some(icon) = input.icon {
            active.icon = Set(icon);
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(image_url);
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
        let service = active.update(&txn).await?;

        for translation in input.translations {
            upsert_translation(&txn, id, translation).await?;
        }
        let translations = load_translations(&txn, id).await?;
        txn.commit().await?;

        tracing::info!(service_id = %id, "Service updated");
        Ok(ServiceWithTranslations {
            service,
            translations,
        })
    }

    /// Deletes a service; translations cascade.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = services::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Service"));
        }
        tracing::info!(service_id = %id, "Service deleted");
        Ok(())
    }

    /// Slugs and modification times of active services.
    pub async fn active_slugs(&self) -> RepoResult<Vec<(String, chrono::NaiveDateTime)>> {
        let rows = services::Entity::find()
            .filter(services::Column::IsActive.eq(true))
            .order_by_asc(services::Column::DisplayOrder)
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(|s| (s.slug, s.updated_at)).collect())
    }

    async fn localize_one(
        &self,
        service: services::Model,
        chain: &[String],
    ) -> RepoResult<LocalizedService> {
        let rows = load_translations(self.db.as_ref(), &service.id).await?;
        let translation = pick_translation(&rows, &service.id, chain).cloned();
        Ok(Localized {
            item: service,
            translation,
        })
    }
}

async fn load_translations<C: ConnectionTrait>(
    db: &C,
    service_id: &str,
) -> RepoResult<Vec<services_i18n::Model>> {
    Ok(services_i18n::Entity::find()
        .filter(services_i18n::Column::ServiceId.eq(service_id))
        .order_by_asc(services_i18n::Column::Locale)
        .all(db)
        .await?)
}

async fn upsert_translation<C: ConnectionTrait>(
    db: &C,
    service_id: &str,
    input: ServiceTranslationInput,
) -> RepoResult<()> {
    let existing = services_i18n::Entity::find()
        .filter(services_i18n::Column::ServiceId.eq(service_id))
        .filter(services_i18n::Column::Locale.eq(&input.locale))
        .one(db)
        .await?;
    let ts = now();

    match existing {
        Some(row) => {
            let mut active: services_i18n::ActiveModel = row.into();
            active.name = Set(input.name);
            active.summary = Set(input.summary);
            active.content = Set(input.content);
            active.updated_at = Set(ts);
            active.update(db).await?;
        }
        None => {
            services_i18n::ActiveModel {
                id: Set(new_id()),
                service_id: Set(service_id.to_string()),
                locale: Set(input.locale),
                name: Set(input.name),
                summary: Set(input.summary),
                content: Set(input.content),
                created_at: Set(ts),
                updated_at: Set(ts),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}
