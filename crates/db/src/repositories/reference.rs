//! Reference repository (client logos shown on the site).

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, Set,
};
use toronto_core::query::ListQuery;

use super::{
    error::{RepoResult, RepositoryError},
    listing::{ListSpec, apply_list_query},
};
use crate::{entities::references, new_id, now};

/// Input for creating a reference.
#[derive(Debug, Clone)]
pub struct CreateReferenceInput {
    /// Client name.
    pub name: String,
    /// Logo URL.
    pub logo_url: Option<String>,
    /// Client website.
    pub website_url: Option<String>,
    /// Grouping label.
    pub category: Option<String>,
    /// Publicly visible.
    pub is_active: bool,
    /// Sort position.
    pub display_order: i32,
}

/// Input for updating a reference.
#[derive(Debug, Clone, Default)]
pub struct UpdateReferenceInput {
    /// Client name.
    pub name: Option<String>,
    /// Logo URL.
    pub logo_url: Option<Option<String>>,
    /// Client website.
    pub website_url: Option<Option<String>>,
    /// Grouping label.
    pub category: Option<Option<String>>,
    /// Publicly visible.
    pub is_active: Option<bool>,
    /// Sort position.
    pub display_order: Option<i32>,
}

impl ListSpec for references::Entity {
    fn exposed_columns() -> Vec<Self::Column> {
        vec![
            references::Column::Id,
            references::Column::Name,
            references::Column::Category,
            references::Column::IsActive,
            references::Column::DisplayOrder,
            references::Column::CreatedAt,
            references::Column::UpdatedAt,
        ]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![
            (references::Column::DisplayOrder, Order::Asc),
            (references::Column::CreatedAt, Order::Desc),
        ]
    }
}

/// Reference repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    db: Arc<DatabaseConnection>,
}

impl ReferenceRepository {
    /// Creates a new reference repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists references matching `query`.
    pub async fn list(
        &self,
        query: &ListQuery,
        active_only: bool,
    ) -> RepoResult<Vec<references::Model>> {
        let mut select = references::Entity::find();
        if active_only {
            select = select.filter(references::Column::IsActive.eq(true));
        }
        Ok(apply_list_query(select, query).all(self.db.as_ref()).await?)
    }

    /// Finds a reference by ID.
    pub async fn find_by_id(&self, id: &str, active_only: bool) -> RepoResult<references::Model> {
        let mut select = references::Entity::find_by_id(id.to_string());
        if active_only {
            select = select.filter(references::Column::IsActive.eq(true));
        }
        select
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Reference"))
    }

    /// Creates a reference.
    pub async fn create(&self, input: CreateReferenceInput) -> RepoResult<references::Model> {
        let ts = now();
        let reference = references::ActiveModel {
            id: Set(new_id()),
            name: Set(input.name),
            logo_url: Set(input.logo_url),
            website_url: Set(input.website_url),
            category: Set(input.category),
            is_active: Set(input.is_active),
            display_order: Set(input.display_order),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(self.db.as_ref())
        .await?;

        tracing::info!(reference_id = %reference.id, "Reference created");
        Ok(reference)
    }

    /// Updates a reference.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateReferenceInput,
    ) -> RepoResult<references::Model> {
        let existing = self.find_by_id(id, false).await?;
        let mut active: references::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(logo_url) = input.logo_url {
            active.logo_url = Set(logo_url);
        }
        if let Some(website_url) = input.website_url {
            active.website_url = Set(website_url);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(display_order) = input.display_order {
            active.display_order = Set(display_order);
        }
        active.updated_at = Set(now());
        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Deletes a reference.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = references::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Reference"));
        }
        tracing::info!(reference_id = %id, "Reference deleted");
        Ok(())
    }
}
