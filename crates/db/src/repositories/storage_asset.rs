//! Storage asset metadata repository.
//!
//! Files live in the external media store; rows here record where they are.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, Set,
};
use toronto_core::query::ListQuery;

use super::{
    error::{RepoResult, RepositoryError},
    listing::{ListSpec, apply_list_query},
};
use crate::{entities::storage_assets, new_id, now};

/// Input for registering an asset.
#[derive(Debug, Clone)]
pub struct CreateStorageAssetInput {
    /// Display name.
    pub name: String,
    /// Bucket.
    pub bucket: String,
    /// Path inside the bucket.
    pub path: String,
    /// Virtual folder.
    pub folder: Option<String>,
    /// MIME type.
    pub mime: String,
    /// Size in bytes.
    pub size: i64,
    /// Public URL.
    pub url: Option<String>,
    /// Pixel width for images.
    pub width: Option<i32>,
    /// Pixel height for images.
    pub height: Option<i32>,
    /// Provider metadata.
    pub metadata: Option<serde_json::Value>,
}

/// Changes to an asset row.
#[derive(Debug, Clone, Default)]
pub struct UpdateStorageAssetInput {
    /// Display name.
    pub name: Option<String>,
    /// Virtual folder.
    pub folder: Option<Option<String>>,
    /// Public URL.
    pub url: Option<Option<String>>,
    /// Provider metadata.
    pub metadata: Option<Option<serde_json::Value>>,
}

impl ListSpec for storage_assets::Entity {
    fn exposed_columns() -> Vec<Self::Column> {
        vec![
            storage_assets::Column::Id,
            storage_assets::Column::Name,
            storage_assets::Column::Bucket,
            storage_assets::Column::Path,
            storage_assets::Column::Folder,
            storage_assets::Column::Mime,
            storage_assets::Column::Size,
            storage_assets::Column::CreatedAt,
            storage_assets::Column::UpdatedAt,
        ]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![(storage_assets::Column::CreatedAt, Order::Desc)]
    }
}

/// Storage asset repository.
#[derive(Debug, Clone)]
pub struct StorageAssetRepository {
    db: Arc<DatabaseConnection>,
}

impl StorageAssetRepository {
    /// Creates a new storage asset repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists assets matching `query`.
    pub async fn list(&self, query: &ListQuery) -> RepoResult<Vec<storage_assets::Model>> {
        let select = storage_assets::Entity::find();
        Ok(apply_list_query(select, query).all(self.db.as_ref()).await?)
    }

    /// Finds an asset by ID.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<storage_assets::Model> {
        storage_assets::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("Storage asset"))
    }

    /// Registers an asset; `(bucket, path)` must be unique.
    pub async fn create(
        &self,
        input: CreateStorageAssetInput,
    ) -> RepoResult<storage_assets::Model> {
        let taken = storage_assets::Entity::find()
            .filter(storage_assets::Column::Bucket.eq(&input.bucket))
            .filter(storage_assets::Column::Path.eq(&input.path))
            .one(self.db.as_ref())
            .await?;
        if taken.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "Asset '{}/{}' already exists",
                input.bucket, input.path
            )));
        }

        let ts = now();
        let asset = storage_assets::ActiveModel {
            id: Set(new_id()),
            name: Set(input.name),
            bucket: Set(input.bucket),
            path: Set(input.path),
            folder: Set(input.folder),
            mime: Set(input.mime),
            size: Set(input.size),
            url: Set(input.url),
            width: Set(input.width),
            height: Set(input.height),
            metadata: Set(input.metadata),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(self.db.as_ref())
        .await?;

        tracing::info!(asset_id = %asset.id, bucket = %asset.bucket, path = %asset.path, "Storage asset registered");
        Ok(asset)
    }

    /// Updates an asset row.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateStorageAssetInput,
    ) -> RepoResult<storage_assets::Model> {
        let existing = self.find_by_id(id).await?;
        let mut active: storage_assets::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(folder) = input.folder {
            active.folder = Set(folder);
        }
        if let Some(url) = input.url {
            active.url = Set(url);
        }
        if let Some(metadata) = input.metadata {
            active.metadata = Set(metadata);
        }
        active.updated_at = Set(now());
        Ok(active.update(self.db.as_ref()).await?)
    }

    /// Deletes an asset row.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = storage_assets::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("Storage asset"));
        }
        tracing::info!(asset_id = %id, "Storage asset deleted");
        Ok(())
    }
}
