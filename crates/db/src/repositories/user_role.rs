//! User role assignments.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, Set,
};
use toronto_core::{auth::UserRole, query::ListQuery};

use super::{
    error::{RepoResult, RepositoryError},
    listing::{ListSpec, apply_list_query},
};
use crate::{
    entities::{user_roles, users},
    new_id, now,
};

impl ListSpec for user_roles::Entity {
    fn exposed_columns() -> Vec<Self::Column> {
        vec![
            user_roles::Column::Id,
            user_roles::Column::UserId,
            user_roles::Column::Role,
            user_roles::Column::CreatedAt,
        ]
    }

    fn default_order() -> Vec<(Self::Column, Order)> {
        vec![(user_roles::Column::CreatedAt, Order::Desc)]
    }
}

/// User role repository.
#[derive(Debug, Clone)]
pub struct UserRoleRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRoleRepository {
    /// Creates a new user role repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists role assignments matching `query`.
    pub async fn list(&self, query: &ListQuery) -> RepoResult<Vec<user_roles::Model>> {
        let select = user_roles::Entity::find();
        Ok(apply_list_query(select, query).all(self.db.as_ref()).await?)
    }

    /// Grants `role` to a user.
    pub async fn create(&self, user_id: &str, role: UserRole) -> RepoResult<user_roles::Model> {
        if users::Entity::find_by_id(user_id.to_string())
            .one(self.db.as_ref())
            .await?
            .is_none()
        {
            return Err(RepositoryError::NotFound("User"));
        }

        let taken = user_roles::Entity::find()
            .filter(user_roles::Column::UserId.eq(user_id))
            .filter(user_roles::Column::Role.eq(role.as_str()))
            .one(self.db.as_ref())
            .await?;
        if taken.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "User already has role '{role}'"
            )));
        }

        let assignment = user_roles::ActiveModel {
            id: Set(new_id()),
            user_id: Set(user_id.to_string()),
            role: Set(role.as_str().to_string()),
            created_at: Set(now()),
        }
        .insert(self.db.as_ref())
        .await?;

        tracing::info!(user_id = %user_id, role = %role, "Role granted");
        Ok(assignment)
    }

    /// Revokes a role assignment.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let result = user_roles::Entity::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound("User role"));
        }
        tracing::info!(user_role_id = %id, "Role revoked");
        Ok(())
    }
}
