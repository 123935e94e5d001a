//! User repository for database operations.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use toronto_core::auth::UserRole;

use super::error::{RepoResult, RepositoryError};
use crate::{
    entities::{profiles, user_roles, users},
    new_id, now,
};

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login email, stored lowercased.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Roles granted at creation.
    pub roles: Vec<UserRole>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<users::Model>> {
        Ok(users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db.as_ref())
            .await?)
    }

    /// Finds a user by ID.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<users::Model> {
        users::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound("User"))
    }

    /// Checks if an email is already registered.
    pub async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email.trim().to_lowercase()))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    /// Creates a user with an empty profile and the given roles.
    pub async fn create(&self, input: CreateUserInput) -> RepoResult<users::Model> {
        let email = input.email.trim().to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "Email '{email}' is already registered"
            )));
        }

        let ts = now();
        let id = new_id();
        let txn = self.db.begin().await?;

        let user = users::ActiveModel {
            id: Set(id.clone()),
            email: Set(email),
            password_hash: Set(input.password_hash),
            full_name: Set(input.full_name.clone()),
            is_active: Set(true),
            email_verified: Set(false),
            last_sign_in_at: Set(None),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(&txn)
        .await?;

        profiles::ActiveModel {
            id: Set(id.clone()),
            full_name: Set(input.full_name),
            phone: Set(None),
            avatar_url: Set(None),
            address: Set(None),
            city: Set(None),
            country: Set(None),
            created_at: Set(ts),
            updated_at: Set(ts),
        }
        .insert(&txn)
        .await?;

        let roles = if input.roles.is_empty() {
            vec![UserRole::User]
        } else {
            input.roles
        };
        for role in roles {
            user_roles::ActiveModel {
                id: Set(new_id()),
                user_id: Set(id.clone()),
                role: Set(role.as_str().to_string()),
                created_at: Set(ts),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        tracing::info!(user_id = %id, "User created");
        Ok(user)
    }

    /// Role names held by a user, highest privilege first.
    pub async fn roles_for(&self, user_id: &str) -> RepoResult<Vec<String>> {
        let rows = user_roles::Entity::find()
            .filter(user_roles::Column::UserId.eq(user_id))
            .order_by_asc(user_roles::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        let mut roles: Vec<UserRole> = rows
            .iter()
            .filter_map(|r| UserRole::parse(&r.role))
            .collect();
        roles.sort();
        roles.dedup();
        Ok(roles.into_iter().map(|r| r.as_str().to_string()).collect())
    }

    /// Records a successful sign-in.
    pub async fn touch_sign_in(&self, user: users::Model) -> RepoResult<users::Model> {
        let ts = now();
        let mut active: users::ActiveModel = user.into();
        active.last_sign_in_at = Set(Some(ts));
        active.updated_at = Set(ts);
        Ok(active.update(self.db.as_ref()).await?)
    }
}
