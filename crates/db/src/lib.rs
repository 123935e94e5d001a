//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Raw-SQL MySQL migrations
//! - The compiler from parsed list queries to `SeaORM` conditions

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    ContactRepository, FaqRepository, ProfileRepository, ProjectRepository, ReferenceRepository,
    RepoResult, RepositoryError, ServiceRepository, SiteSettingRepository, StorageAssetRepository,
    UserRepository, UserRoleRepository,
};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use toronto_shared::config::DatabaseConfig;

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    tracing::info!(
        max_connections = config.max_connections,
        "Connecting to database"
    );
    Database::connect(options).await
}

/// Current UTC time as a naive timestamp, the representation every table uses.
#[must_use]
pub fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// Fresh primary key.
#[must_use]
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
