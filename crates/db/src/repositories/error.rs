//! Repository error type shared by every content repository.

use sea_orm::{DbErr, SqlErr};
use toronto_shared::AppError;

/// Error types for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Row not found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A unique key is already taken.
    #[error("{0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Conflict(detail),
            _ => Self::Database(err),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(entity) => Self::NotFound(format!("{entity} not found")),
            RepositoryError::Conflict(message) => Self::Conflict(message),
            RepositoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Result alias for repository operations.
pub type RepoResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err: AppError = RepositoryError::NotFound("Project").into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Not found: Project not found");
    }

    #[test]
    fn conflict_maps_to_409() {
        let err: AppError = RepositoryError::Conflict("slug 'a' already exists".into()).into();
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn plain_db_errors_stay_database_errors() {
        let err = RepositoryError::from(DbErr::Custom("boom".into()));
        assert!(matches!(err, RepositoryError::Database(_)));
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 500);
    }
}
