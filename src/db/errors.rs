use diesel::result::{DatabaseErrorKind, Error};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid {field}: {message}")]
    InvalidReference {
        field: &'static str,
        message: String,
    },
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
    #[error("Migration error: {0}")]
    Migration(String),
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

impl RepositoryError {
    /// Maps constraint violations on writes to `Conflict`, keeping other errors intact.
    pub(crate) fn from_write(e: Error, conflict_msg: &str) -> Self {
        match e {
            Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
                _,
            ) => RepositoryError::Conflict(conflict_msg.to_string()),
            other => RepositoryError::DatabaseError(other),
        }
    }

    pub(crate) fn from_lookup(e: Error, entity: &str) -> Self {
        match e {
            Error::NotFound => RepositoryError::NotFound(entity.to_string()),
            other => RepositoryError::DatabaseError(other),
        }
    }
}
