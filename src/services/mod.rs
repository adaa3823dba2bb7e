//! Application services orchestrating repositories for the web layer.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod api;
pub mod auth;
pub mod birthdays;
pub mod communications;
pub mod people;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    /// Backend unreachable or failing; pages show an inline retry block.
    #[error("connection error: {0}")]
    Connection(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConnectionError(message) | RepositoryError::Unexpected(message) => {
                ServiceError::Connection(message)
            }
            RepositoryError::ValidationError(_) => ServiceError::Unauthorized,
            RepositoryError::StorageError(message) => ServiceError::Internal(message),
        }
    }
}
