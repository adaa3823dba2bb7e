use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    /// Backend unreachable, timed out or answered with an error status.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The backend rejected the API key.
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Unexpected(format!("Invalid backend response: {err}"))
        } else if let Some(status) = err.status() {
            RepositoryError::ConnectionError(format!("Backend answered {status}"))
        } else {
            RepositoryError::ConnectionError(format!("Backend unreachable: {err}"))
        }
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::StorageError(format!("Corrupted state file: {err}"))
    }
}
