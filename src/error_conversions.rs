//! Error conversion glue between the `data` layer and the server layers.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions out of [`TypeConstraintError`] live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

/// A record from the backend that breaks a value constraint is a malformed
/// response, not a rejected key.
impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Unexpected(val.to_string())
    }
}
