use thiserror::Error;

use crate::store::StoreError;

/// Coarse classification of a failure, used to pick the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    ValidationFailed,
    Conflict,
    NotFound,
    MethodNotAllowed,
    InternalFailure,
}

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Invalid product ID length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Invalid product ID format: {0}")]
    InvalidFormat(String),
    #[error("Product already exists: {0}")]
    AlreadyExists(String),
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Product ID pattern error: {0}")]
    PatternError(String),
    #[error("Product lookup error: {0}")]
    LookupError(String),
    #[error("Product database error: {0}")]
    DatabaseError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::InvalidLength { .. } | ProductError::InvalidFormat(_) => {
                ErrorKind::ValidationFailed
            }
            ProductError::AlreadyExists(_) => ErrorKind::Conflict,
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::PatternError(_)
            | ProductError::LookupError(_)
            | ProductError::DatabaseError(_)
            | ProductError::ActorCommunicationError(_) => ErrorKind::InternalFailure,
        }
    }
}

impl From<StoreError> for ProductError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(id) => ProductError::AlreadyExists(id),
            other => ProductError::DatabaseError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let cases = [
            (ProductError::InvalidLength { expected: 35, actual: 5 }, ErrorKind::ValidationFailed),
            (ProductError::InvalidFormat("x".into()), ErrorKind::ValidationFailed),
            (ProductError::AlreadyExists("x".into()), ErrorKind::Conflict),
            (ProductError::NotFound("x".into()), ErrorKind::NotFound),
            (ProductError::PatternError("x".into()), ErrorKind::InternalFailure),
            (ProductError::LookupError("x".into()), ErrorKind::InternalFailure),
            (ProductError::DatabaseError("x".into()), ErrorKind::InternalFailure),
            (ProductError::ActorCommunicationError("x".into()), ErrorKind::InternalFailure),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn test_duplicate_key_from_store_is_conflict() {
        let err = ProductError::from(StoreError::DuplicateKey("ABC".into()));
        assert_eq!(err, ProductError::AlreadyExists("ABC".into()));

        let err = ProductError::from(StoreError::Database("socket closed".into()));
        assert_eq!(err.kind(), ErrorKind::InternalFailure);
    }
}
