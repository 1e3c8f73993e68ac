use thiserror::Error;

use postcache_core::blog::{PostError, UserError};
use postcache_core::storage::RepositoryError;

/// Errors returned by the usecase layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request was rejected before reaching the data source.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<UserError> for ServiceError {
    fn from(err: UserError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PostError> for ServiceError {
    fn from(err: PostError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_their_message() {
        let err = ServiceError::from(PostError::InvalidId(0));
        assert_eq!(err, ServiceError::Validation("Invalid post ID: 0".to_string()));
        assert_eq!(err.to_string(), "Invalid post ID: 0");
    }

    #[test]
    fn test_repository_errors_are_transparent() {
        let err = ServiceError::from(RepositoryError::not_found("User", 9));
        assert_eq!(err.to_string(), RepositoryError::not_found("User", 9).to_string());
    }
}
