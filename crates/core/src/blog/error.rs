use thiserror::Error;

/// Errors that can occur when validating user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("User name cannot be empty")]
    EmptyName,
    #[error("User name cannot exceed 100 characters")]
    NameTooLong,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Invalid age: {0}")]
    InvalidAge(i32),
    #[error("Invalid user ID: {0}")]
    InvalidId(i64),
}

/// Errors that can occur when validating post lookups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidId(i64),
    #[error("Slug cannot be empty")]
    EmptySlug,
    #[error("Username cannot be empty")]
    EmptyUsername,
}
