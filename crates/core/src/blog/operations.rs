//! Pure input normalization and validation for the usecase layer.

use super::error::{PostError, UserError};
use super::requests::UpdateUserRequest;
use super::types::{NewUser, User};
use crate::storage::Pagination;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_FEATURED_LIMIT: i64 = 10;
pub const MAX_FEATURED_LIMIT: i64 = 50;

/// A page request after normalization. Always has `page >= 1` and
/// `1 <= page_size <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Converts to a limit/offset pair: `offset = (page - 1) * page_size`.
    pub fn pagination(&self) -> Pagination {
        let offset = (self.page - 1).saturating_mul(self.page_size);
        Pagination::new(self.page_size, offset)
    }
}

/// Normalizes raw page parameters.
///
/// A page below 1 becomes 1. A page size outside `1..=100` becomes 20.
/// Missing values are treated like 0.
pub fn normalize_page(page: Option<i64>, page_size: Option<i64>) -> PageRequest {
    let page = page.unwrap_or(0).max(1);
    let page_size = match page_size.unwrap_or(0) {
        size @ 1..=MAX_PAGE_SIZE => size,
        _ => DEFAULT_PAGE_SIZE,
    };
    PageRequest { page, page_size }
}

/// Normalizes the featured-post limit. Anything outside `1..=50` becomes 10.
pub fn normalize_featured_limit(limit: Option<i64>) -> i64 {
    match limit.unwrap_or(0) {
        limit @ 1..=MAX_FEATURED_LIMIT => limit,
        _ => DEFAULT_FEATURED_LIMIT,
    }
}

/// Validates a post id. Ids are positive.
pub fn validate_post_id(id: i64) -> Result<i64, PostError> {
    if id <= 0 {
        return Err(PostError::InvalidId(id));
    }
    Ok(id)
}

/// Validates a slug path segment. Only the empty slug is rejected; the rest is
/// looked up exactly as given.
pub fn validate_slug(slug: &str) -> Result<&str, PostError> {
    if slug.is_empty() {
        return Err(PostError::EmptySlug);
    }
    Ok(slug)
}

/// Validates a username path segment. Same rule as [`validate_slug`].
pub fn validate_username(username: &str) -> Result<&str, PostError> {
    if username.is_empty() {
        return Err(PostError::EmptyUsername);
    }
    Ok(username)
}

/// Validates a user id. Ids are positive.
pub fn validate_user_id(id: i64) -> Result<i64, UserError> {
    if id <= 0 {
        return Err(UserError::InvalidId(id));
    }
    Ok(id)
}

fn validate_name(name: &str) -> Result<(), UserError> {
    if name.trim().is_empty() {
        return Err(UserError::EmptyName);
    }
    if name.chars().count() > 100 {
        return Err(UserError::NameTooLong);
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), UserError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(UserError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

fn validate_age(age: Option<i32>) -> Result<(), UserError> {
    match age {
        Some(age) if !(0..=150).contains(&age) => Err(UserError::InvalidAge(age)),
        _ => Ok(()),
    }
}

/// Validates a user before insertion.
pub fn validate_new_user(user: &NewUser) -> Result<(), UserError> {
    validate_name(&user.name)?;
    validate_email(&user.email)?;
    validate_age(user.age)
}

/// Applies a partial update to a user and validates the result.
///
/// Only fields present in the request change. `updated_at` is left to the store.
pub fn apply_user_update(user: &mut User, update: &UpdateUserRequest) -> Result<(), UserError> {
    if let Some(name) = &update.name {
        validate_name(name)?;
        user.name = name.trim().to_string();
    }
    if let Some(email) = &update.email {
        validate_email(email)?;
        user.email = email.trim().to_string();
    }
    if update.age.is_some() {
        validate_age(update.age)?;
        user.age = update.age;
    }
    Ok(())
}
