//! Cache key derivation.
//!
//! Every key is `namespace ":" discriminator`. Numeric discriminators are written
//! as-is, named parameters as `name=value` joined by `:`. String discriminators
//! (slugs) are percent-encoded so a slug containing `:` or `*` cannot collide with
//! another query's key or be matched by an unrelated invalidation pattern.
//! Slugs made of `[A-Za-z0-9-_.~]` are left untouched.

use std::borrow::Cow;

use crate::storage::Pagination;

/// Pattern matching every post listing and count key.
pub const POSTS_PATTERN: &str = "posts:*";

/// Key for the list of all users.
pub const USERS_ALL_KEY: &str = "users:all";

/// Key for the published post count.
pub const POSTS_TOTAL_COUNT_KEY: &str = "posts:totalcount";

fn encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Returns the cache key for a single user.
pub fn user_key(id: i64) -> String {
    format!("user:{}", id)
}

/// Returns the cache key for the list of all users.
pub fn users_all_key() -> String {
    USERS_ALL_KEY.to_string()
}

/// Returns the cache key for a post looked up by id.
pub fn post_key(id: i64) -> String {
    format!("post:{}", id)
}

/// Returns the cache key for a post looked up by slug.
pub fn post_slug_key(slug: &str) -> String {
    format!("post:slug:{}", encode(slug))
}

/// Returns the cache key for a page of all published posts.
pub fn posts_all_key(page: Pagination) -> String {
    format!("posts:all:limit={}:offset={}", page.limit, page.offset)
}

/// Returns the cache key for a page of posts in a category.
pub fn posts_by_category_key(category_slug: &str, page: Pagination) -> String {
    format!(
        "posts:category:{}:limit={}:offset={}",
        encode(category_slug),
        page.limit,
        page.offset
    )
}

/// Returns the cache key for a page of posts with a tag.
pub fn posts_by_tag_key(tag_slug: &str, page: Pagination) -> String {
    format!(
        "posts:tag:{}:limit={}:offset={}",
        encode(tag_slug),
        page.limit,
        page.offset
    )
}

/// Returns the cache key for the featured posts listing.
pub fn posts_featured_key(limit: i64) -> String {
    format!("posts:featured:limit={}", limit)
}

/// Returns the cache key for the published post count.
pub fn posts_total_count_key() -> String {
    POSTS_TOTAL_COUNT_KEY.to_string()
}

/// Keys to delete after a user is created, updated, or deleted.
pub fn user_invalidation_keys(id: i64) -> Vec<String> {
    vec![user_key(id), users_all_key()]
}
