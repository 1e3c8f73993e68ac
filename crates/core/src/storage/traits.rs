use async_trait::async_trait;

use crate::blog::{NewUser, PostWithDetails, User, UserDetail};

use super::{Pagination, Result};

/// Repository for user accounts.
///
/// Lookups of a missing user return `RepositoryError::NotFound`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists all users, newest first.
    async fn find_all(&self) -> Result<Vec<User>>;

    /// Gets a user by ID.
    async fn find_by_id(&self, id: i64) -> Result<User>;

    /// Inserts a user and returns it with its assigned ID and timestamps.
    async fn create(&self, user: &NewUser) -> Result<User>;

    /// Persists changes to an existing user and returns the stored row.
    async fn update(&self, user: &User) -> Result<User>;

    /// Deletes a user by ID.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Repository for published posts joined with their related data.
///
/// Only posts with status `published` are returned. Listings are ordered by
/// `published_at` descending.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Lists a page of published posts.
    async fn find_all_with_details(&self, page: Pagination) -> Result<Vec<PostWithDetails>>;

    /// Gets a published post by ID, including its latest comments.
    async fn find_by_id_with_details(&self, id: i64) -> Result<PostWithDetails>;

    /// Gets a published post by slug, including its latest comments.
    async fn find_by_slug_with_details(&self, slug: &str) -> Result<PostWithDetails>;

    /// Lists a page of published posts in a category.
    async fn find_by_category_with_details(
        &self,
        category_slug: &str,
        page: Pagination,
    ) -> Result<Vec<PostWithDetails>>;

    /// Lists a page of published posts carrying a tag.
    async fn find_by_tag_with_details(
        &self,
        tag_slug: &str,
        page: Pagination,
    ) -> Result<Vec<PostWithDetails>>;

    /// Lists the most recent featured posts.
    async fn find_featured_with_details(&self, limit: i64) -> Result<Vec<PostWithDetails>>;

    /// Counts published posts.
    async fn total_count(&self) -> Result<i64>;

    /// Adds one to a post's view counter.
    async fn increment_view_count(&self, id: i64) -> Result<()>;
}

/// Read-only repository for the aggregated user profile.
#[async_trait]
pub trait UserDetailRepository: Send + Sync {
    async fn find_detail_by_id(&self, id: i64) -> Result<UserDetail>;

    async fn find_detail_by_username(&self, username: &str) -> Result<UserDetail>;
}
