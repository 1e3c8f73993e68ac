//! Cached post repository.
//!
//! Every read is cached under its own key. The only write is the view counter,
//! which deletes `post:{id}` and every `posts:*` listing. Slug keys are left to
//! expire on their own.

use async_trait::async_trait;

use postcache_core::blog::PostWithDetails;
use postcache_core::cache::{
    post_key, post_slug_key, posts_all_key, posts_by_category_key, posts_by_tag_key,
    posts_featured_key, posts_total_count_key, Cache, POSTS_PATTERN,
};
use postcache_core::storage::{Pagination, PostRepository, Result};

use super::CachedRepository;

#[async_trait]
impl<R, C> PostRepository for CachedRepository<R, C>
where
    R: PostRepository + 'static,
    C: Cache + 'static,
{
    async fn find_all_with_details(&self, page: Pagination) -> Result<Vec<PostWithDetails>> {
        self.aside
            .read_through(posts_all_key(page), || {
                self.repository.find_all_with_details(page)
            })
            .await
    }

    async fn find_by_id_with_details(&self, id: i64) -> Result<PostWithDetails> {
        self.aside
            .read_through(post_key(id), || self.repository.find_by_id_with_details(id))
            .await
    }

    async fn find_by_slug_with_details(&self, slug: &str) -> Result<PostWithDetails> {
        self.aside
            .read_through(post_slug_key(slug), || {
                self.repository.find_by_slug_with_details(slug)
            })
            .await
    }

    async fn find_by_category_with_details(
        &self,
        category_slug: &str,
        page: Pagination,
    ) -> Result<Vec<PostWithDetails>> {
        self.aside
            .read_through(posts_by_category_key(category_slug, page), || {
                self.repository
                    .find_by_category_with_details(category_slug, page)
            })
            .await
    }

    async fn find_by_tag_with_details(
        &self,
        tag_slug: &str,
        page: Pagination,
    ) -> Result<Vec<PostWithDetails>> {
        self.aside
            .read_through(posts_by_tag_key(tag_slug, page), || {
                self.repository.find_by_tag_with_details(tag_slug, page)
            })
            .await
    }

    async fn find_featured_with_details(&self, limit: i64) -> Result<Vec<PostWithDetails>> {
        self.aside
            .read_through(posts_featured_key(limit), || {
                self.repository.find_featured_with_details(limit)
            })
            .await
    }

    async fn total_count(&self) -> Result<i64> {
        self.aside
            .read_through(posts_total_count_key(), || self.repository.total_count())
            .await
    }

    async fn increment_view_count(&self, id: i64) -> Result<()> {
        self.repository.increment_view_count(id).await?;

        self.aside.invalidate(&[post_key(id)]).await;
        self.aside.invalidate_pattern(POSTS_PATTERN).await;

        tracing::trace!(post_id = id, "View count incremented");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use postcache_core::storage::{Pagination, PostRepository, RepositoryError};

    use crate::storage::CachedRepository;
    use crate::test_support::{CountingCache, CountingRepository};

    type Cached = CachedRepository<CountingRepository, CountingCache>;

    fn setup() -> (Arc<CountingRepository>, Arc<CountingCache>, Cached) {
        let repo = Arc::new(CountingRepository::with_demo_data());
        let cache = Arc::new(CountingCache::new());
        let cached = CachedRepository::new(repo.clone(), cache.clone(), Duration::from_secs(300));
        (repo, cache, cached)
    }

    #[tokio::test]
    async fn test_listing_is_cached_per_window() {
        let (repo, cache, cached) = setup();

        cached
            .find_all_with_details(Pagination::new(2, 0))
            .await
            .unwrap();
        cached
            .find_all_with_details(Pagination::new(2, 0))
            .await
            .unwrap();
        cached
            .find_all_with_details(Pagination::new(2, 2))
            .await
            .unwrap();

        assert_eq!(repo.reads.load(Ordering::SeqCst), 2);
        assert!(cache.raw("posts:all:limit=2:offset=0").await.is_some());
        assert!(cache.raw("posts:all:limit=2:offset=2").await.is_some());
    }

    #[tokio::test]
    async fn test_reads_use_their_own_keys() {
        let (_repo, cache, cached) = setup();

        cached.find_by_id_with_details(1).await.unwrap();
        cached
            .find_by_slug_with_details("getting-started-with-tokio")
            .await
            .unwrap();
        cached
            .find_by_category_with_details("rust", Pagination::new(20, 0))
            .await
            .unwrap();
        cached
            .find_by_tag_with_details("async", Pagination::new(20, 0))
            .await
            .unwrap();
        cached.find_featured_with_details(10).await.unwrap();
        cached.total_count().await.unwrap();

        for key in [
            "post:1",
            "post:slug:getting-started-with-tokio",
            "posts:category:rust:limit=20:offset=0",
            "posts:tag:async:limit=20:offset=0",
            "posts:featured:limit=10",
            "posts:totalcount",
        ] {
            assert!(cache.raw(key).await.is_some(), "expected {key} to be cached");
        }
    }

    #[tokio::test]
    async fn test_view_increment_clears_post_and_listings_but_not_slug() {
        let (_repo, cache, cached) = setup();

        cached.find_by_id_with_details(1).await.unwrap();
        cached
            .find_by_slug_with_details("getting-started-with-tokio")
            .await
            .unwrap();
        cached
            .find_all_with_details(Pagination::new(20, 0))
            .await
            .unwrap();
        cached.find_featured_with_details(10).await.unwrap();
        cached.total_count().await.unwrap();
        cached.find_by_id_with_details(2).await.unwrap();

        cached.increment_view_count(1).await.unwrap();

        assert_eq!(cache.raw("post:1").await, None);
        assert_eq!(cache.raw("posts:all:limit=20:offset=0").await, None);
        assert_eq!(cache.raw("posts:featured:limit=10").await, None);
        assert_eq!(cache.raw("posts:totalcount").await, None);
        assert!(cache
            .raw("post:slug:getting-started-with-tokio")
            .await
            .is_some());
        assert!(cache.raw("post:2").await.is_some());
    }

    #[tokio::test]
    async fn test_view_increment_is_visible_after_invalidation() {
        let (_repo, _cache, cached) = setup();

        let before = cached.find_by_id_with_details(1).await.unwrap();
        cached.increment_view_count(1).await.unwrap();
        let after = cached.find_by_id_with_details(1).await.unwrap();

        assert_eq!(after.post.view_count, before.post.view_count + 1);
    }

    #[tokio::test]
    async fn test_failed_increment_invalidates_nothing() {
        let (repo, cache, cached) = setup();
        cached.find_by_id_with_details(1).await.unwrap();

        repo.fail_writes(true);
        let result = cached.increment_view_count(1).await;

        assert!(matches!(result, Err(RepositoryError::ConnectionFailed(_))));
        assert!(cache.raw("post:1").await.is_some());
        assert_eq!(cache.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unreachable_cache_still_serves_listing() {
        let repo = Arc::new(CountingRepository::with_demo_data());
        let cache = Arc::new(CountingCache::unreachable());
        let cached = CachedRepository::new(repo.clone(), cache, Duration::from_secs(300));

        let posts = cached
            .find_all_with_details(Pagination::new(5, 0))
            .await
            .unwrap();
        let direct = repo
            .find_all_with_details(Pagination::new(5, 0))
            .await
            .unwrap();

        assert_eq!(posts, direct);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_refetched() {
        let (repo, cache, cached) = setup();
        cache.put_raw("post:1", b"\xff\xfe garbage").await;

        let post = cached.find_by_id_with_details(1).await.unwrap();

        assert_eq!(post.id(), 1);
        assert_eq!(repo.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_slug_is_not_cached() {
        let (_repo, cache, cached) = setup();

        let result = cached.find_by_slug_with_details("nope").await;

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(cache.raw("post:slug:nope").await, None);
    }
}
