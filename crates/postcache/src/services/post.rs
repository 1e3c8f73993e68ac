use std::sync::Arc;

use serde::{Deserialize, Serialize};

use postcache_core::blog::{
    normalize_featured_limit, normalize_page, validate_post_id, validate_slug, PostWithDetails,
};
use postcache_core::storage::PostRepository;

use super::error::Result;
use super::view_counter::ViewCountRecorder;

/// One page of the published-post listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<PostWithDetails>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Read-only post usecases.
///
/// Detail reads record a view after they succeed; the increment happens in the
/// background and never affects the response.
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    views: ViewCountRecorder,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, views: ViewCountRecorder) -> Self {
        Self { repo, views }
    }

    /// Raw page parameters are normalized: page below 1 becomes 1, a size outside
    /// `1..=100` becomes 20.
    pub async fn get_posts(&self, page: Option<i64>, page_size: Option<i64>) -> Result<PostPage> {
        let request = normalize_page(page, page_size);
        let posts = self.repo.find_all_with_details(request.pagination()).await?;
        let total = self.repo.total_count().await?;

        Ok(PostPage {
            posts,
            total,
            page: request.page,
            page_size: request.page_size,
        })
    }

    pub async fn get_post_by_id(&self, id: i64) -> Result<PostWithDetails> {
        let id = validate_post_id(id)?;
        let post = self.repo.find_by_id_with_details(id).await?;
        self.views.record(post.post.id);
        Ok(post)
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> Result<PostWithDetails> {
        let slug = validate_slug(slug)?;
        let post = self.repo.find_by_slug_with_details(slug).await?;
        self.views.record(post.post.id);
        Ok(post)
    }

    pub async fn get_posts_by_category(
        &self,
        category_slug: &str,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Vec<PostWithDetails>> {
        let category_slug = validate_slug(category_slug)?;
        let request = normalize_page(page, page_size);
        Ok(self
            .repo
            .find_by_category_with_details(category_slug, request.pagination())
            .await?)
    }

    pub async fn get_posts_by_tag(
        &self,
        tag_slug: &str,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Vec<PostWithDetails>> {
        let tag_slug = validate_slug(tag_slug)?;
        let request = normalize_page(page, page_size);
        Ok(self
            .repo
            .find_by_tag_with_details(tag_slug, request.pagination())
            .await?)
    }

    pub async fn get_featured_posts(&self, limit: Option<i64>) -> Result<Vec<PostWithDetails>> {
        let limit = normalize_featured_limit(limit);
        Ok(self.repo.find_featured_with_details(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use tokio::sync::mpsc;

    use crate::services::ServiceError;
    use crate::storage::CachedRepository;
    use crate::test_support::{CountingCache, CountingRepository};

    fn direct_service() -> (Arc<CountingRepository>, PostService, mpsc::Receiver<i64>) {
        let repo = Arc::new(CountingRepository::with_demo_data());
        let (views, rx) = ViewCountRecorder::detached(16);
        (repo.clone(), PostService::new(repo, views), rx)
    }

    #[tokio::test]
    async fn test_get_posts_normalizes_paging() {
        let (_repo, service, _rx) = direct_service();

        let page = service.get_posts(Some(0), Some(500)).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.total, 4);
        assert_eq!(page.posts.len(), 4);
    }

    #[tokio::test]
    async fn test_get_posts_second_page() {
        let (_repo, service, _rx) = direct_service();

        let page = service.get_posts(Some(2), Some(3)).await.unwrap();

        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.total, 4);
    }

    #[tokio::test]
    async fn test_failed_listing_skips_count() {
        let (repo, service, _rx) = direct_service();
        repo.fail_reads(true);

        let result = service.get_posts(None, None).await;

        assert!(matches!(result, Err(ServiceError::Repository(_))));
        assert_eq!(repo.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_page_serializes_camel_case() {
        let (_repo, service, _rx) = direct_service();

        let page = service.get_posts(None, Some(1)).await.unwrap();
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["pageSize"], 1);
        assert_eq!(json["page"], 1);
        assert!(json["posts"].is_array());
    }

    #[tokio::test]
    async fn test_detail_read_records_view() {
        let (_repo, service, mut rx) = direct_service();

        service.get_post_by_id(2).await.unwrap();
        service
            .get_post_by_slug("getting-started-with-tokio")
            .await
            .unwrap();

        assert_eq!(rx.try_recv(), Ok(2));
        assert_eq!(rx.try_recv(), Ok(1));
    }

    #[tokio::test]
    async fn test_failed_detail_read_records_nothing() {
        let (repo, service, mut rx) = direct_service();

        let not_found = service.get_post_by_id(404).await;
        let invalid = service.get_post_by_id(-1).await;
        let empty_slug = service.get_post_by_slug("").await;

        assert!(matches!(not_found, Err(ServiceError::Repository(_))));
        assert!(matches!(invalid, Err(ServiceError::Validation(_))));
        assert!(matches!(empty_slug, Err(ServiceError::Validation(_))));
        assert_eq!(repo.reads.load(Ordering::SeqCst), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_featured_limit_is_normalized() {
        let (_repo, service, _rx) = direct_service();

        let featured = service.get_featured_posts(Some(1)).await.unwrap();
        let clamped = service.get_featured_posts(Some(99)).await.unwrap();

        assert_eq!(featured.len(), 1);
        assert_eq!(clamped.len(), 2);
    }

    #[tokio::test]
    async fn test_category_and_tag_listings() {
        let (_repo, service, _rx) = direct_service();

        let rust = service
            .get_posts_by_category("rust", None, None)
            .await
            .unwrap();
        let caching = service
            .get_posts_by_tag("caching", None, None)
            .await
            .unwrap();

        assert_eq!(rust.len(), 2);
        assert_eq!(caching.len(), 3);
        assert!(matches!(
            service.get_posts_by_category("", None, None).await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_view_recorded_through_cache_invalidates_listing() {
        let repo = Arc::new(CountingRepository::with_demo_data());
        let cache = Arc::new(CountingCache::new());
        let cached = Arc::new(CachedRepository::new(
            repo,
            cache.clone(),
            Duration::from_secs(300),
        ));
        let (views, worker) = ViewCountRecorder::spawn(cached.clone(), 16);
        let service = PostService::new(cached.clone(), views);

        service.get_posts(None, None).await.unwrap();
        assert!(cache.raw("posts:all:limit=20:offset=0").await.is_some());
        let before = service.get_post_by_id(1).await.unwrap().post.view_count;

        drop(service);
        worker.join(Duration::from_secs(1)).await;

        assert!(cache.raw("post:1").await.is_none());
        assert!(cache.raw("posts:all:limit=20:offset=0").await.is_none());
        assert!(cache.raw("posts:totalcount").await.is_none());

        let after = cached.find_by_id_with_details(1).await.unwrap();
        assert_eq!(after.post.view_count, before + 1);
    }
}
