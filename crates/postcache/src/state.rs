//! Application state.
//!
//! Every service is built twice: once over the cache decorator and once over the
//! raw data source. The backends are chosen at compile time via feature flags
//! (see [`crate::storage`] and [`crate::cache`]).

use std::sync::Arc;

use postcache_core::cache::Cache;
use postcache_core::storage::{PostRepository, UserDetailRepository, UserRepository};

use crate::config::Config;
use crate::services::{
    PostService, ServicePair, UserDetailService, UserService, ViewCountRecorder, ViewCountWorker,
};
use crate::storage::CachedRepository;

/// Shared application state.
///
/// This is cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// User CRUD, cached and direct.
    pub users: ServicePair<UserService>,
    /// Post reads, cached and direct.
    pub posts: ServicePair<PostService>,
    /// User detail aggregation. Always direct.
    pub user_details: Arc<UserDetailService>,
}

impl AppState {
    /// Opens the configured backends and wires the services.
    ///
    /// Also returns the view count worker, which the caller joins on shutdown
    /// after dropping every clone of the state.
    pub async fn new(config: &Config) -> Result<(Self, ViewCountWorker), anyhow::Error> {
        let repository = Arc::new(backend::open_repository(config).await?);
        let cache = Arc::new(backend::open_cache(config).await?);

        Ok(Self::build(repository, cache, config))
    }

    /// Wires services over `repository`, cached through `cache`.
    ///
    /// View increments always go through the cache decorator so that bypassed
    /// reads still invalidate.
    pub(crate) fn build<R, C>(
        repository: Arc<R>,
        cache: Arc<C>,
        config: &Config,
    ) -> (Self, ViewCountWorker)
    where
        R: UserRepository + PostRepository + UserDetailRepository + 'static,
        C: Cache + 'static,
    {
        let cached = Arc::new(CachedRepository::new(
            repository.clone(),
            cache,
            config.cache_ttl(),
        ));

        let (views, worker) =
            ViewCountRecorder::spawn(cached.clone(), config.view_count_queue_size);

        let users = ServicePair::new(
            UserService::new(cached.clone()),
            UserService::new(repository.clone()),
        );
        let posts = ServicePair::new(
            PostService::new(cached, views.clone()),
            PostService::new(repository.clone(), views),
        );
        let user_details = Arc::new(UserDetailService::new(repository));

        (
            Self {
                users,
                posts,
                user_details,
            },
            worker,
        )
    }
}

// ============================================================================
// Backend factories
// ============================================================================

mod backend {
    use super::Config;

    #[cfg(feature = "inmemory")]
    pub async fn open_repository(
        _config: &Config,
    ) -> Result<crate::storage::InMemoryRepository, anyhow::Error> {
        tracing::info!("Using in-memory storage with demo data");
        Ok(crate::storage::InMemoryRepository::with_demo_data())
    }

    #[cfg(feature = "sqlite")]
    pub async fn open_repository(
        config: &Config,
    ) -> Result<crate::storage::SqliteRepository, anyhow::Error> {
        use chrono::Utc;
        use postcache_core::blog::generate_seed_data;

        let repository = crate::storage::SqliteRepository::new(&config.sqlite_path).await?;
        if repository
            .seed_if_empty(generate_seed_data(Utc::now()))
            .await?
        {
            tracing::info!(path = %config.sqlite_path, "Seeded empty database with demo data");
        }
        tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
        Ok(repository)
    }

    #[cfg(feature = "memory")]
    pub async fn open_cache(_config: &Config) -> Result<crate::cache::MemoryCache, anyhow::Error> {
        tracing::info!("Using in-memory cache");
        Ok(crate::cache::MemoryCache::new())
    }

    #[cfg(feature = "redis")]
    pub async fn open_cache(config: &Config) -> Result<crate::cache::RedisCache, anyhow::Error> {
        let cache = crate::cache::RedisCache::new(&config.redis_url).await?;
        tracing::info!(url = %config.redis_url, "Using Redis cache");
        Ok(cache)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use crate::services::CacheMode;
    use crate::test_support::test_state;

    #[tokio::test]
    async fn test_direct_instance_skips_cache() {
        let (state, _worker, repo, cache) = test_state();

        state
            .users
            .select(CacheMode::Bypass)
            .get_all_users()
            .await
            .unwrap();
        state
            .posts
            .select(CacheMode::Bypass)
            .get_posts(None, None)
            .await
            .unwrap();

        assert_eq!(cache.calls(), 0);
        assert_eq!(repo.reads.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cached_instance_uses_cache() {
        let (state, _worker, repo, cache) = test_state();

        for _ in 0..2 {
            state
                .users
                .select(CacheMode::Cached)
                .get_user_by_id(1)
                .await
                .unwrap();
        }

        assert_eq!(repo.reads.load(Ordering::SeqCst), 1);
        assert!(cache.raw("user:1").await.is_some());
    }

    #[tokio::test]
    async fn test_bypassed_detail_read_still_invalidates() {
        let (state, worker, _repo, cache) = test_state();
        cache.put_raw("post:1", b"stale").await;
        cache.put_raw("posts:totalcount", b"4").await;

        state
            .posts
            .select(CacheMode::Bypass)
            .get_post_by_id(1)
            .await
            .unwrap();
        drop(state);
        worker.join(Duration::from_secs(1)).await;

        assert!(cache.raw("post:1").await.is_none());
        assert!(cache.raw("posts:totalcount").await.is_none());
    }

    #[tokio::test]
    async fn test_user_details_are_never_cached() {
        let (state, _worker, _repo, cache) = test_state();

        state.user_details.get_user_detail(1).await.unwrap();

        assert_eq!(cache.calls(), 0);
    }
}
