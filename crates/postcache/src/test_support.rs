//! Counting doubles shared by decorator, service, and router tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use postcache_core::blog::{NewUser, PostWithDetails, User, UserDetail};
use postcache_core::cache::{Cache, CacheError, Result as CacheResult};
use postcache_core::storage::{
    Pagination, PostRepository, RepositoryError, Result, UserDetailRepository, UserRepository,
};

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::services::ViewCountWorker;
use crate::state::AppState;
use crate::storage::inmemory::InMemoryRepository;

/// Application state over demo data with counting doubles on both sides.
pub fn test_state() -> (
    AppState,
    ViewCountWorker,
    Arc<CountingRepository>,
    Arc<CountingCache>,
) {
    let repo = Arc::new(CountingRepository::with_demo_data());
    let cache = Arc::new(CountingCache::new());
    let (state, worker) = AppState::build(repo.clone(), cache.clone(), &Config::default());
    (state, worker, repo, cache)
}

/// Memory cache that counts calls and can pretend to be unreachable.
#[derive(Default)]
pub struct CountingCache {
    inner: MemoryCache,
    unreachable: AtomicBool,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl CountingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache whose every operation fails with a connection error.
    pub fn unreachable() -> Self {
        let cache = Self::default();
        cache.unreachable.store(true, Ordering::SeqCst);
        cache
    }

    /// Total number of cache operations attempted.
    pub fn calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
            + self.sets.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }

    /// Reads a stored value without touching the counters.
    pub async fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.get(key).await.ok().flatten()
    }

    /// Stores a value without touching the counters.
    pub async fn put_raw(&self, key: &str, value: &[u8]) {
        self.inner
            .set(key, value, None)
            .await
            .expect("memory cache set cannot fail");
    }

    fn check(&self) -> CacheResult<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Cache for CountingCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.delete(key).await
    }

    async fn delete_many(&self, keys: &[String]) -> CacheResult<u64> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.delete_many(keys).await
    }

    async fn delete_pattern(&self, pattern: &str) -> CacheResult<u64> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.delete_pattern(pattern).await
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.exists(key).await
    }
}

/// Demo-data repository that counts data-source calls and can fail reads or writes.
pub struct CountingRepository {
    inner: InMemoryRepository,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl CountingRepository {
    pub fn with_demo_data() -> Self {
        Self {
            inner: InMemoryRepository::with_demo_data(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    /// Makes every subsequent read fail with a connection error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write fail with a connection error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn read(&self) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionFailed(
                "database is locked".to_string(),
            ));
        }
        Ok(())
    }

    fn write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionFailed(
                "database is locked".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for CountingRepository {
    async fn find_all(&self) -> Result<Vec<User>> {
        self.read()?;
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<User> {
        self.read()?;
        self.inner.find_by_id(id).await
    }

    async fn create(&self, user: &NewUser) -> Result<User> {
        self.write()?;
        self.inner.create(user).await
    }

    async fn update(&self, user: &User) -> Result<User> {
        self.write()?;
        self.inner.update(user).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.write()?;
        self.inner.delete(id).await
    }
}

#[async_trait]
impl PostRepository for CountingRepository {
    async fn find_all_with_details(&self, page: Pagination) -> Result<Vec<PostWithDetails>> {
        self.read()?;
        self.inner.find_all_with_details(page).await
    }

    async fn find_by_id_with_details(&self, id: i64) -> Result<PostWithDetails> {
        self.read()?;
        self.inner.find_by_id_with_details(id).await
    }

    async fn find_by_slug_with_details(&self, slug: &str) -> Result<PostWithDetails> {
        self.read()?;
        self.inner.find_by_slug_with_details(slug).await
    }

    async fn find_by_category_with_details(
        &self,
        category_slug: &str,
        page: Pagination,
    ) -> Result<Vec<PostWithDetails>> {
        self.read()?;
        self.inner
            .find_by_category_with_details(category_slug, page)
            .await
    }

    async fn find_by_tag_with_details(
        &self,
        tag_slug: &str,
        page: Pagination,
    ) -> Result<Vec<PostWithDetails>> {
        self.read()?;
        self.inner.find_by_tag_with_details(tag_slug, page).await
    }

    async fn find_featured_with_details(&self, limit: i64) -> Result<Vec<PostWithDetails>> {
        self.read()?;
        self.inner.find_featured_with_details(limit).await
    }

    async fn total_count(&self) -> Result<i64> {
        self.read()?;
        self.inner.total_count().await
    }

    async fn increment_view_count(&self, id: i64) -> Result<()> {
        self.write()?;
        self.inner.increment_view_count(id).await
    }
}

#[async_trait]
impl UserDetailRepository for CountingRepository {
    async fn find_detail_by_id(&self, id: i64) -> Result<UserDetail> {
        self.read()?;
        self.inner.find_detail_by_id(id).await
    }

    async fn find_detail_by_username(&self, username: &str) -> Result<UserDetail> {
        self.read()?;
        self.inner.find_detail_by_username(username).await
    }
}
