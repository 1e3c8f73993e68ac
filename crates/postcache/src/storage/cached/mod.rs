//! Cached repository decorators.
//!
//! [`CachedRepository`] wraps any repository with the cache-aside pattern:
//!
//! - **Reads**: check the cache first; on a miss, fetch from the repository and
//!   store the result with the configured TTL.
//! - **Writes**: persist to the repository, then delete the affected keys. A failed
//!   write deletes nothing.
//!
//! Negative results are never cached: a `NotFound` goes straight back to the caller.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(InMemoryRepository::with_demo_data());
//! let cache = Arc::new(MemoryCache::new());
//!
//! let cached = CachedRepository::new(repo, cache, Duration::from_secs(300));
//! ```

mod aside;
mod post;
mod user;

use std::sync::Arc;
use std::time::Duration;

use postcache_core::cache::Cache;

use aside::CacheAside;

/// Cache-aside decorator over a repository `R` backed by cache `C`.
///
/// Implements `UserRepository` when `R` does and `PostRepository` when `R` does.
pub struct CachedRepository<R, C: Cache> {
    repository: Arc<R>,
    aside: CacheAside<C>,
}

impl<R, C: Cache> CachedRepository<R, C> {
    /// Creates a new cached repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for every cached value
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            aside: CacheAside::new(cache, ttl),
        }
    }
}
