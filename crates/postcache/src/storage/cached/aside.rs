//! Generic cache-aside engine shared by every cached repository method.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use postcache_core::cache::{deserialize, serialize, Cache};
use postcache_core::storage::Result;

/// Read-through and invalidate-on-write over any [`Cache`].
///
/// Cache failures never escape: a store error or an undecodable payload on read
/// is a miss, and a failed write-back or delete is logged and dropped. Only the
/// data source's own errors reach the caller.
pub struct CacheAside<C: Cache> {
    cache: Arc<C>,
    ttl: Duration,
}

impl<C: Cache> CacheAside<C> {
    pub fn new(cache: Arc<C>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Returns the cached value under `key`, or runs `fetch` and caches its result.
    ///
    /// Errors from `fetch` are returned unchanged and nothing is cached for them.
    pub async fn read_through<T, F, Fut>(&self, key: String, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        match self.cache.get(&key).await {
            Ok(Some(bytes)) => match deserialize::<T>(&bytes) {
                Ok(value) => {
                    tracing::trace!(cache_key = %key, "Cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    tracing::warn!(cache_key = %key, error = %err, "Cached payload unreadable, treating as miss");
                }
            },
            Ok(None) => {
                tracing::trace!(cache_key = %key, "Cache miss");
            }
            Err(err) => {
                tracing::warn!(cache_key = %key, error = %err, "Cache read failed, treating as miss");
            }
        }

        let value = fetch().await?;

        match serialize(&value) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(&key, &bytes, Some(self.ttl)).await {
                    tracing::warn!(cache_key = %key, error = %err, "Failed to populate cache");
                } else {
                    tracing::trace!(cache_key = %key, ttl_secs = self.ttl.as_secs(), "Cache set");
                }
            }
            Err(err) => {
                tracing::warn!(cache_key = %key, error = %err, "Failed to serialize value for cache");
            }
        }

        Ok(value)
    }

    /// Deletes the given keys, best effort.
    pub async fn invalidate(&self, keys: &[String]) {
        match self.cache.delete_many(keys).await {
            Ok(removed) => {
                tracing::debug!(keys = ?keys, removed, "Cache invalidated");
            }
            Err(err) => {
                tracing::warn!(keys = ?keys, error = %err, "Failed to invalidate cache keys");
            }
        }
    }

    /// Deletes every key matching a glob pattern, best effort.
    pub async fn invalidate_pattern(&self, pattern: &str) {
        match self.cache.delete_pattern(pattern).await {
            Ok(removed) => {
                tracing::debug!(pattern, removed, "Cache pattern invalidated");
            }
            Err(err) => {
                tracing::warn!(pattern, error = %err, "Failed to invalidate cache pattern");
            }
        }
    }
}
