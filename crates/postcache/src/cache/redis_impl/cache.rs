//! Redis cache implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use postcache_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using a connection manager.
///
/// `ConnectionManager` reconnects on its own, so a Redis outage surfaces as
/// per-call errors rather than a dead cache.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(map_redis_error)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();
        match ttl {
            Some(duration) => {
                // SET EX takes whole seconds and rejects 0.
                let seconds = duration.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, seconds)
                    .await
                    .map_err(map_redis_error)
            }
            None => conn
                .set::<_, _, ()>(key, value)
                .await
                .map_err(map_redis_error),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(map_redis_error)
    }

    async fn delete_many(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn.clone();
        conn.del(keys.to_vec()).await.map_err(map_redis_error)
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(pattern).await.map_err(map_redis_error)?;
        if keys.is_empty() {
            return Ok(0);
        }
        conn.del(keys).await.map_err(map_redis_error)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        conn.exists(key).await.map_err(map_redis_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        let cache = RedisCache::new(&redis_url()).await.ok()?;
        cache.exists("postcache:probe").await.ok()?;
        Some(cache)
    }

    /// Unique namespace so parallel test runs do not collide.
    fn test_namespace() -> String {
        format!("test:{}", Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:user:1", test_namespace());
        cache.set(&key, b"alice", None).await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some(b"alice".to_vec()));

        cache.delete(&key).await.unwrap();
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:post:1", test_namespace());
        cache
            .set(&key, b"expiring", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert!(cache.exists(&key).await.unwrap());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(!cache.exists(&key).await.unwrap());
        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_sub_second_ttl_is_rounded_up() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = format!("{}:post:2", test_namespace());
        cache
            .set(&key, b"v", Some(Duration::from_millis(10)))
            .await
            .unwrap();

        assert!(cache.exists(&key).await.unwrap());
        cache.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_delete_many_and_pattern() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let ns = test_namespace();
        let list_key = format!("{ns}:posts:all:limit=5:offset=0");
        let count_key = format!("{ns}:posts:totalcount");
        let post_key = format!("{ns}:post:1");
        let user_key = format!("{ns}:user:1");

        for key in [&list_key, &count_key, &post_key, &user_key] {
            cache.set(key, b"x", None).await.unwrap();
        }

        let removed = cache.delete_pattern(&format!("{ns}:posts:*")).await.unwrap();
        assert_eq!(removed, 2);
        assert!(cache.exists(&post_key).await.unwrap());

        let removed = cache
            .delete_many(&[post_key.clone(), user_key.clone(), format!("{ns}:missing")])
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert!(!cache.exists(&user_key).await.unwrap());

        assert_eq!(cache.delete_many(&[]).await.unwrap(), 0);
    }
}
