use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Key/value store backing the cache-aside decorator.
///
/// Every operation is fallible. Callers treat failures as soft: a failed `get` is
/// a miss and a failed `set` or `delete` is logged and ignored.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key. `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes several keys at once, returning how many existed.
    async fn delete_many(&self, keys: &[String]) -> Result<u64>;

    /// Deletes all values matching a glob pattern (e.g., "posts:*"),
    /// returning how many were removed.
    async fn delete_pattern(&self, pattern: &str) -> Result<u64>;

    /// Returns true if a live value exists for the key.
    async fn exists(&self, key: &str) -> Result<bool>;
}
