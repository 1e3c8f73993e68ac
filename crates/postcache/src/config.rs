use std::{env, str::FromStr, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds (default: 300)
    pub cache_ttl_seconds: u64,
    /// Path to SQLite database file (default: "postcache.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Capacity of the view count queue (default: 1,024)
    pub view_count_queue_size: usize,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 300)
    /// - `SQLITE_PATH` - SQLite database path (default: "postcache.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `VIEW_COUNT_QUEUE_SIZE` - Pending view increments before dropping (default: 1,024)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout in seconds (default: 10)
    ///
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_seconds: parse_or(env_var("CACHE_TTL_SECONDS"), defaults.cache_ttl_seconds),
            sqlite_path: env_var("SQLITE_PATH").unwrap_or(defaults.sqlite_path),
            redis_url: env_var("REDIS_URL").unwrap_or(defaults.redis_url),
            view_count_queue_size: parse_or(
                env_var("VIEW_COUNT_QUEUE_SIZE"),
                defaults.view_count_queue_size,
            ),
            request_timeout_seconds: parse_or(
                env_var("REQUEST_TIMEOUT_SECONDS"),
                defaults.request_timeout_seconds,
            ),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 300,
            sqlite_path: "postcache.db".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
            view_count_queue_size: 1_024,
            request_timeout_seconds: 10,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
