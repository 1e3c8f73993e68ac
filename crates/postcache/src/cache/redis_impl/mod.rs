//! Redis cache backend implementation.
//!
//! Provides a shared cache for multi-instance deployments. Pattern deletion
//! uses `KEYS`, which is adequate for the small key space this service writes.

mod cache;
mod error;

pub use cache::RedisCache;
