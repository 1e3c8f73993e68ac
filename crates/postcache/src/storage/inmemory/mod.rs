//! In-memory storage backend.
//!
//! Keeps every table in a single `Arc<RwLock<_>>` so joins see one consistent
//! snapshot. Useful for development and as the backing store in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use postcache::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::with_demo_data();
//! let post = repo.find_by_slug_with_details("redis-key-design").await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
