//! SQLite storage backend implementation.
//!
//! A normalized blog schema accessed through `rusqlite`, with `tokio-rusqlite`
//! moving every query onto the connection's background thread.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
