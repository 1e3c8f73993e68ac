//! Functional core for the postcache project.
//!
//! Pure domain types, request types, validation, cache key derivation, and the
//! storage/cache traits implemented by the server crate. Nothing in here performs I/O.

pub mod blog;
pub mod cache;
pub mod serde;
pub mod storage;
