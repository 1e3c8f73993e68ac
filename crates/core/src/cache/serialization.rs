//! Pure functions for serializing query results to and from cache bytes.
//!
//! Values are stored as JSON so cached payloads stay human-readable when
//! inspected with `redis-cli`.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes any query result (record, list, or count) to JSON bytes.
pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes into a query result.
///
/// A payload that does not match `T` is an error, never a partially filled value.
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::{NewUser, Post, PostWithDetails, User};
    use chrono::{DateTime, TimeZone, Utc};

    fn fixed_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_user_list_survives_the_cache() {
        let users = vec![
            NewUser::new("alice", "alice@example.com").into_user(1, fixed_timestamp()),
            NewUser::new("bob", "bob@example.com")
                .with_age(40)
                .into_user(2, fixed_timestamp()),
        ];

        let bytes = serialize(&users).expect("serialize should succeed");
        let decoded: Vec<User> = deserialize(&bytes).expect("deserialize should succeed");

        assert_eq!(decoded, users);
    }

    #[test]
    fn test_count_is_plain_json_number() {
        let bytes = serialize(&42_i64).unwrap();
        assert_eq!(bytes, b"42");
        assert_eq!(deserialize::<i64>(&bytes).unwrap(), 42);
    }

    #[test]
    fn test_empty_list_is_cached_as_empty_array() {
        let posts: Vec<PostWithDetails> = vec![];
        let bytes = serialize(&posts).unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn test_corrupt_payload_is_an_error() {
        let result = deserialize::<User>(b"not valid json");
        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        // A cached list read back as a single record.
        let post = Post::new(1, 1, "Hello", "hello", "body").published(fixed_timestamp());
        let bytes = serialize(&vec![PostWithDetails::new(post, "alice")]).unwrap();

        let result = deserialize::<PostWithDetails>(&bytes);

        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }
}
