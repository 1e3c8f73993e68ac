pub mod error;
pub mod health;
pub mod posts;
pub mod user_details;
pub mod users;

use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use postcache_core::serde::deserialize_flag;

pub use crate::services::CacheMode;
use crate::services::ServiceError;
pub use error::AppError;

/// The `no_cache` query flag accepted by every read endpoint.
///
/// Only `"true"` and `"1"` bypass the cache.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CacheParams {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub no_cache: bool,
}

impl CacheParams {
    pub fn mode(&self) -> CacheMode {
        CacheMode::from_no_cache(self.no_cache)
    }
}

/// Parses a numeric path id. Range checks are left to the services.
fn parse_id(raw: &str, entity: &str) -> Result<i64, ServiceError> {
    raw.trim()
        .parse()
        .map_err(|_| ServiceError::Validation(format!("Invalid {entity} ID: {raw}")))
}

fn invalid_body(rejection: JsonRejection) -> ServiceError {
    ServiceError::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_params_mode() {
        let bypass: CacheParams = serde_json::from_str(r#"{"no_cache": "1"}"#).unwrap();
        let cached: CacheParams = serde_json::from_str(r#"{"no_cache": "yes"}"#).unwrap();
        let absent: CacheParams = serde_json::from_str("{}").unwrap();

        assert_eq!(bypass.mode(), CacheMode::Bypass);
        assert_eq!(cached.mode(), CacheMode::Cached);
        assert_eq!(absent.mode(), CacheMode::Cached);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12", "post"), Ok(12));
        assert_eq!(parse_id("0", "post"), Ok(0));
        assert_eq!(
            parse_id("abc", "post"),
            Err(ServiceError::Validation("Invalid post ID: abc".to_string()))
        );
    }
}
