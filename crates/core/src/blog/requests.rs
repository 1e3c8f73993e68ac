//! API request types for user and post operations.
//!
//! Pure data types with no I/O. Query types keep numeric parameters lenient:
//! a value that does not parse is treated as absent and later normalized.

use serde::{Deserialize, Serialize};

use super::types::NewUser;
use crate::serde::{deserialize_lenient_i64, deserialize_optional_string};

/// Request payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl CreateUserRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: None,
        }
    }

    /// Set the user's age.
    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: self.age,
        }
    }
}

/// Partial update for a user. Absent (or blank) fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl UpdateUserRequest {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

/// Query parameters for paginated post listings (`?page=2&pageSize=10`).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page_size: Option<i64>,
}

/// Query parameters for the featured listing (`?limit=5`).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FeaturedQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_trims_into_new_user() {
        let request = CreateUserRequest::new("  alice ", " alice@example.com ").with_age(30);

        let new_user = request.into_new_user();

        assert_eq!(new_user.name, "alice");
        assert_eq!(new_user.email, "alice@example.com");
        assert_eq!(new_user.age, Some(30));
    }

    #[test]
    fn test_update_request_blank_fields_are_absent() {
        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"name": "  ", "email": "b@example.com"}"#).unwrap();

        assert_eq!(request.name, None);
        assert_eq!(request.email, Some("b@example.com".to_string()));
        assert!(!request.is_empty());
    }

    #[test]
    fn test_update_request_empty_body() {
        let request: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        assert!(request.is_empty());
    }

    #[test]
    fn test_page_query_uses_camel_case_page_size() {
        let query: PageQuery = serde_json::from_str(r#"{"page": "3", "pageSize": "15"}"#).unwrap();

        assert_eq!(query.page, Some(3));
        assert_eq!(query.page_size, Some(15));
    }

    #[test]
    fn test_page_query_garbage_is_absent() {
        let query: PageQuery = serde_json::from_str(r#"{"page": "abc"}"#).unwrap();

        assert_eq!(query.page, None);
        assert_eq!(query.page_size, None);
    }
}
