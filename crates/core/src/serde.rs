//! Serde helper functions for request deserialization.
//!
//! Query strings and JSON bodies from browsers are loose: blank strings stand in
//! for missing values and numbers arrive as text. These helpers normalize both.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional integer given as text, treating anything unparsable as None.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse().ok()))
}

/// Deserialize a boolean flag given as text. Only `"true"` and `"1"` are true.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(matches!(s.as_deref(), Some("true") | Some("1")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_lenient_i64")]
        number_field: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_flag")]
        flag_field: bool,
    }

    #[test]
    fn test_deserialize_optional_string_empty() {
        let json = r#"{"string_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_whitespace() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "hello"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("hello".to_string()));
    }

    #[test]
    fn test_deserialize_lenient_number() {
        let json = r#"{"number_field": " 42 "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.number_field, Some(42));
    }

    #[test]
    fn test_deserialize_lenient_number_garbage() {
        let json = r#"{"number_field": "forty-two"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.number_field, None);
    }

    #[test]
    fn test_deserialize_flag_values() {
        for (raw, expected) in [
            ("true", true),
            ("1", true),
            ("false", false),
            ("0", false),
            ("TRUE", false),
            ("yes", false),
            ("", false),
        ] {
            let json = format!(r#"{{"flag_field": "{raw}"}}"#);
            let result: TestStruct = serde_json::from_str(&json).unwrap();
            assert_eq!(result.flag_field, expected, "flag value {raw:?}");
        }
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let result: TestStruct = serde_json::from_str("{}").unwrap();
        assert_eq!(
            result,
            TestStruct {
                string_field: None,
                number_field: None,
                flag_field: false,
            }
        );
    }
}
