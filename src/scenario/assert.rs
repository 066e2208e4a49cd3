//! Assertion helpers
//!
//! Each helper returns `Error::Assertion` with the expected and the actual
//! value spelled out, so callers can use `?` and keep the happy path flat.

use std::fmt::Debug;

use reqwest::StatusCode;
use serde_json::Value;

use crate::common::{Error, Result};

/// Check an HTTP status code
pub fn expect_status(actual: StatusCode, expected: u16) -> Result<()> {
    if actual.as_u16() != expected {
        return Err(Error::assertion(format!(
            "expected status code {}, got {}",
            expected,
            actual.as_u16()
        )));
    }
    Ok(())
}

/// Check two values for equality; `what` names the compared quantity
pub fn expect_eq<T: PartialEq + Debug>(what: &str, expected: T, actual: T) -> Result<()> {
    if expected != actual {
        return Err(Error::assertion(format!(
            "{}: expected {:?}, got {:?}",
            what, expected, actual
        )));
    }
    Ok(())
}

/// Check that `haystack` contains `needle`
pub fn expect_contains(what: &str, haystack: &str, needle: &str) -> Result<()> {
    if !haystack.contains(needle) {
        return Err(Error::assertion(format!(
            "{}: expected {:?} to contain {:?}",
            what, haystack, needle
        )));
    }
    Ok(())
}

/// Look up a field on a JSON object, failing if it is absent
pub fn require_field<'a>(object: &'a Value, field: &str) -> Result<&'a Value> {
    object.get(field).ok_or_else(|| {
        Error::assertion(format!(
            "response has no '{}' field. Got: {}",
            field,
            truncate(&object.to_string(), 200)
        ))
    })
}

/// Look up several fields at once
pub fn require_fields(object: &Value, fields: &[&str]) -> Result<()> {
    for field in fields {
        require_field(object, field)?;
    }
    Ok(())
}

/// Look up a field that must be a JSON string
pub fn require_str<'a>(object: &'a Value, field: &str) -> Result<&'a str> {
    let value = require_field(object, field)?;
    value.as_str().ok_or_else(|| {
        Error::assertion(format!("field '{}' should be a string, got {}", field, value))
    })
}

/// Look up a field that must be a JSON integer
pub fn require_i64(object: &Value, field: &str) -> Result<i64> {
    let value = require_field(object, field)?;
    value.as_i64().ok_or_else(|| {
        Error::assertion(format!("field '{}' should be an integer, got {}", field, value))
    })
}

/// Check that a field holds any JSON integer, signed or unsigned
pub fn require_integer(object: &Value, field: &str) -> Result<()> {
    let value = require_field(object, field)?;
    if value.is_i64() || value.is_u64() {
        return Ok(());
    }
    Err(Error::assertion(format!(
        "field '{}' should be an integer, got {}",
        field, value
    )))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max).collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expect_status_reports_both_codes() {
        assert!(expect_status(StatusCode::CREATED, 201).is_ok());

        let err = expect_status(StatusCode::NOT_FOUND, 200).unwrap_err();
        assert!(err.to_string().contains("expected status code 200, got 404"));
    }

    #[test]
    fn test_expect_eq_and_contains() {
        assert!(expect_eq("page", 2, 2).is_ok());
        let err = expect_eq("page", 2, 3).unwrap_err();
        assert!(err.to_string().contains("page: expected 2, got 3"));

        assert!(expect_contains("email", "janet@reqres.in", "@").is_ok());
        assert!(expect_contains("email", "janet", "@").is_err());
    }

    #[test]
    fn test_require_field_variants() {
        let body = json!({"token": "QpwL5tke4Pnpja7X4", "id": 4, "name": 7});

        assert_eq!(require_str(&body, "token").unwrap(), "QpwL5tke4Pnpja7X4");
        assert_eq!(require_i64(&body, "id").unwrap(), 4);
        assert!(require_str(&body, "name").is_err());
        assert!(require_i64(&body, "token").is_err());

        let err = require_field(&body, "error").unwrap_err();
        assert!(err.to_string().contains("no 'error' field"));

        assert!(require_fields(&body, &["token", "id"]).is_ok());
        assert!(require_fields(&body, &["token", "job"]).is_err());
    }

    #[test]
    fn test_require_integer_accepts_full_unsigned_range() {
        assert!(require_integer(&json!({"id": 4}), "id").is_ok());
        assert!(require_integer(&json!({"id": -4}), "id").is_ok());
        assert!(require_integer(&json!({"id": u64::MAX}), "id").is_ok());

        let err = require_integer(&json!({"id": "4"}), "id").unwrap_err();
        assert!(err.to_string().contains("field 'id' should be an integer, got \"4\""));
        assert!(require_integer(&json!({"id": 4.5}), "id").is_err());
    }

    #[test]
    fn test_truncate_long_bodies() {
        let long = "x".repeat(300);
        let out = truncate(&long, 200);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
        assert_eq!(truncate("short", 200), "short");
    }
}
