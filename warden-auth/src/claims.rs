//! Token claim verification.
//!
//! Used by token introspection to check a single claim against an
//! expected value. Missing claims are permissive by default: callers
//! needing strict presence enforcement check for it separately.

use serde_json::{Map, Value};
use warden_core::{WardenError, WardenResult};

/// Standard audience claim name.
pub const AUDIENCE_CLAIM: &str = "aud";

/// Verify the audience claim against `expected_audience`.
///
/// An empty claims set, or one without an `aud` entry, passes. A
/// string `aud` must equal the expected audience exactly; an
/// array-valued `aud` must contain it. Anything else fails with
/// [`WardenError::InvalidAudience`]. No side effects.
pub fn verify_audience(claims: &Map<String, Value>, expected_audience: &str) -> WardenResult<()> {
    if claims.is_empty() {
        return Ok(());
    }

    let Some(audience) = claims.get(AUDIENCE_CLAIM) else {
        return Ok(());
    };

    let matches = match audience {
        Value::String(s) => s == expected_audience,
        Value::Array(items) => items
            .iter()
            .any(|v| v.as_str() == Some(expected_audience)),
        _ => false,
    };

    if matches {
        Ok(())
    } else {
        Err(WardenError::InvalidAudience {
            expected: expected_audience.to_string(),
            found: audience
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| audience.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(AUDIENCE_CLAIM.to_string(), value);
        map
    }

    #[test]
    fn matching_audience_passes() {
        assert!(verify_audience(&claims(json!("api")), "api").is_ok());
    }

    #[test]
    fn mismatched_audience_fails() {
        let err = verify_audience(&claims(json!("other")), "api").unwrap_err();
        assert_eq!(
            err,
            WardenError::InvalidAudience {
                expected: "api".to_string(),
                found: "other".to_string(),
            }
        );
    }

    #[test]
    fn empty_claims_pass_regardless_of_expectation() {
        assert!(verify_audience(&Map::new(), "api").is_ok());
    }

    #[test]
    fn absent_audience_claim_passes() {
        let mut map = Map::new();
        map.insert("sub".to_string(), json!("jdoe"));
        assert!(verify_audience(&map, "api").is_ok());
    }

    #[test]
    fn array_audience_matches_by_containment() {
        assert!(verify_audience(&claims(json!(["api", "admin"])), "api").is_ok());
        assert!(verify_audience(&claims(json!(["admin"])), "api").is_err());
    }
}
