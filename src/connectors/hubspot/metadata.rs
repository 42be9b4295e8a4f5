use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::Value;

/// Summary of a token response, safe to show without exposing the tokens.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenMetadata {
    pub token_type: Option<String>,
    pub has_refresh_token: bool,
    pub expires_in: Option<i64>,
    /// `expires_in` resolved against the time of the call
    pub expires_at: Option<DateTime<Utc>>,
}

/// Derive [`TokenMetadata`] from a raw token-endpoint response.
///
/// Missing or mistyped fields become `None`/`false`; never fails.
pub fn create_integration_item_metadata(response: &Value) -> TokenMetadata {
    let expires_in = response.get("expires_in").and_then(Value::as_i64);
    let has_refresh_token = response
        .get("refresh_token")
        .and_then(Value::as_str)
        .is_some_and(|t| !t.is_empty());

    TokenMetadata {
        token_type: response
            .get("token_type")
            .and_then(Value::as_str)
            .map(str::to_string),
        has_refresh_token,
        expires_in,
        expires_at: expires_in
            .and_then(Duration::try_seconds)
            .and_then(|d| Utc::now().checked_add_signed(d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_token_response() {
        let before = Utc::now();
        let meta = create_integration_item_metadata(&json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 1800,
            "token_type": "bearer"
        }));

        assert_eq!(meta.token_type.as_deref(), Some("bearer"));
        assert!(meta.has_refresh_token);
        assert_eq!(meta.expires_in, Some(1800));
        let expires_at = meta.expires_at.unwrap();
        assert!(expires_at >= before + Duration::seconds(1800));
    }

    #[test]
    fn test_minimal_token_response() {
        let meta = create_integration_item_metadata(&json!({"access_token": "at"}));

        assert_eq!(meta.token_type, None);
        assert!(!meta.has_refresh_token);
        assert_eq!(meta.expires_in, None);
        assert_eq!(meta.expires_at, None);
    }

    #[test]
    fn test_out_of_range_expiry_has_no_deadline() {
        let meta = create_integration_item_metadata(&json!({
            "access_token": "at",
            "expires_in": i64::MAX
        }));

        assert_eq!(meta.expires_in, Some(i64::MAX));
        assert_eq!(meta.expires_at, None);
    }

    #[test]
    fn test_non_object_response() {
        let meta = create_integration_item_metadata(&json!("garbage"));
        assert!(!meta.has_refresh_token);
        assert_eq!(meta.expires_in, None);
    }
}
