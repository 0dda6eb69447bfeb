//! Wire types for the publish API and user authentication tokens

use serde::{Deserialize, Serialize};

/// Notification payload supplied by the caller, e.g. `{"apns": {...}, "fcm": {...}}`
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Body of a 200 response from the publish API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub publish_id: String,
}

/// Body of any non-200 response from the publish API
///
/// Missing or null fields read as absent rather than failing the decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Claims embedded in a user authentication token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject (user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issuer, `https://{instance_id}.pushnotifications.pusher.com`
    pub iss: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_response_deserialization() {
        let response: PublishResponse =
            serde_json::from_str(r#"{"publishId":"pub-0123"}"#).unwrap();
        assert_eq!(response.publish_id, "pub-0123");
    }

    #[test]
    fn test_error_response_fields() {
        let response: PublishErrorResponse =
            serde_json::from_str(r#"{"error":"Unauthorized","description":"bad key"}"#).unwrap();
        assert_eq!(response.error.as_deref(), Some("Unauthorized"));
        assert_eq!(response.description.as_deref(), Some("bad key"));
    }

    #[test]
    fn test_error_response_missing_or_null_fields() {
        let response: PublishErrorResponse =
            serde_json::from_str(r#"{"error":"Unauthorized"}"#).unwrap();
        assert_eq!(response.error.as_deref(), Some("Unauthorized"));
        assert!(response.description.is_none());

        let response: PublishErrorResponse =
            serde_json::from_str(r#"{"error":null,"description":null}"#).unwrap();
        assert!(response.error.is_none());
        assert!(response.description.is_none());

        assert!(serde_json::from_str::<PublishErrorResponse>(r#""Bad Gateway""#).is_err());
    }

    #[test]
    fn test_publish_response_requires_publish_id() {
        assert!(serde_json::from_str::<PublishResponse>("{}").is_err());
        assert!(serde_json::from_str::<PublishResponse>(r#"{"publishId":null}"#).is_err());
    }
}
