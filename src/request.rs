//! Construction of publish requests

use crate::error::{ClientError, Result};
use crate::transport::HttpRequest;
use crate::types::Payload;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Identifies this library to the service
pub const LIBRARY_HEADER: &str = "x-pusher-library";
pub const LIBRARY_NAME: &str = "pusher-push-notifications-rust";

/// Who a publish is addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Interests(Vec<String>),
    Users(Vec<String>),
}

impl Target {
    /// Payload key the identifiers are written to
    pub fn key(&self) -> &'static str {
        match self {
            Target::Interests(_) => "interests",
            Target::Users(_) => "users",
        }
    }

    /// The key of the other target kind, never sent alongside this one
    fn conflicting_key(&self) -> &'static str {
        match self {
            Target::Interests(_) => "users",
            Target::Users(_) => "interests",
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Target::Interests(ids) | Target::Users(ids) => ids.len(),
        }
    }

    /// Path below the base endpoint
    pub fn path(&self, instance_id: &str) -> String {
        match self {
            Target::Interests(_) => format!("/publish_api/v1/instances/{instance_id}/publishes"),
            Target::Users(_) => format!("/publish_api/v1/instances/{instance_id}/publishes/users"),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Target::Interests(ids) | Target::Users(ids) => {
                Value::Array(ids.into_iter().map(Value::String).collect())
            }
        }
    }
}

/// Turn a caller payload into a JSON object.
///
/// Fails with a serialization error when the payload cannot be encoded and a
/// validation error when it encodes to anything other than an object.
pub fn payload_to_object<P: Serialize + ?Sized>(payload: &P) -> Result<Payload> {
    let value = serde_json::to_value(payload).map_err(|source| ClientError::Serialization {
        context: "failed to marshal the publish request JSON body",
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ClientError::Validation(format!(
            "Publish request must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Inject the target into `payload`, replacing any existing key of the same
/// name, and serialize it.
///
/// A request carries either `interests` or `users`, so the other key is
/// dropped from the payload.
pub fn build_body(mut payload: Payload, target: Target) -> Result<Vec<u8>> {
    payload.remove(target.conflicting_key());
    let key = target.key();
    payload.insert(key.to_string(), target.into_value());

    serde_json::to_vec(&payload).map_err(|source| ClientError::Serialization {
        context: "failed to marshal the publish request JSON body",
        source,
    })
}

/// Headers sent with every publish request
pub fn publish_headers(secret_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let bearer = HeaderValue::from_str(&format!("Bearer {secret_key}")).map_err(|_| {
        ClientError::Configuration("Secret Key contains characters not allowed in a header".to_string())
    })?;
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let library = format!("{LIBRARY_NAME} {}", env!("CARGO_PKG_VERSION"));
    let library = HeaderValue::from_str(&library).map_err(|_| {
        ClientError::Configuration(format!("Invalid library header value '{library}'"))
    })?;
    headers.insert(LIBRARY_HEADER, library);

    Ok(headers)
}

/// Build the complete POST request for a publish
pub fn build_publish_request(
    base_endpoint: &str,
    instance_id: &str,
    headers: HeaderMap,
    payload: Payload,
    target: Target,
) -> Result<HttpRequest> {
    let url = format!("{base_endpoint}{}", target.path(instance_id));
    let body = build_body(payload, target)?;

    Ok(HttpRequest {
        method: Method::POST,
        url,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn object(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_interests_body() {
        let payload = object(json!({"apns": {"aps": {"alert": "hi"}}}));
        let body = build_body(payload, Target::Interests(vec!["hello".to_string()])).unwrap();

        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            json!({"apns": {"aps": {"alert": "hi"}}, "interests": ["hello"]})
        );
    }

    #[test]
    fn test_injected_key_overwrites_payload() {
        let payload = object(json!({"users": ["mallory"], "fcm": {"notification": {}}}));
        let body = build_body(payload, Target::Users(vec!["alice".to_string()])).unwrap();

        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["users"], json!(["alice"]));
        assert_eq!(value["fcm"], json!({"notification": {}}));
        assert!(value.get("interests").is_none());

        let payload = object(json!({"users": ["mallory"]}));
        let body = build_body(payload, Target::Interests(vec!["news".to_string()])).unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"interests": ["news"]}));
    }

    #[test]
    fn test_payload_must_be_object() {
        assert!(payload_to_object(&json!({"web": {}})).is_ok());

        let err = payload_to_object(&json!(["not", "an", "object"])).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_unserializable_payload() {
        let mut payload: BTreeMap<Vec<u8>, u32> = BTreeMap::new();
        payload.insert(vec![1, 2], 3);

        let err = payload_to_object(&payload).unwrap_err();
        assert!(matches!(err, ClientError::Serialization { .. }));
        assert!(err.to_string().contains("failed to marshal"));
    }

    #[test]
    fn test_publish_urls() {
        let headers = publish_headers("secret").unwrap();
        let interests = build_publish_request(
            "https://abc.pushnotifications.pusher.com",
            "abc",
            headers.clone(),
            Payload::new(),
            Target::Interests(vec!["a".to_string()]),
        )
        .unwrap();
        assert_eq!(
            interests.url,
            "https://abc.pushnotifications.pusher.com/publish_api/v1/instances/abc/publishes"
        );
        assert_eq!(interests.method, Method::POST);

        let users = build_publish_request(
            "https://abc.pushnotifications.pusher.com",
            "abc",
            headers,
            Payload::new(),
            Target::Users(vec!["alice".to_string()]),
        )
        .unwrap();
        assert!(users.url.ends_with("/publish_api/v1/instances/abc/publishes/users"));
    }

    #[test]
    fn test_publish_headers() {
        let headers = publish_headers("my-secret").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer my-secret");
        assert_eq!(headers[CONTENT_TYPE], "application/json");

        let library = headers[LIBRARY_HEADER].to_str().unwrap();
        assert_eq!(
            library,
            format!("pusher-push-notifications-rust {}", env!("CARGO_PKG_VERSION"))
        );

        assert!(publish_headers("bad\nkey").is_err());
    }
}
