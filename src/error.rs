//! Error types for the push notifications client

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{context}: {source}")]
    Serialization {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context}: {source}")]
    Network {
        context: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("{context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed rejection from the publish API
    #[error("failed to publish notification: {error}: {description}")]
    Api {
        status: u16,
        error: String,
        description: String,
    },

    #[error("failed to sign the JWT token used for user authentication: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl ClientError {
    /// The service could not be reached, timed out, or the response body
    /// could not be read.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ClientError::Network {
                source: TransportError::Timeout(_),
                ..
            }
        )
    }

    /// The service answered with a non-200 status.
    pub fn is_api(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

/// Failures raised by a [`Transport`](crate::transport::Transport)
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(#[source] BoxError),

    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    #[error("HTTP request failed: {0}")]
    Request(#[source] BoxError),

    #[error("failed to read response body: {0}")]
    Body(#[source] BoxError),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(Box::new(err))
        } else if err.is_connect() {
            TransportError::Connect(Box::new(err))
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(Box::new(err))
        } else {
            TransportError::Request(Box::new(err))
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_api_error_message() {
        let err = ClientError::Api {
            status: 500,
            error: "ServerError".to_string(),
            description: "boom".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "failed to publish notification: ServerError: boom"
        );
        assert!(err.is_api());
        assert!(!err.is_network());
    }

    #[test]
    fn test_network_error_keeps_source() {
        let err = ClientError::Network {
            context: "failed to publish notifications due to a network error",
            source: TransportError::Timeout("deadline elapsed".into()),
        };

        assert!(err.is_network());
        assert!(err.is_timeout());
        assert!(!err.is_api());

        let source = err.source().unwrap();
        assert!(source.to_string().contains("deadline elapsed"));
    }
}
