//! Client configuration

use crate::error::{ClientError, Result};
use std::time::Duration;

/// Default bound on each publish request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the push notifications client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Instance id from the dashboard
    pub instance_id: String,

    /// Instance secret key. Sent as a bearer token and used to sign user tokens.
    pub secret_key: String,

    /// Timeout applied to every request
    /// Default: 60 seconds
    pub request_timeout: Duration,

    /// Overrides `https://{instance_id}.pushnotifications.pusher.com`
    pub base_endpoint: Option<String>,
}

impl ClientConfig {
    pub fn new(instance_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            secret_key: secret_key.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            base_endpoint: None,
        }
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Send requests to another host, e.g. a local test server
    pub fn with_base_endpoint(mut self, base_endpoint: impl Into<String>) -> Self {
        self.base_endpoint = Some(base_endpoint.into());
        self
    }

    /// Load configuration from the environment
    ///
    /// **Environment Variables**:
    /// - `PUSHER_INSTANCE_ID` (required)
    /// - `PUSHER_SECRET_KEY` (required)
    /// - `PUSHER_REQUEST_TIMEOUT_SECS` (default: 60)
    /// - `PUSHER_BASE_ENDPOINT` (optional)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let instance_id = lookup("PUSHER_INSTANCE_ID").ok_or_else(|| {
            ClientError::Configuration("PUSHER_INSTANCE_ID environment variable not set".to_string())
        })?;
        let secret_key = lookup("PUSHER_SECRET_KEY").ok_or_else(|| {
            ClientError::Configuration("PUSHER_SECRET_KEY environment variable not set".to_string())
        })?;

        let mut config = Self::new(instance_id, secret_key);

        if let Some(secs) = lookup("PUSHER_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|e| {
                ClientError::Configuration(format!(
                    "Invalid PUSHER_REQUEST_TIMEOUT_SECS '{secs}': {e}"
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(endpoint) = lookup("PUSHER_BASE_ENDPOINT") {
            config.base_endpoint = Some(endpoint);
        }

        Ok(config)
    }

    /// Reject empty credentials
    pub fn validate(&self) -> Result<()> {
        if self.instance_id.is_empty() {
            return Err(ClientError::Configuration(
                "Instance Id cannot be an empty string".to_string(),
            ));
        }
        if self.secret_key.is_empty() {
            return Err(ClientError::Configuration(
                "Secret Key cannot be an empty string".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ClientError::Configuration(
                "Request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL all publish requests are sent to, without a trailing slash
    pub fn base_endpoint(&self) -> String {
        match &self.base_endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.pushnotifications.pusher.com", self.instance_id),
        }
    }
}
