//! Publish client: validation, request construction and response handling

use crate::config::ClientConfig;
use crate::error::{ClientError, Result, TransportError};
use crate::request::{build_publish_request, payload_to_object, publish_headers, Target};
use crate::signer::Signer;
use crate::transport::{HttpResponse, ReqwestTransport, Transport};
use crate::types::{Payload, PublishErrorResponse, PublishResponse};
use crate::validation::{validate_interests, validate_user_ids};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Serialize;
use std::future::Future;
use tracing::{debug, info, warn};

/// Push notifications server API
pub trait PushNotifications: Send + Sync + 'static {
    /// Publish to all devices subscribed to at least one of `interests`
    ///
    /// The identifiers are injected into `payload` under `interests`.
    /// Returns the publish id assigned by the service.
    fn publish_to_interests<I, P>(
        &self,
        interests: &[I],
        payload: &P,
    ) -> impl Future<Output = Result<String>> + Send
    where
        I: AsRef<str> + Sync,
        P: Serialize + ?Sized + Sync;

    /// Alias for [`publish_to_interests`](Self::publish_to_interests)
    fn publish<I, P>(
        &self,
        interests: &[I],
        payload: &P,
    ) -> impl Future<Output = Result<String>> + Send
    where
        I: AsRef<str> + Sync,
        P: Serialize + ?Sized + Sync,
    {
        self.publish_to_interests(interests, payload)
    }

    /// Publish to all devices of the given authenticated users
    fn publish_to_users<U, P>(
        &self,
        users: &[U],
        payload: &P,
    ) -> impl Future<Output = Result<String>> + Send
    where
        U: AsRef<[u8]> + Sync,
        P: Serialize + ?Sized + Sync;

    /// Create a signed JWT that lets `user_id` receive notifications
    fn authenticate_user(&self, user_id: &str) -> Result<String>;
}

/// Client for the publish API
///
/// Holds no mutable state: clone it or share it behind an `Arc` across
/// tasks.
#[derive(Clone)]
pub struct PushNotificationsClient<T = ReqwestTransport> {
    instance_id: String,
    base_endpoint: String,
    headers: HeaderMap,
    signer: Signer,
    transport: T,
}

impl PushNotificationsClient<ReqwestTransport> {
    /// Create a client with default settings
    ///
    /// Fails if `instance_id` or `secret_key` is empty.
    pub fn new(instance_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(instance_id, secret_key))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.request_timeout).map_err(|e| {
            ClientError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> PushNotificationsClient<T> {
    /// Create a client that sends requests through `transport`
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;

        let base_endpoint = config.base_endpoint();
        let headers = publish_headers(&config.secret_key)?;
        let signer = Signer::new(&config.instance_id, &config.secret_key);

        info!(
            instance_id = %config.instance_id,
            base_endpoint = %base_endpoint,
            timeout_secs = config.request_timeout.as_secs(),
            "Created push notifications client"
        );

        Ok(Self {
            instance_id: config.instance_id,
            base_endpoint,
            headers,
            signer,
            transport,
        })
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn base_endpoint(&self) -> &str {
        &self.base_endpoint
    }

    /// Get the transport (for advanced usage)
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a publish and interpret the reply
    async fn publish_to_api(&self, payload: Payload, target: Target) -> Result<String> {
        let kind = target.key();
        let count = target.len();
        let request = build_publish_request(
            &self.base_endpoint,
            &self.instance_id,
            self.headers.clone(),
            payload,
            target,
        )?;

        debug!(
            instance_id = %self.instance_id,
            target = kind,
            count = count,
            "Publishing notification"
        );

        let response = self.transport.execute(request).await.map_err(|source| {
            warn!(
                instance_id = %self.instance_id,
                target = kind,
                error = %source,
                "Publish failed due to a network error"
            );
            network_error(source)
        })?;

        let publish_id = interpret_response(response)?;
        info!(
            instance_id = %self.instance_id,
            target = kind,
            publish_id = %publish_id,
            "Notification published"
        );

        Ok(publish_id)
    }
}

fn network_error(source: TransportError) -> ClientError {
    let context = match &source {
        TransportError::Body(_) => {
            "failed to read publish notification response due to a network error"
        }
        _ => "failed to publish notifications due to a network error",
    };
    ClientError::Network { context, source }
}

/// Turn a raw publish API response into a publish id or an error
pub fn interpret_response(response: HttpResponse) -> Result<String> {
    if response.status == StatusCode::OK {
        let body: PublishResponse =
            serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
                context: "failed to read publish notification response due to invalid JSON",
                source,
            })?;
        return Ok(body.publish_id);
    }

    let body: PublishErrorResponse =
        serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
            context: "failed to read publish notification response due to invalid JSON",
            source,
        })?;

    let error = body.error.unwrap_or_default();
    let description = body.description.unwrap_or_default();

    warn!(
        status = %response.status,
        error = %error,
        description = %description,
        "Publish rejected by the service"
    );

    Err(ClientError::Api {
        status: response.status.as_u16(),
        error,
        description,
    })
}

impl<T: Transport> PushNotifications for PushNotificationsClient<T> {
    async fn publish_to_interests<I, P>(&self, interests: &[I], payload: &P) -> Result<String>
    where
        I: AsRef<str> + Sync,
        P: Serialize + ?Sized + Sync,
    {
        let interests = validate_interests(interests)?;
        let payload = payload_to_object(payload)?;
        self.publish_to_api(payload, Target::Interests(interests)).await
    }

    async fn publish_to_users<U, P>(&self, users: &[U], payload: &P) -> Result<String>
    where
        U: AsRef<[u8]> + Sync,
        P: Serialize + ?Sized + Sync,
    {
        let users = validate_user_ids(users)?;
        let payload = payload_to_object(payload)?;
        self.publish_to_api(payload, Target::Users(users)).await
    }

    fn authenticate_user(&self, user_id: &str) -> Result<String> {
        let token = self.signer.sign_user_token(user_id)?;
        debug!(instance_id = %self.instance_id, user_id = %user_id, "Issued user token");
        Ok(token)
    }
}
