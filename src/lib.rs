//! Push Notifications Rust Client
//!
//! A server-side client for the push notifications publish API: publish a
//! payload to devices subscribed to interests or to authenticated users, and
//! issue signed tokens that let a user id receive notifications.

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod signer;
pub mod transport;
pub mod types;
pub mod validation;

pub use client::{PushNotifications, PushNotificationsClient};
pub use config::ClientConfig;
pub use error::{ClientError, Result, TransportError};
pub use signer::Signer;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::{Payload, UserClaims};
