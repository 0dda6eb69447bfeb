//! HS256 signing of user authentication tokens

use crate::error::Result;
use crate::types::UserClaims;
use crate::validation::validate_user_id;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// Lifetime of a user authentication token
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Signs user authentication tokens with the instance secret key
#[derive(Clone)]
pub struct Signer {
    encoding_key: EncodingKey,
    issuer: String,
}

impl Signer {
    /// Create a new signer for an instance
    ///
    /// # Arguments
    /// * `instance_id` - Instance the tokens are issued for
    /// * `secret_key` - Instance secret key, used as the HMAC key
    pub fn new(instance_id: &str, secret_key: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret_key.as_bytes()),
            issuer: format!("https://{instance_id}.pushnotifications.pusher.com"),
        }
    }

    /// Issuer claim placed in every token
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Build the claim set for a user id, expiring 24 hours from now
    pub fn claims_for(&self, user_id: &str) -> UserClaims {
        UserClaims {
            sub: user_id.to_string(),
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            iss: self.issuer.clone(),
        }
    }

    /// Sign a token proving that `user_id` may receive notifications
    /// addressed to it
    ///
    /// Returns a compact JWT: `header.claims.signature`, each segment
    /// base64url encoded.
    pub fn sign_user_token(&self, user_id: &str) -> Result<String> {
        validate_user_id(user_id)?;

        let claims = self.claims_for(user_id);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(token)
    }
}
