//! JWT token creation with configurable signing and TTL.
//!
//! Production tokens come from the identity provider; the encoder is used
//! by operational tooling and integration tests that need valid tokens.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use bookhub_core::config::AuthConfig;
use bookhub_core::error::AppError;

use super::claims::Claims;

/// Creates signed JWT tokens compatible with the decoder's validation.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token lifetime in hours.
    expiry_hours: i64,
    /// Issuer claim value.
    issuer: String,
    /// Audience claim value.
    audience: String,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            expiry_hours: config.expiry_hours as i64,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Generates a signed token for the given user identity.
    pub fn generate_token(
        &self,
        user_sid: &str,
        name: &str,
        email: &str,
        groups: Vec<String>,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::hours(self.expiry_hours);

        let claims = Claims {
            sub: user_sid.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            groups,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
