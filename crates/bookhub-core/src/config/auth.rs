//! Token verification configuration.
//!
//! Token issuance belongs to an external signing service that shares the
//! HMAC secret with this deployment; BookHub only verifies.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum acceptable HMAC secret length in bytes.
const MIN_SECRET_LENGTH: usize = 32;

/// JWT verification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for JWT signature verification (HMAC-SHA256).
    pub jwt_secret: String,
    /// Expected token issuer.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Expected token audience.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Token lifetime in hours (used by the local encoder and test tooling).
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: u64,
    /// Directory group whose members may use administrative endpoints.
    #[serde(default = "default_admin_group")]
    pub admin_group: String,
}

impl AuthConfig {
    /// Reject secrets too short for HS256.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    "bookhub".to_string()
}

fn default_audience() -> String {
    "bookhub-clients".to_string()
}

fn default_expiry_hours() -> u64 {
    10
}

fn default_admin_group() -> String {
    "BookHub-Admins".to_string()
}
