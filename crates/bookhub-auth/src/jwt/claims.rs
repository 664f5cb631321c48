//! JWT claims structure carried in identity-provider tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims payload embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's directory SID.
    pub sub: String,
    /// Display name for notifications and logging.
    pub name: String,
    /// Email address for notifications.
    pub email: String,
    /// Directory group memberships.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Token issuer.
    pub iss: String,
    /// Intended audience.
    pub aud: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user's directory SID from the subject claim.
    pub fn user_sid(&self) -> &str {
        &self.sub
    }

    /// Whether the token carries membership in the given directory group.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
