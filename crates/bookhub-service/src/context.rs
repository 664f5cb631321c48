//! Request context carrying the authenticated caller's identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current authenticated request.
///
/// Extracted from the bearer token by the API layer and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller's directory security identifier.
    pub user_sid: String,
    /// Display name from the token claims.
    pub display_name: String,
    /// Email address from the token claims.
    pub email: String,
    /// Whether the caller belongs to the administrative group.
    pub is_admin: bool,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_sid: String, display_name: String, email: String, is_admin: bool) -> Self {
        Self {
            user_sid,
            display_name,
            email,
            is_admin,
            request_time: Utc::now(),
        }
    }
}
