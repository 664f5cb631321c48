//! Directory lookup trait and implementations.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bookhub_core::config::DirectoryConfig;
use bookhub_core::result::AppResult;

/// A user record resolved from the organizational directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Directory SID.
    pub sid: String,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub email: String,
    /// Group memberships.
    pub groups: Vec<String>,
}

/// Resolves directory SIDs to user records.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Look up a user by SID. `Ok(None)` means the SID is unknown to the
    /// directory; `Err` means the directory itself could not be reached.
    async fn find_by_sid(&self, sid: &str) -> AppResult<Option<DirectoryUser>>;
}

/// In-process directory backed by a seeded map.
///
/// Stands in for the LDAP-backed implementation in deployments without
/// directory connectivity, and carries integration tests.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    users: RwLock<HashMap<String, DirectoryUser>>,
}

impl StaticDirectory {
    /// Create an empty directory.
    pub fn new(config: &DirectoryConfig) -> Self {
        debug!(
            host = %config.host,
            port = config.port,
            "Using static directory backend"
        );
        Self::default()
    }

    /// Seed or replace a user record.
    pub fn insert(&self, user: DirectoryUser) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.sid.clone(), user);
        }
    }
}

#[async_trait]
impl DirectoryService for StaticDirectory {
    async fn find_by_sid(&self, sid: &str) -> AppResult<Option<DirectoryUser>> {
        let users = self
            .users
            .read()
            .map_err(|_| bookhub_core::error::AppError::internal("Directory store poisoned"))?;
        Ok(users.get(sid).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_returns_seeded_user() {
        let dir = StaticDirectory::default();
        dir.insert(DirectoryUser {
            sid: "S-1-5-21-1001".to_string(),
            display_name: "Erika Mustermann".to_string(),
            email: "erika@example.com".to_string(),
            groups: vec!["Staff".to_string()],
        });

        let user = dir.find_by_sid("S-1-5-21-1001").await.unwrap();
        assert_eq!(user.unwrap().email, "erika@example.com");
    }

    #[tokio::test]
    async fn unknown_sid_is_none() {
        let dir = StaticDirectory::default();
        assert!(dir.find_by_sid("S-1-5-21-9999").await.unwrap().is_none());
    }
}
