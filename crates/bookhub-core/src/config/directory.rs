//! External directory service configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the organizational directory server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Directory server hostname.
    #[serde(default = "default_host")]
    pub host: String,
    /// Directory server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Search base distinguished name.
    #[serde(default)]
    pub base_dn: String,
    /// Whether to connect over SSL.
    #[serde(default)]
    pub use_ssl: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_dn: String::new(),
            use_ssl: false,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    389
}
