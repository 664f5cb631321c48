//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// SMTP relay settings for booking/cancellation notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether outbound mail is enabled at all.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP relay hostname.
    #[serde(default = "default_host")]
    pub host: String,
    /// SMTP relay port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: String,
    /// SMTP password.
    #[serde(default)]
    pub password: String,
    /// Sender address on outgoing mail.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Group address copied on administrative notifications.
    #[serde(default)]
    pub group_address: String,
    /// Whether to use SSL for the relay connection.
    #[serde(default = "default_true")]
    pub use_ssl: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            from_address: default_from(),
            group_address: String::new(),
            use_ssl: true,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    465
}

fn default_from() -> String {
    "noreply@bookhub.local".to_string()
}

fn default_true() -> bool {
    true
}
