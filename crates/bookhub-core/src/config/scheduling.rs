//! Slot scheduling configuration.
//!
//! Injected into the domain layer at startup; domain logic never reads
//! ambient process state.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Scheduling policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// IANA name of the deployment's organizational time zone.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Maximum number of interested users per event waitlist.
    #[serde(default = "default_max_interested")]
    pub max_interested_users: usize,
}

impl SchedulingConfig {
    /// Reject unknown time zone names at startup rather than per request.
    pub fn validate(&self) -> Result<(), AppError> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| {
                AppError::configuration(format!(
                    "scheduling.timezone '{}' is not a known IANA time zone",
                    self.timezone
                ))
            })
            .map(|_| ())
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            max_interested_users: default_max_interested(),
        }
    }
}

fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}

fn default_max_interested() -> usize {
    4
}
