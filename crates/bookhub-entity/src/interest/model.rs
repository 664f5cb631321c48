//! Waitlist interest entry model and capacity policy.
//!
//! The interest list is a bounded, first-come reserved extension point:
//! capacity and duplicate checks are enforced here, but no promotion
//! workflow exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookhub_core::config::SchedulingConfig;
use bookhub_core::types::{EventId, InterestEntryId};

use crate::error::ScheduleError;

/// A user's registered interest in a fully-booked event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterestEntry {
    /// Unique entry identifier.
    pub id: InterestEntryId,
    /// The event this entry belongs to.
    pub event_id: EventId,
    /// Directory security identifier of the interested user.
    pub user_sid: String,
    /// When the interest was registered.
    pub created_at: DateTime<Utc>,
}

/// Capacity policy for the interest list, injected at startup.
///
/// Domain logic never reads this from ambient process state.
#[derive(Debug, Clone, Copy)]
pub struct InterestPolicy {
    /// Maximum number of entries per event.
    pub max_interested_users: usize,
}

impl InterestPolicy {
    /// Build the policy from deployment configuration.
    pub fn from_config(config: &SchedulingConfig) -> Self {
        Self {
            max_interested_users: config.max_interested_users,
        }
    }

    /// Check whether a new entry may be added given the event's current
    /// entries. First-come uniqueness per user, capped at the configured
    /// ceiling.
    pub fn check_admission(
        &self,
        current: &[InterestEntry],
        user_sid: &str,
    ) -> Result<(), ScheduleError> {
        if current.iter().any(|e| e.user_sid == user_sid) {
            return Err(ScheduleError::DuplicateInterest);
        }
        if current.len() >= self.max_interested_users {
            return Err(ScheduleError::CapacityExceeded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user_sid: &str) -> InterestEntry {
        InterestEntry {
            id: InterestEntryId::new(),
            event_id: EventId::new(),
            user_sid: user_sid.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_admission_below_capacity() {
        let policy = InterestPolicy {
            max_interested_users: 4,
        };
        let current = vec![entry("S-1"), entry("S-2")];
        assert!(policy.check_admission(&current, "S-3").is_ok());
    }

    #[test]
    fn test_duplicate_rejected_before_capacity() {
        let policy = InterestPolicy {
            max_interested_users: 2,
        };
        let current = vec![entry("S-1"), entry("S-2")];
        assert_eq!(
            policy.check_admission(&current, "S-1").unwrap_err(),
            ScheduleError::DuplicateInterest
        );
    }

    #[test]
    fn test_capacity_ceiling_enforced() {
        let policy = InterestPolicy {
            max_interested_users: 2,
        };
        let current = vec![entry("S-1"), entry("S-2")];
        assert_eq!(
            policy.check_admission(&current, "S-3").unwrap_err(),
            ScheduleError::CapacityExceeded
        );
    }
}
