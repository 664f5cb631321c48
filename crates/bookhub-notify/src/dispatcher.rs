//! Renders and dispatches booking lifecycle notifications.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

use bookhub_entity::event::Event;

use crate::mailer::Mailer;

const BOOKING_SUBJECT: &str = "Your BookHub appointment is confirmed";
const CANCELLATION_SUBJECT: &str = "Your BookHub appointment was cancelled";
const ADMIN_CANCELLATION_SUBJECT: &str = "Your BookHub appointment was cancelled by an organizer";

/// Sends booking and cancellation notifications.
///
/// Every public method is infallible by contract: delivery problems are
/// logged and dropped so a committed reservation never unwinds over mail.
#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    /// Zone used to render slot instants as local wall-clock times.
    timezone: Tz,
    /// Group address copied on administrative cancellations, if set.
    group_address: Option<String>,
}

impl NotificationDispatcher {
    /// Create a dispatcher rendering times in the given zone.
    pub fn new(mailer: Arc<dyn Mailer>, timezone: Tz, group_address: Option<String>) -> Self {
        Self {
            mailer,
            timezone,
            group_address,
        }
    }

    /// Notify a user that their booking committed.
    pub async fn booking_confirmed(
        &self,
        email: &str,
        display_name: &str,
        event: &Event,
        slot_at: DateTime<Utc>,
    ) {
        let body = format!(
            "Hello {display_name},\n\n\
             your appointment for \"{}\" at {} is confirmed.\n\
             Slot: {}\n\n\
             This message was sent automatically.",
            event.title,
            event.location,
            self.format_local(slot_at),
        );
        self.deliver(email, BOOKING_SUBJECT, &body).await;
    }

    /// Notify a user that they cancelled their own booking.
    pub async fn booking_cancelled(
        &self,
        email: &str,
        display_name: &str,
        event: &Event,
        slot_at: DateTime<Utc>,
    ) {
        let body = format!(
            "Hello {display_name},\n\n\
             your appointment for \"{}\" on {} has been cancelled.\n\n\
             This message was sent automatically.",
            event.title,
            self.format_local(slot_at),
        );
        self.deliver(email, CANCELLATION_SUBJECT, &body).await;
    }

    /// Notify a user that an organizer cancelled their booking. The group
    /// address, when configured, receives a copy.
    pub async fn booking_cancelled_by_admin(
        &self,
        email: &str,
        display_name: &str,
        event: &Event,
        slot_at: DateTime<Utc>,
    ) {
        let body = format!(
            "Hello {display_name},\n\n\
             your appointment for \"{}\" on {} was cancelled by an organizer.\n\
             Please book a new slot if needed.\n\n\
             This message was sent automatically.",
            event.title,
            self.format_local(slot_at),
        );
        self.deliver(email, ADMIN_CANCELLATION_SUBJECT, &body).await;

        if let Some(group) = self.group_address.clone() {
            let copy = format!(
                "Reservation of {display_name} for \"{}\" on {} was cancelled by an organizer.",
                event.title,
                self.format_local(slot_at),
            );
            self.deliver(&group, ADMIN_CANCELLATION_SUBJECT, &copy).await;
        }
    }

    fn format_local(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.timezone)
            .format("%Y-%m-%d %H:%M (%Z)")
            .to_string()
    }

    async fn deliver(&self, to: &str, subject: &str, body: &str) {
        if let Err(e) = self.mailer.send(to, subject, body).await {
            warn!(%to, %subject, error = %e, "Notification delivery failed");
        }
    }
}
