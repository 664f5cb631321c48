//! # bookhub-notify
//!
//! Outbound notifications for booking and cancellation events.
//!
//! Delivery is strictly best-effort: a reservation that committed stays
//! committed whether or not the mail relay cooperates. The dispatcher
//! therefore logs and swallows every mailer failure.

pub mod dispatcher;
pub mod mailer;

pub use dispatcher::NotificationDispatcher;
pub use mailer::{Mailer, NoopMailer, SmtpMailer};
