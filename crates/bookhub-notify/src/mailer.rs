//! Mail delivery trait and transports.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::debug;

use bookhub_core::config::MailConfig;
use bookhub_core::error::AppError;
use bookhub_core::result::AppResult;

/// Sends a rendered message to a recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message. Callers decide whether a failure matters.
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// SMTP mailer backed by lettre.
///
/// A fresh transport is built per message to avoid holding relay
/// connections across the long idle stretches between bookings.
#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Credentials,
    from_address: String,
    use_ssl: bool,
}

impl SmtpMailer {
    /// Create a mailer from the mail configuration section.
    pub fn new(config: &MailConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            credentials: Credentials::new(config.username.clone(), config.password.clone()),
            from_address: config.from_address.clone(),
            use_ssl: config.use_ssl,
        }
    }

    fn build_transport(&self) -> AppResult<SmtpTransport> {
        let builder = if self.use_ssl {
            SmtpTransport::relay(&self.host)
        } else {
            SmtpTransport::starttls_relay(&self.host)
        }
        .map_err(|e| {
            AppError::with_source(
                bookhub_core::error::ErrorKind::ExternalService,
                "Failed to configure SMTP relay",
                e,
            )
        })?;

        Ok(builder
            .port(self.port)
            .credentials(self.credentials.clone())
            .build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| AppError::internal(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::internal(format!("Invalid to address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::internal(format!("Failed to build email: {e}")))?;

        let transport = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            transport.send(&email).map_err(|e| {
                AppError::with_source(
                    bookhub_core::error::ErrorKind::ExternalService,
                    "Failed to send email",
                    e,
                )
            })
        })
        .await
        .map_err(|e| AppError::internal(format!("Email task failed: {e}")))??;

        Ok(())
    }
}

/// Mailer that drops every message. Used when outbound mail is disabled
/// and in tests.
#[derive(Debug, Clone, Default)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> AppResult<()> {
        debug!(%to, %subject, "Outbound mail disabled, dropping message");
        Ok(())
    }
}
