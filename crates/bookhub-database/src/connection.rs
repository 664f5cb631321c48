//! Connection pool setup for the PostgreSQL store.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use bookhub_core::config::DatabaseConfig;
use bookhub_core::error::{AppError, ErrorKind};
use bookhub_core::result::AppResult;

/// Owns the sqlx pool during startup, before it is handed to the
/// repositories.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a pool against the configured PostgreSQL instance.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(url = %redact_url(&config.url), "Opening PostgreSQL pool");

        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Could not open database pool", e)
            })?;

        info!(
            max_connections = config.max_connections,
            "PostgreSQL pool ready"
        );
        Ok(Self { pool })
    }

    /// Borrow the pool, e.g. for the migration runner.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Hand the pool over to the repositories.
    pub fn into_pool(self) -> PgPool {
        self.pool
    }
}

/// Strip the credential section of a connection URL before logging it.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.split_once('@') {
        Some((_credentials, host)) => format!("{scheme}://<redacted>@{host}"),
        None => url.to_string(),
    }
}
