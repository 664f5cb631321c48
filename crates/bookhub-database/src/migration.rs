//! Embedded schema migrations.
//!
//! The migration set ships inside the binary so a fresh database reaches
//! the current schema on first start, without a separate deploy step.

use sqlx::PgPool;
use tracing::info;

use bookhub_core::error::{AppError, ErrorKind};
use bookhub_core::result::AppResult;

/// Apply any migrations the database has not seen yet.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Schema migration failed", e))?;

    info!("Database schema is up to date");
    Ok(())
}
