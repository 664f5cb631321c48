//! Transaction helpers shared by the service layer.

use sqlx::{PgPool, Postgres, Transaction};

use bookhub_core::error::{AppError, ErrorKind};
use bookhub_core::result::AppResult;

pub(crate) async fn begin(pool: &PgPool) -> AppResult<Transaction<'_, Postgres>> {
    pool.begin()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e))
}

pub(crate) async fn commit(tx: Transaction<'_, Postgres>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e))
}
