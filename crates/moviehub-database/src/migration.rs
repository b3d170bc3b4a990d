//! Embedded schema migrations.

use tracing::info;

use moviehub_core::error::{AppError, ErrorKind};

use crate::connection::DatabasePool;

/// Apply every pending migration from `migrations/`.
pub async fn run_migrations(db: &DatabasePool) -> Result<(), AppError> {
    info!("Running database migrations");

    sqlx::migrate!("../../migrations")
        .run(db.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to run migrations", e))?;

    info!("Database migrations complete");
    Ok(())
}
