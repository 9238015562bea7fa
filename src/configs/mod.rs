use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{api::error, ENV};

pub async fn connect_database() -> Result<PgPool, error::SystemError> {
    let database_url = &ENV.database_url;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| error::SystemError::DatabaseError(e.to_string().into()))?;

    Ok(pool)
}

/// Idempotent; called at startup and safe to call again before any write.
pub async fn ensure_upload_dir() -> Result<(), error::SystemError> {
    tokio::fs::create_dir_all(&ENV.upload_dir).await?;
    Ok(())
}
