//! Postgres pool setup.
//!
//! Startup calls [`init_pool`] once; the schema in `migrations/` is applied
//! before the listener binds, so handlers can assume the `resumes` table.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect with at most `max_connections` and run pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;
    info!(max_connections, "database ready");

    Ok(pool)
}
