//! Database connection pool management
//!
//! The pool is the only process-wide resource. It is opened once at startup,
//! cloned into each store, and closed on shutdown.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection or the liveness check fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/upskilling_db").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with a custom connection limit.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    tracing::info!(max_connections, "database pool established");

    Ok(pool)
}

/// Close every connection in the pool, waiting for in-flight queries.
pub async fn close_pool(pool: &PgPool) {
    pool.close().await;
    tracing::info!("database pool closed");
}
