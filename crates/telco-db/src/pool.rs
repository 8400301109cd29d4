//! Connection management
//!
//! The billing service keeps a small SQLite pool for its lifetime. The
//! generator never pools: it opens one PostgreSQL connection per batch pair
//! and closes it when the pair is written.

use sqlx::postgres::PgConnection;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Connection;
use std::time::Duration;
use telco_core::{AppError, AppResult};
use tracing::{debug, info, warn};

/// Default maximum number of connections in the billing pool
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default connection acquire timeout in seconds
const DEFAULT_CONNECT_TIMEOUT: u64 = 30;

/// Create the SQLite pool backing the billing service
///
/// # Arguments
///
/// * `database_url` - SQLite connection URL (e.g., "sqlite://billing.db?mode=rwc")
/// * `max_connections` - Maximum number of connections in the pool (None = default)
pub async fn create_billing_pool(
    database_url: &str,
    max_connections: Option<u32>,
) -> AppResult<SqlitePool> {
    info!("Creating billing database pool");

    let max_conns = max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_conns)
        .acquire_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT))
        .connect(database_url)
        .await
        .map_err(|e| {
            warn!("Failed to create billing pool: {}", e);
            AppError::Pool(format!("Failed to connect to database: {}", e))
        })?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Database health check failed: {}", e)))?;

    info!(
        "Billing pool created successfully with {} max connections",
        max_conns
    );

    Ok(pool)
}

/// Create a single-connection in-memory SQLite pool
///
/// The connection is never recycled, so the database lives as long as the pool.
pub async fn create_memory_pool() -> AppResult<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .map_err(|e| AppError::Pool(format!("Failed to open in-memory database: {}", e)))
}

/// Open a dedicated connection to the telecom PostgreSQL database
///
/// Statements run outside any explicit transaction, so every insert is
/// committed on its own.
pub async fn connect_telecom(database_url: &str) -> AppResult<PgConnection> {
    debug!("Opening telecom database connection");

    PgConnection::connect(database_url).await.map_err(|e| {
        warn!("Failed to connect to telecom database: {}", e);
        AppError::Pool(format!("Failed to connect to telecom database: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_pool_is_shared() {
        let pool = create_memory_pool().await.unwrap();
        sqlx::query("CREATE TABLE t (x INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO t (x) VALUES (1)")
            .execute(&pool)
            .await
            .unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_connect_telecom() {
        let database_url = std::env::var("TELECOM_DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://postgres@localhost:5432/telecomdb".to_string());

        let conn = connect_telecom(&database_url).await;
        assert!(conn.is_ok());
    }
}
