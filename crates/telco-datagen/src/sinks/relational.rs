//! PostgreSQL sink for customers and subscriptions

use super::RelationalSink;
use crate::error::GenResult;
use async_trait::async_trait;
use sqlx::Connection;
use telco_core::models::{Customer, SubscriptionStatus};
use telco_db::{connect_telecom, ensure_telecom_schema, execute_batch, PgConnection};
use tracing::{info, instrument, warn};

/// Writes batch pairs over a connection scoped to each call
pub struct PostgresSink {
    database_url: String,
}

impl PostgresSink {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Create the telecom tables if they are missing
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> GenResult<()> {
        let mut conn = connect_telecom(&self.database_url).await?;
        let result = ensure_telecom_schema(&mut conn).await;
        close(conn).await;
        Ok(result?)
    }

    async fn write_all(
        conn: &mut PgConnection,
        customers: &[Customer],
        subscriptions: &[SubscriptionStatus],
    ) -> GenResult<()> {
        let customers_written = execute_batch(conn, customers).await?;
        let subscriptions_written = execute_batch(conn, subscriptions).await?;

        info!(
            customers = customers_written,
            subscriptions = subscriptions_written,
            "Telecom batch written"
        );
        Ok(())
    }
}

#[async_trait]
impl RelationalSink for PostgresSink {
    #[instrument(skip_all, fields(customers = customers.len(), subscriptions = subscriptions.len()))]
    async fn write_batches(
        &self,
        customers: &[Customer],
        subscriptions: &[SubscriptionStatus],
    ) -> GenResult<()> {
        let mut conn = connect_telecom(&self.database_url).await?;
        let result = Self::write_all(&mut conn, customers, subscriptions).await;
        close(conn).await;
        result
    }
}

/// Close a connection whether or not the work on it succeeded
async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        warn!("Failed to close telecom connection: {}", e);
    }
}
