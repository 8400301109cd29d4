//! Billing repository implementation
//!
//! SQLite-backed storage for the billing REST service. Rows come back in
//! insertion order so offset pagination is stable.

use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};
use telco_core::{models::BillingInfo, AppError, AppResult};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const BILLING_SELECT_COLUMNS: &str = r#"
    id, customer_id, plan_id, billing_date,
    total_charges, data_charges, roaming_charges,
    data_usage, sms_count
"#;

/// Database row representation of a billing statement
#[derive(Debug, FromRow)]
struct BillingRow {
    id: String,
    customer_id: String,
    plan_id: i32,
    billing_date: NaiveDate,
    total_charges: f64,
    data_charges: f64,
    roaming_charges: f64,
    data_usage: f64,
    sms_count: i32,
}

impl TryFrom<BillingRow> for BillingInfo {
    type Error = AppError;

    fn try_from(row: BillingRow) -> Result<Self, Self::Error> {
        let customer_id = Uuid::parse_str(&row.customer_id).map_err(|e| {
            AppError::Database(format!(
                "Stored customer_id {} is not a UUID: {}",
                row.customer_id, e
            ))
        })?;

        Ok(BillingInfo {
            id: row.id,
            customer_id,
            plan_id: row.plan_id,
            billing_date: row.billing_date,
            total_charges: row.total_charges,
            data_charges: row.data_charges,
            roaming_charges: row.roaming_charges,
            data_usage: row.data_usage,
            sms_count: row.sms_count,
        })
    }
}

/// SQLite implementation of the billing store
pub struct SqliteBillingRepository {
    pool: SqlitePool,
}

impl SqliteBillingRepository {
    /// Create a new billing repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the BillingInfo table if it does not exist
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS BillingInfo (
                id VARCHAR(100) PRIMARY KEY,
                customer_id CHAR(36) CHECK(length(customer_id) = 36),
                plan_id SMALLINT,
                billing_date DATE,
                total_charges FLOAT,
                data_charges FLOAT,
                roaming_charges FLOAT,
                data_usage FLOAT,
                sms_count INTEGER
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create BillingInfo table: {}", e);
            AppError::Database(format!("Failed to create BillingInfo table: {}", e))
        })?;

        info!("BillingInfo table ready");
        Ok(())
    }

    /// List statements with offset pagination
    #[instrument(skip(self))]
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<BillingInfo>> {
        debug!("Listing billing records: skip={}, limit={}", skip, limit);

        let query = format!(
            "SELECT {} FROM BillingInfo ORDER BY rowid LIMIT ? OFFSET ?",
            BILLING_SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<sqlx::Sqlite, BillingRow>(&query)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error listing billing records: {}", e);
                AppError::Database(format!("Failed to list billing records: {}", e))
            })?;

        rows.into_iter().map(BillingInfo::try_from).collect()
    }

    /// Count stored statements
    #[instrument(skip(self))]
    pub async fn count(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM BillingInfo")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to count billing records: {}", e)))?;

        Ok(count)
    }

    /// Insert a batch of statements
    ///
    /// The batch is written in one transaction: a duplicate id or a failed
    /// constraint rejects the whole batch.
    #[instrument(skip(self, records), fields(batch = records.len()))]
    pub async fn insert_batch(&self, records: &[BillingInfo]) -> AppResult<u64> {
        debug!("Inserting {} billing records", records.len());

        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to start transaction: {}", e);
            AppError::Transaction(format!("Failed to start transaction: {}", e))
        })?;

        let mut inserted = 0;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT INTO BillingInfo (
                    id, customer_id, plan_id, billing_date,
                    total_charges, data_charges, roaming_charges,
                    data_usage, sms_count
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.id)
            .bind(record.customer_id.hyphenated().to_string())
            .bind(record.plan_id)
            .bind(record.billing_date)
            .bind(record.total_charges)
            .bind(record.data_charges)
            .bind(record.roaming_charges)
            .bind(record.data_usage)
            .bind(record.sms_count)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to insert billing record {}: {}", record.id, e);
                AppError::from(e)
            })?;

            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            error!("Failed to commit transaction: {}", e);
            AppError::Transaction(format!("Failed to commit transaction: {}", e))
        })?;

        info!("Inserted {} billing records", inserted);
        Ok(inserted)
    }

    /// Remove every statement
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM BillingInfo")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to delete billing records: {}", e);
                AppError::Database(format!("Failed to delete billing records: {}", e))
            })?;

        info!("Deleted {} billing records", result.rows_affected());
        Ok(result.rows_affected())
    }
}
