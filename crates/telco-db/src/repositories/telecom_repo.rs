//! Telecom relational writer
//!
//! Insert statements for the Customer and SubscriptionStatus tables of the
//! PostgreSQL telecom database. A batch runs one statement per record on a
//! caller-owned connection; the first failing row aborts the batch.

use sqlx::postgres::{PgArguments, PgConnection};
use sqlx::query::Query;
use sqlx::Postgres;
use telco_core::models::{Customer, SubscriptionStatus};
use telco_core::{AppError, AppResult};
use tracing::{debug, error, info, instrument};

/// A record with a parameterized insert statement
pub trait InsertRow {
    /// Target table, for logging
    const TABLE: &'static str;

    /// Insert statement with positional parameters
    const INSERT_SQL: &'static str;

    /// Bind this record's values in statement order
    fn bind_row<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments>;
}

impl InsertRow for Customer {
    const TABLE: &'static str = "Customer";

    const INSERT_SQL: &'static str = r#"
        INSERT INTO Customer (
            id, first_name, last_name, email, phone_number,
            district_code, date_of_birth, gender, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    "#;

    fn bind_row<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        query
            .bind(self.id.hyphenated().to_string())
            .bind(&self.first_name)
            .bind(&self.last_name)
            .bind(&self.email)
            .bind(&self.phone_number)
            .bind(self.district_code)
            .bind(self.date_of_birth)
            .bind(self.gender.as_str())
            .bind(self.created_at)
    }
}

impl InsertRow for SubscriptionStatus {
    const TABLE: &'static str = "SubscriptionStatus";

    const INSERT_SQL: &'static str = r#"
        INSERT INTO SubscriptionStatus (
            id, customer_id, plan_id, start_date, end_date
        )
        VALUES ($1, $2, $3, $4, $5)
    "#;

    fn bind_row<'q>(
        &'q self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        query
            .bind(self.id.hyphenated().to_string())
            .bind(self.customer_id.hyphenated().to_string())
            .bind(self.plan_id)
            .bind(self.start_date)
            .bind(self.end_date)
    }
}

/// Execute the record's insert once per row on the given connection
///
/// Returns the number of rows written.
#[instrument(skip(conn, rows), fields(table = T::TABLE, batch = rows.len()))]
pub async fn execute_batch<T: InsertRow>(conn: &mut PgConnection, rows: &[T]) -> AppResult<u64> {
    debug!("Writing {} rows to {}", rows.len(), T::TABLE);

    let mut written = 0;
    for row in rows {
        let result = row
            .bind_row(sqlx::query(T::INSERT_SQL))
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("Failed to insert into {}: {}", T::TABLE, e);
                AppError::from(e)
            })?;
        written += result.rows_affected();
    }

    info!("Wrote {} rows to {}", written, T::TABLE);
    Ok(written)
}

/// Create the Customer and SubscriptionStatus tables if missing
#[instrument(skip(conn))]
pub async fn ensure_telecom_schema(conn: &mut PgConnection) -> AppResult<()> {
    const STATEMENTS: [&str; 2] = [
        r#"
        CREATE TABLE IF NOT EXISTS Customer (
            id CHAR(36) PRIMARY KEY,
            first_name VARCHAR(100),
            last_name VARCHAR(100),
            email VARCHAR(255),
            phone_number VARCHAR(20),
            district_code INTEGER,
            date_of_birth DATE,
            gender VARCHAR(10),
            created_at DATE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS SubscriptionStatus (
            id CHAR(36) PRIMARY KEY,
            customer_id CHAR(36) REFERENCES Customer (id),
            plan_id INTEGER,
            start_date DATE,
            end_date DATE
        )
        "#,
    ];

    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("Failed to create telecom schema: {}", e);
                AppError::Database(format!("Failed to create telecom schema: {}", e))
            })?;
    }

    info!("Telecom schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_placeholders_match_columns() {
        assert!(Customer::INSERT_SQL.contains("$9"));
        assert!(!Customer::INSERT_SQL.contains("$10"));
        assert!(SubscriptionStatus::INSERT_SQL.contains("$5"));
        assert!(!SubscriptionStatus::INSERT_SQL.contains("$6"));
    }
}
