//! Telco Billing Database Layer
//!
//! This crate provides database access for both binaries:
//!
//! - SQLite pool and repository backing the billing REST service
//! - Scoped PostgreSQL connections and batch insert statements for the
//!   telecom relational sink

pub mod pool;
pub mod repositories;

pub use pool::{connect_telecom, create_billing_pool, create_memory_pool};
pub use repositories::*;

// Re-export commonly used types
pub use sqlx::{PgConnection, SqlitePool};
pub use telco_core::{AppError, AppResult};
