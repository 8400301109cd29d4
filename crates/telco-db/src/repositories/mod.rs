//! Repository implementations
//!
//! Concrete sqlx-backed stores for the billing table and the telecom
//! customer/subscription tables.

pub mod billing_repo;
pub mod telecom_repo;

pub use billing_repo::SqliteBillingRepository;
pub use telecom_repo::{ensure_telecom_schema, execute_batch, InsertRow};
