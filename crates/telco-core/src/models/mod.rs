//! Domain models for the telco dataset
//!
//! The four record kinds fabricated by the generator and persisted by the
//! sinks. All of them are plain immutable values once created.

pub mod billing;
pub mod call_record;
pub mod customer;
pub mod subscription;

pub use billing::{BillingInfo, MAX_TOTAL_CHARGES};
pub use call_record::{CallRecord, CallType};
pub use customer::{Customer, Gender};
pub use subscription::SubscriptionStatus;
