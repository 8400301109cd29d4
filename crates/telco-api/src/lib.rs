//! API layer for the billing service
//!
//! HTTP handlers exposing create/read/delete over the billing collection.

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::{ApiResponse, BatchBillingInfo, BillingPageParams};

// Re-export handler configuration functions
pub use handlers::configure_billings;
