//! Telco Billing Core Library
//!
//! This crate provides the foundational types and error handling shared by
//! the billing REST service and the synthetic data generator. It includes:
//!
//! - Domain models (Customer, SubscriptionStatus, CallRecord, BillingInfo)
//! - Unified error handling with HTTP response mapping
//! - Application configuration for both binaries

pub mod config;
pub mod error;
pub mod models;

pub use config::{ApiConfig, GeneratorConfig};
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
