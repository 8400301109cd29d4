//! Destinations for fabricated batches
//!
//! Each trait is one external system the pipeline writes to. Production
//! implementations live in the submodules; tests substitute mocks.

use crate::error::GenResult;
use async_trait::async_trait;
use bytes::Bytes;
use telco_core::models::{BillingInfo, Customer, SubscriptionStatus};

pub mod http;
pub mod object_storage;
pub mod relational;

pub use http::HttpBillingSink;
pub use object_storage::ObjectStorageSink;
pub use relational::PostgresSink;

/// Blob store receiving CSV exports
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectSink: Send + Sync {
    /// Make sure the bucket exists, then store `payload` under `path`
    async fn write_object(&self, path: &str, payload: Bytes) -> GenResult<()>;
}

/// Relational store for customers and their subscriptions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationalSink: Send + Sync {
    /// Insert customers first, then subscriptions
    async fn write_batches(
        &self,
        customers: &[Customer],
        subscriptions: &[SubscriptionStatus],
    ) -> GenResult<()>;
}

/// Billing REST service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillingSink: Send + Sync {
    /// Submit one batch and return the service's confirmation message
    async fn post_batch(&self, records: &[BillingInfo]) -> GenResult<String>;
}
