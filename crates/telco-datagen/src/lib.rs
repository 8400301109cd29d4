//! Telco Synthetic Data Generator
//!
//! Fabricates linked telecom datasets (customers, subscriptions, call
//! records and billing statements) and dispatches each batch to its
//! destination:
//!
//! - call records as CSV objects in a bucket
//! - customers and subscriptions to PostgreSQL
//! - billing statements to the billing REST service

pub mod csv_encoder;
pub mod error;
pub mod fabricator;
pub mod pipeline;
pub mod sinks;

pub use csv_encoder::encode_csv;
pub use error::{GenError, GenResult};
pub use fabricator::RecordFabricator;
pub use pipeline::{call_records_path, IterationReport, Pipeline};
pub use sinks::{
    BillingSink, HttpBillingSink, ObjectSink, ObjectStorageSink, PostgresSink, RelationalSink,
};
