//! Data Transfer Objects (DTOs) for API requests and responses

pub mod billing;
pub mod common;

pub use billing::*;
pub use common::*;
