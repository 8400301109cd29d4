//! HTTP request handlers

pub mod billing;

pub use billing::configure as configure_billings;
