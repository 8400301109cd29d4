//! Generator error types

use telco_core::AppError;
use thiserror::Error;

/// Errors raised while fabricating or dispatching a batch
#[derive(Error, Debug)]
pub enum GenError {
    #[error("Object storage error: {0}")]
    Storage(#[from] object_store::Error),

    #[error("Bucket error: {0}")]
    Bucket(String),

    #[error("Database error: {0}")]
    Database(#[from] AppError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Refusing to encode an empty batch")]
    EmptyBatch,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for generator operations
pub type GenResult<T> = Result<T, GenError>;

impl GenError {
    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            GenError::Storage(_) | GenError::Bucket(_) => "storage",
            GenError::Database(_) => "database",
            GenError::Http(_) => "http",
            GenError::Csv(_) | GenError::EmptyBatch => "encoding",
            GenError::Io(_) => "io",
            GenError::Config(_) => "config",
        }
    }
}
