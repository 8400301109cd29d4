//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Both binaries layer built-in defaults, optional `config/default` and
//! `config/{RUN_MODE}` files, then `TELCO__*` environment variables.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Environment variable prefix shared by both binaries
const ENV_PREFIX: &str = "TELCO";

// ==================== Billing REST service ====================

/// Configuration for the billing REST service
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: BillingDbConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Billing database configuration (SQLite)
#[derive(Debug, Deserialize, Clone)]
pub struct BillingDbConfig {
    /// SQLite connection URL
    #[serde(default = "default_billing_db_url")]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_billing_db_url() -> String {
    "sqlite://billing.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl ApiConfig {
    /// Load configuration from environment and optional config files
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("server.workers", default_workers() as i64)?
            .set_default("database.url", default_billing_db_url())?
            .set_default("database.max_connections", i64::from(default_max_connections()))?;

        layered(builder)?.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Synthetic data generator ====================

/// Configuration for the synthetic data generator
#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub generator: GenerationSettings,
    pub telecom_db: TelecomDbConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Generation loop settings
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationSettings {
    /// Number of generate-and-dispatch iterations
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Pause between iterations in seconds
    #[serde(default = "default_pause_secs")]
    pub pause_secs: u64,

    /// Customers fabricated per iteration
    #[serde(default = "default_batch_size")]
    pub customers_per_iteration: usize,

    /// Call records fabricated per iteration
    #[serde(default = "default_batch_size")]
    pub call_records_per_iteration: usize,

    /// RNG seed; a fresh entropy seed is used when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Billing collection endpoint of the REST service
    #[serde(default = "default_billing_endpoint")]
    pub billing_endpoint: String,
}

fn default_iterations() -> u32 {
    20
}

fn default_pause_secs() -> u64 {
    10
}

fn default_batch_size() -> usize {
    1000
}

fn default_billing_endpoint() -> String {
    "http://localhost:8000/billings".to_string()
}

impl GenerationSettings {
    /// Pause between iterations
    pub fn pause(&self) -> Duration {
        Duration::from_secs(self.pause_secs)
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            pause_secs: default_pause_secs(),
            customers_per_iteration: default_batch_size(),
            call_records_per_iteration: default_batch_size(),
            seed: None,
            billing_endpoint: default_billing_endpoint(),
        }
    }
}

/// Relational telecom database configuration (PostgreSQL)
#[derive(Debug, Deserialize, Clone)]
pub struct TelecomDbConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Create the Customer/SubscriptionStatus tables if missing
    #[serde(default)]
    pub create_schema: bool,
}

/// Object storage backend selector
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Buckets are directories under `local_root`
    Local,
    /// Google Cloud Storage
    Gcs,
}

/// Object storage configuration for call record exports
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Bucket receiving call record CSV files
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Object key prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Location used when a bucket has to be created
    #[serde(default = "default_location")]
    pub location: String,

    /// Root directory for the local backend
    #[serde(default = "default_local_root")]
    pub local_root: String,

    /// GCS JSON API endpoint
    #[serde(default = "default_gcs_endpoint")]
    pub gcs_endpoint: String,

    /// GCP project owning created buckets
    #[serde(default)]
    pub project_id: Option<String>,

    /// Service account key file used for object writes
    #[serde(default)]
    pub service_account_path: Option<String>,

    /// OAuth bearer token used for bucket management calls
    #[serde(default)]
    pub access_token: Option<String>,
}

fn default_backend() -> StorageBackend {
    StorageBackend::Local
}

fn default_bucket() -> String {
    "telecom_de".to_string()
}

fn default_prefix() -> String {
    "src_calls".to_string()
}

fn default_location() -> String {
    "asia-east2".to_string()
}

fn default_local_root() -> String {
    "./object-store".to_string()
}

fn default_gcs_endpoint() -> String {
    "https://storage.googleapis.com".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            bucket: default_bucket(),
            prefix: default_prefix(),
            location: default_location(),
            local_root: default_local_root(),
            gcs_endpoint: default_gcs_endpoint(),
            project_id: None,
            service_account_path: None,
            access_token: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment and optional config files
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("generator.iterations", i64::from(default_iterations()))?
            .set_default("generator.pause_secs", default_pause_secs() as i64)?
            .set_default("telecom_db.create_schema", false)?
            .set_default("storage.backend", "local")?
            .set_default("storage.bucket", default_bucket())?
            .set_default("storage.prefix", default_prefix())?;

        layered(builder)?.try_deserialize()
    }
}

/// Apply the file and environment sources shared by every binary
fn layered(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

    builder
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
}
