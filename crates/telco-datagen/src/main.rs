//! Telco synthetic data generator
//!
//! Runs the configured number of iterations against object storage, the
//! telecom PostgreSQL database and the billing REST service, then exits.
//! Any sink failure aborts the run with a non-zero status.

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use telco_core::GeneratorConfig;
use telco_datagen::{HttpBillingSink, ObjectStorageSink, Pipeline, PostgresSink};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "telco_datagen={},telco_db={},sqlx=warn,reqwest=warn",
            log_level, log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    // LOG_FORMAT=json for log shippers
    if env::var("LOG_FORMAT").as_deref() == Ok("json") {
        registry.with(fmt::layer().json()).init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!(
        "Starting Telco data generator v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = GeneratorConfig::load().context("failed to load configuration")?;
    let settings = config.generator.clone();

    let mut rng = match settings.seed {
        Some(seed) => {
            info!("Using fixed RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let object_sink = ObjectStorageSink::new(config.storage.clone())
        .context("failed to build object storage client")?;

    let relational_sink = PostgresSink::new(config.telecom_db.url.clone());
    if config.telecom_db.create_schema {
        relational_sink
            .ensure_schema()
            .await
            .context("failed to prepare telecom schema")?;
    }

    let billing_sink = HttpBillingSink::new(settings.billing_endpoint.clone())
        .context("failed to build billing client")?;

    info!(
        iterations = settings.iterations,
        pause_secs = settings.pause_secs,
        bucket = %config.storage.bucket,
        billing_endpoint = %billing_sink.endpoint(),
        "Generator configured"
    );

    let pipeline = Pipeline::new(
        settings,
        config.storage.prefix.clone(),
        object_sink,
        relational_sink,
        billing_sink,
    );

    let completed = pipeline.run(&mut rng).await?;
    info!("Generator finished after {} iterations", completed);

    Ok(())
}
