//! Telco Billing REST Server
//!
//! Serves the billing collection consumed by the synthetic data generator:
//! paged reads, batch inserts and a full wipe over a local SQLite table.

use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use std::env;
use telco_api::configure_billings;
use telco_core::ApiConfig;
use telco_db::{create_billing_pool, SqliteBillingRepository};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "telco-billing",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .configure(configure_billings);
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "telco_billing={},telco_api={},telco_db={},actix_web=info,sqlx=warn",
            log_level, log_level, log_level
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

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!(
        "Starting Telco Billing server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = ApiConfig::load().context("failed to load configuration")?;

    info!("Connecting to billing database...");
    let pool = create_billing_pool(&config.database.url, Some(config.database.max_connections))
        .await
        .context("failed to create billing database pool")?;

    SqliteBillingRepository::new(pool.clone())
        .ensure_schema()
        .await
        .context("failed to prepare billing schema")?;

    let bind_addr = config.server_addr();
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, config.server.workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            // Batches of a thousand statements stay well below this
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let error_message = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "invalid_query",
                        "message": error_message
                    })),
                )
                .into()
            }))
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
    })
    .workers(config.server.workers)
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
