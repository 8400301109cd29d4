//! Billing handlers
//!
//! HTTP handlers for the billing collection: paged reads, batch inserts and
//! a full wipe.

use crate::dto::{
    ApiResponse, BatchBillingInfo, BatchInsertSummary, BillingPageParams, BATCH_INSERTED_MESSAGE,
};
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;
use telco_core::AppError;
use telco_db::SqliteBillingRepository;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// List billing records
///
/// GET /billings?skip=0&limit=1000
#[instrument(skip(pool))]
pub async fn list_billings(
    pool: web::Data<SqlitePool>,
    query: web::Query<BillingPageParams>,
) -> Result<HttpResponse, AppError> {
    if let Err(e) = query.validate() {
        warn!("Invalid pagination parameters: {}", e);
        return Err(e.into());
    }

    debug!(skip = query.skip, limit = query.limit, "Listing billing records");

    let repo = SqliteBillingRepository::new(pool.get_ref().clone());
    let records = repo.list(query.skip, query.limit).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Insert a batch of billing records
///
/// POST /billings
#[instrument(skip(pool, req), fields(batch = req.data.len()))]
pub async fn create_billings(
    pool: web::Data<SqlitePool>,
    req: web::Json<BatchBillingInfo>,
) -> Result<HttpResponse, AppError> {
    let repo = SqliteBillingRepository::new(pool.get_ref().clone());
    let inserted = repo.insert_batch(&req.data).await?;

    info!(inserted, "Billing batch stored");

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BatchInsertSummary { inserted },
        BATCH_INSERTED_MESSAGE,
    )))
}

/// Delete every billing record
///
/// DELETE /billings
#[instrument(skip(pool))]
pub async fn delete_billings(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let repo = SqliteBillingRepository::new(pool.get_ref().clone());
    let deleted = repo.delete_all().await?;

    info!(deleted, "Billing records deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// Configure billing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/billings")
            .route("", web::get().to(list_billings))
            .route("", web::post().to(create_billings))
            .route("", web::delete().to(delete_billings)),
    )
    // Singular path kept for clients of the first release
    .route("/billing", web::delete().to(delete_billings));
}
