//! Integration tests for the billing API handlers
//!
//! Each test runs the real handlers against a fresh in-memory SQLite
//! database.

use actix_web::{http::StatusCode, test, web, App};
use chrono::NaiveDate;
use serde_json::{json, Value};
use telco_api::configure_billings;
use telco_core::models::BillingInfo;
use telco_db::{create_memory_pool, SqliteBillingRepository, SqlitePool};
use uuid::Uuid;

async fn billing_pool() -> SqlitePool {
    let pool = create_memory_pool().await.unwrap();
    SqliteBillingRepository::new(pool.clone())
        .ensure_schema()
        .await
        .unwrap();
    pool
}

fn statement(n: u8) -> BillingInfo {
    let customer_id = Uuid::new_v4();
    let billing_date = NaiveDate::from_ymd_opt(2026, 12, u32::from(n)).unwrap();
    BillingInfo {
        id: BillingInfo::statement_id(&customer_id, i32::from(n), billing_date),
        customer_id,
        plan_id: i32::from(n),
        billing_date,
        total_charges: 500.0 + f64::from(n),
        data_charges: 10.0,
        roaming_charges: 20.0,
        data_usage: 1.5,
        sms_count: i32::from(n),
    }
}

macro_rules! billing_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .configure(configure_billings),
        )
        .await
    };
}

#[actix_web::test]
async fn test_post_returns_message() {
    let pool = billing_pool().await;
    let app = billing_app!(pool);

    let req = test::TestRequest::post()
        .uri("/billings")
        .set_json(json!({ "data": [statement(1), statement(2)] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Billing records are successfully inserted");
    assert_eq!(body["data"]["inserted"], 2);
}

#[actix_web::test]
async fn test_pagination_returns_first_rows() {
    let pool = billing_pool().await;
    let app = billing_app!(pool);

    let records: Vec<BillingInfo> = (1..=5).map(statement).collect();
    let req = test::TestRequest::post()
        .uri("/billings")
        .set_json(json!({ "data": records }))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get()
        .uri("/billings?skip=0&limit=2")
        .to_request();
    let page: Vec<BillingInfo> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(page.len(), 2);
    assert_eq!(page, records[..2].to_vec());
}

#[actix_web::test]
async fn test_default_pagination_returns_everything() {
    let pool = billing_pool().await;
    let app = billing_app!(pool);

    let records: Vec<BillingInfo> = (1..=3).map(statement).collect();
    let req = test::TestRequest::post()
        .uri("/billings")
        .set_json(json!({ "data": records }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/billings").to_request();
    let all: Vec<BillingInfo> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all, records);

    let req = test::TestRequest::get()
        .uri("/billings?skip=2")
        .to_request();
    let tail: Vec<BillingInfo> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tail, records[2..].to_vec());
}

#[actix_web::test]
async fn test_delete_then_read_is_empty() {
    let pool = billing_pool().await;
    let app = billing_app!(pool);

    let req = test::TestRequest::post()
        .uri("/billings")
        .set_json(json!({ "data": [statement(1), statement(2), statement(3)] }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete().uri("/billings").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/billings").to_request();
    let rows: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(rows.is_empty());
}

#[actix_web::test]
async fn test_singular_delete_route() {
    let pool = billing_pool().await;
    let app = billing_app!(pool);

    let req = test::TestRequest::post()
        .uri("/billings")
        .set_json(json!({ "data": [statement(4)] }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete().uri("/billing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let count = SqliteBillingRepository::new(pool.clone())
        .count()
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn test_duplicate_statement_conflicts() {
    let pool = billing_pool().await;
    let app = billing_app!(pool);
    let bill = statement(7);

    let req = test::TestRequest::post()
        .uri("/billings")
        .set_json(json!({ "data": [bill.clone()] }))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::post()
        .uri("/billings")
        .set_json(json!({ "data": [bill] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "already_exists");
}

#[actix_web::test]
async fn test_negative_skip_is_rejected() {
    let pool = billing_pool().await;
    let app = billing_app!(pool);

    let req = test::TestRequest::get()
        .uri("/billings?skip=-1&limit=2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["status"], 400);
}
