//! HTTP client for the billing REST service

use super::BillingSink;
use crate::error::GenResult;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use telco_core::models::BillingInfo;
use tracing::{debug, error, info, instrument};

/// Request timeout for a single batch submission
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Serialize)]
struct BillingBatch<'a> {
    data: &'a [BillingInfo],
}

#[derive(Deserialize)]
struct BatchReply {
    message: String,
}

/// Posts billing batches to the collection endpoint
pub struct HttpBillingSink {
    http_client: Client,
    endpoint: String,
}

impl HttpBillingSink {
    /// Build a sink posting to `endpoint` (e.g. "http://localhost:8000/billings")
    pub fn new(endpoint: impl Into<String>) -> GenResult<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BillingSink for HttpBillingSink {
    #[instrument(skip_all, fields(endpoint = %self.endpoint, batch = records.len()))]
    async fn post_batch(&self, records: &[BillingInfo]) -> GenResult<String> {
        debug!("Posting {} billing records", records.len());

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&BillingBatch { data: records })
            .send()
            .await
            .map_err(|e| {
                error!("Billing service unreachable: {}", e);
                e
            })?;

        let response = response.error_for_status().map_err(|e| {
            error!("Billing service rejected batch: {}", e);
            e
        })?;

        let reply: BatchReply = response.json().await.map_err(|e| {
            error!("Billing service reply carried no message: {}", e);
            e
        })?;
        let message = reply.message;

        info!(message = %message, "Billing batch accepted");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn test_payload_wraps_records_in_data() {
        let customer_id = Uuid::new_v4();
        let billing_date = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        let records = vec![BillingInfo {
            id: BillingInfo::statement_id(&customer_id, 4, billing_date),
            customer_id,
            plan_id: 4,
            billing_date,
            total_charges: 700.0,
            data_charges: 50.0,
            roaming_charges: 100.0,
            data_usage: 3.0,
            sms_count: 9,
        }];

        let json = serde_json::to_value(BillingBatch { data: &records }).unwrap();
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["billing_date"], "2026-11-02");
        assert_eq!(json["data"][0]["customer_id"], customer_id.to_string());
    }

    #[test]
    fn test_reply_requires_message() {
        let reply: BatchReply =
            serde_json::from_str(r#"{"data":{"inserted":1},"message":"done"}"#).unwrap();
        assert_eq!(reply.message, "done");

        assert!(serde_json::from_str::<BatchReply>(r#"{"data":{"inserted":1}}"#).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let sink = HttpBillingSink::new("http://127.0.0.1:1/billings").unwrap();
        let result = sink.post_batch(&[]).await;
        assert!(matches!(result, Err(crate::error::GenError::Http(_))));
    }
}
