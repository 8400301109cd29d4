//! Billing DTOs
//!
//! Request and response types for the billing collection endpoints.

use serde::{Deserialize, Serialize};
use telco_core::models::BillingInfo;
use validator::Validate;

/// Message returned after a successful batch insert
pub const BATCH_INSERTED_MESSAGE: &str = "Billing records are successfully inserted";

/// Offset pagination query parameters
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BillingPageParams {
    /// Rows to skip
    #[serde(default = "default_skip")]
    #[validate(range(min = 0))]
    pub skip: i64,

    /// Maximum rows to return
    #[serde(default = "default_limit")]
    #[validate(range(min = 0))]
    pub limit: i64,
}

fn default_skip() -> i64 {
    0
}

fn default_limit() -> i64 {
    1000
}

impl Default for BillingPageParams {
    fn default() -> Self {
        Self {
            skip: default_skip(),
            limit: default_limit(),
        }
    }
}

/// Batch of billing statements, wrapped in a single `data` field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchBillingInfo {
    /// Statements to insert
    pub data: Vec<BillingInfo>,
}

/// Outcome of a batch insert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchInsertSummary {
    /// Number of inserted rows
    pub inserted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_defaults() {
        let params: BillingPageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.skip, 0);
        assert_eq!(params.limit, 1000);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_negative_page_params_are_invalid() {
        let params = BillingPageParams {
            skip: -1,
            limit: 10,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_batch_rejects_malformed_customer_id() {
        let body = r#"{"data":[{
            "id": "x_1_01-2027",
            "customer_id": "not-a-uuid",
            "plan_id": 1,
            "billing_date": "2027-01-05",
            "total_charges": 10.0,
            "data_charges": 1.0,
            "roaming_charges": 2.0,
            "data_usage": 0.5,
            "sms_count": 3
        }]}"#;
        assert!(serde_json::from_str::<BatchBillingInfo>(body).is_err());
    }
}
