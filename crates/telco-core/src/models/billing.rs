//! Billing info model
//!
//! Monthly statement for a customer plan. This is the row shape of the
//! billing REST service and of the batch posted to it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound of `total_charges`
pub const MAX_TOTAL_CHARGES: f64 = 1000.0;

/// Monthly billing statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingInfo {
    /// `{customer_id}_{plan_id}_{MM-YYYY}`
    pub id: String,
    pub customer_id: Uuid,
    pub plan_id: i32,
    pub billing_date: NaiveDate,

    /// Never below `data_charges + roaming_charges`
    pub total_charges: f64,
    pub data_charges: f64,
    pub roaming_charges: f64,

    /// Data volume in GB
    pub data_usage: f64,
    pub sms_count: i32,
}

impl BillingInfo {
    /// Build the statement id; one bill per customer, plan and month
    pub fn statement_id(customer_id: &Uuid, plan_id: i32, billing_date: NaiveDate) -> String {
        format!(
            "{}_{}_{}",
            customer_id.hyphenated(),
            plan_id,
            billing_date.format("%m-%Y")
        )
    }

    /// Check that the itemised charges fit in the total
    #[inline]
    pub fn charges_are_consistent(&self) -> bool {
        self.total_charges >= self.data_charges + self.roaming_charges
    }
}
