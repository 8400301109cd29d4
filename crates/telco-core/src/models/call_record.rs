//! Call record model
//!
//! One customer-care or network interaction, exported as CSV.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of call
///
/// Serialized as its human readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallType {
    OutgoingCall,
    IncomingCall,
    DataUsageInquiry,
    NetworkIssue,
    BillingInquiry,
    TechnicalSupport,
    AccountUpdate,
}

impl CallType {
    /// All variants, in draw order
    pub const ALL: [CallType; 7] = [
        CallType::OutgoingCall,
        CallType::IncomingCall,
        CallType::DataUsageInquiry,
        CallType::NetworkIssue,
        CallType::BillingInquiry,
        CallType::TechnicalSupport,
        CallType::AccountUpdate,
    ];

    /// Human readable label, as written to exports
    pub fn label(&self) -> &'static str {
        match self {
            CallType::OutgoingCall => "Outgoing Call",
            CallType::IncomingCall => "Incoming Call",
            CallType::DataUsageInquiry => "Data Usage Inquiry",
            CallType::NetworkIssue => "Network Issue",
            CallType::BillingInquiry => "Billing Inquiry",
            CallType::TechnicalSupport => "Technical Support",
            CallType::AccountUpdate => "Account Update",
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CallType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CallType::ALL
            .into_iter()
            .find(|call_type| call_type.label() == s)
            .ok_or_else(|| format!("unknown call type: {}", s))
    }
}

impl Serialize for CallType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CallType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}

/// Call detail for a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub call_date: NaiveDate,

    /// Duration in minutes, never negative
    pub call_duration: f64,

    pub call_type: CallType,

    /// Serving location (1..=50)
    pub location_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_type_labels_match_serde() {
        for call_type in CallType::ALL {
            let json = serde_json::to_string(&call_type).unwrap();
            assert_eq!(json, format!("\"{}\"", call_type.label()));

            let parsed: CallType = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, call_type);
        }
    }

    #[test]
    fn test_unknown_call_type_is_rejected() {
        assert!("Fax".parse::<CallType>().is_err());
        assert!(serde_json::from_str::<CallType>("\"OutgoingCall\"").is_err());
    }
}
