//! Customer model
//!
//! The root entity of the synthetic dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of leading characters of the customer id embedded in the email
pub const EMAIL_ID_PREFIX_LEN: usize = 13;

/// Customer gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All variants, in draw order
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Database/string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Telecom customer profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: Uuid,

    pub first_name: String,
    pub last_name: String,

    /// `{id prefix}_{mailbox}`, unique because the id prefix is
    pub email: String,

    /// Hong Kong style number (`+852 #### ####`)
    pub phone_number: String,

    /// Home district (1..=18)
    pub district_code: i32,

    pub date_of_birth: NaiveDate,
    pub gender: Gender,

    /// Date the customer signed up
    pub created_at: NaiveDate,
}

impl Customer {
    /// Build the email address for a customer id and a fake mailbox
    pub fn email_for(id: &Uuid, mailbox: &str) -> String {
        let id = id.hyphenated().to_string();
        format!("{}_{}", &id[..EMAIL_ID_PREFIX_LEN], mailbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_uses_id_prefix() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(
            Customer::email_for(&id, "jane@example.org"),
            "67e55044-10b1_jane@example.org"
        );
    }

    #[test]
    fn test_gender_serialization() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
        assert_eq!(Gender::Male.to_string(), "male");
    }
}
