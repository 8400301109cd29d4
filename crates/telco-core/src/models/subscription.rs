//! Subscription status model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer's subscription to a plan over a date window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub id: Uuid,

    /// Owning customer
    pub customer_id: Uuid,

    /// Subscribed plan (1..=16)
    pub plan_id: i32,

    pub start_date: NaiveDate,

    /// Always strictly after `start_date`
    pub end_date: NaiveDate,
}

impl SubscriptionStatus {
    /// Check if the subscription is still running on the given day
    #[inline]
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Check if the subscription has not ended before the given day
    #[inline]
    pub fn is_open_on(&self, day: NaiveDate) -> bool {
        day <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(start: NaiveDate, end: NaiveDate) -> SubscriptionStatus {
        SubscriptionStatus {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            plan_id: 3,
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_subscription_window() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2027, 6, 1).unwrap();
        let sub = subscription(start, end);

        assert!(sub.is_active_on(start));
        assert!(sub.is_active_on(end));
        assert!(!sub.is_active_on(end.succ_opt().unwrap()));
        assert!(sub.is_open_on(start.pred_opt().unwrap()));
        assert!(!sub.is_active_on(start.pred_opt().unwrap()));
    }
}
