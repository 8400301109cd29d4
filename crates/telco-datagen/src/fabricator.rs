//! Record fabrication
//!
//! Builds the four synthetic record families from a caller-supplied RNG.
//! Every draw goes through that RNG, so a seeded `StdRng` reproduces a
//! dataset exactly for a fixed `today`.

use chrono::{Datelike, Duration, Months, NaiveDate};
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::Rng;
use rand_distr::{Distribution, Exp1};
use telco_core::models::{
    BillingInfo, CallRecord, CallType, Customer, Gender, SubscriptionStatus, MAX_TOTAL_CHARGES,
};
use uuid::{Builder, Uuid};

/// Mean call duration in minutes
pub const MEAN_CALL_DURATION: f64 = 10.0;

const DISTRICT_CODES: std::ops::RangeInclusive<i32> = 1..=18;
const PLAN_IDS: std::ops::RangeInclusive<i32> = 1..=16;
const LOCATION_IDS: std::ops::RangeInclusive<i32> = 1..=50;
const MAX_AGE_YEARS: u32 = 115;

/// Fabricates telecom records relative to a fixed calendar day
#[derive(Debug, Clone, Copy)]
pub struct RecordFabricator {
    today: NaiveDate,
}

impl RecordFabricator {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Day every date window is anchored on
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Fresh customer ids
    pub fn customer_ids<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<Uuid> {
        (0..count).map(|_| random_uuid(rng)).collect()
    }

    /// One customer profile per id, in id order
    pub fn customers<R: Rng>(&self, rng: &mut R, ids: &[Uuid]) -> Vec<Customer> {
        ids.iter().map(|id| self.customer(rng, *id)).collect()
    }

    fn customer<R: Rng>(&self, rng: &mut R, id: Uuid) -> Customer {
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let mailbox: String = FreeEmail().fake_with_rng(rng);

        let oldest = self
            .today
            .checked_sub_months(Months::new(MAX_AGE_YEARS * 12))
            .unwrap_or(self.today);

        Customer {
            id,
            first_name,
            last_name,
            email: Customer::email_for(&id, &mailbox),
            phone_number: format!(
                "+852 {:04} {:04}",
                rng.gen_range(0..10_000),
                rng.gen_range(0..10_000)
            ),
            district_code: rng.gen_range(DISTRICT_CODES),
            date_of_birth: uniform_date(rng, oldest, self.today),
            gender: Gender::ALL[rng.gen_range(0..Gender::ALL.len())],
            created_at: uniform_date(rng, decade_start(self.today), self.today),
        }
    }

    /// Exactly one subscription per customer, in customer order
    ///
    /// The subscription closes after `today` and opens no earlier than the
    /// customer signed up.
    pub fn subscriptions<R: Rng>(
        &self,
        rng: &mut R,
        customers: &[Customer],
    ) -> Vec<SubscriptionStatus> {
        let tomorrow = self.today + Duration::days(1);
        let latest_end = decade_end(self.today).max(tomorrow);

        customers
            .iter()
            .map(|customer| {
                let end_date = uniform_date(rng, tomorrow, latest_end);
                let last_start = end_date - Duration::days(1);
                let start_date = uniform_date(rng, customer.created_at.min(last_start), last_start);

                SubscriptionStatus {
                    id: random_uuid(rng),
                    customer_id: customer.id,
                    plan_id: rng.gen_range(PLAN_IDS),
                    start_date,
                    end_date,
                }
            })
            .collect()
    }

    /// Call records drawn against a pool of customer ids
    ///
    /// Returns no records when the pool is empty.
    pub fn call_records<R: Rng>(
        &self,
        rng: &mut R,
        customer_ids: &[Uuid],
        count: usize,
    ) -> Vec<CallRecord> {
        if customer_ids.is_empty() {
            return Vec::new();
        }

        let month_start = self.today.with_day(1).unwrap_or(self.today);

        (0..count)
            .map(|_| {
                let duration: f64 = Exp1.sample(rng);
                CallRecord {
                    id: random_uuid(rng),
                    customer_id: customer_ids[rng.gen_range(0..customer_ids.len())],
                    call_date: uniform_date(rng, month_start, self.today),
                    call_duration: MEAN_CALL_DURATION * duration,
                    call_type: CallType::ALL[rng.gen_range(0..CallType::ALL.len())],
                    location_id: rng.gen_range(LOCATION_IDS),
                }
            })
            .collect()
    }

    /// One billing statement per subscription still open on `today`
    pub fn billing_infos<R: Rng>(
        &self,
        rng: &mut R,
        subscriptions: &[SubscriptionStatus],
    ) -> Vec<BillingInfo> {
        subscriptions
            .iter()
            .filter(|s| s.is_open_on(self.today))
            .map(|s| {
                let billing_date = uniform_date(rng, s.start_date.max(self.today), s.end_date);
                let data_charges = rng.gen_range(0.0..100.0);
                let roaming_charges = rng.gen_range(0.0..500.0);
                let total_charges =
                    rng.gen_range(data_charges + roaming_charges..=MAX_TOTAL_CHARGES);

                BillingInfo {
                    id: BillingInfo::statement_id(&s.customer_id, s.plan_id, billing_date),
                    customer_id: s.customer_id,
                    plan_id: s.plan_id,
                    billing_date,
                    total_charges,
                    data_charges,
                    roaming_charges,
                    data_usage: rng.gen_range(0.0..20.0),
                    sms_count: rng.gen_range(0..50),
                }
            })
            .collect()
    }
}

/// UUID built from RNG bytes, with version 4 bits set
fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Uniform day in `[from, to]`; collapses to `from` on an empty window
fn uniform_date<R: Rng>(rng: &mut R, from: NaiveDate, to: NaiveDate) -> NaiveDate {
    let span = (to - from).num_days();
    if span <= 0 {
        return from;
    }
    from + Duration::days(rng.gen_range(0..=span))
}

fn decade_start(day: NaiveDate) -> NaiveDate {
    let year = day.year() - day.year().rem_euclid(10);
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(day)
}

fn decade_end(day: NaiveDate) -> NaiveDate {
    let year = day.year() - day.year().rem_euclid(10) + 9;
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(day)
}
