//! Generation pipeline
//!
//! One iteration fabricates a fresh cohort and pushes it through the sinks
//! in a fixed order:
//!
//! 1. call records to object storage as CSV
//! 2. customers then subscriptions to the relational database
//! 3. billing statements to the billing service
//!
//! Iterations run strictly one after another. The first sink error ends
//! the run; nothing is retried.

use crate::csv_encoder::encode_csv;
use crate::error::GenResult;
use crate::fabricator::RecordFabricator;
use crate::sinks::{BillingSink, ObjectSink, RelationalSink};
use bytes::Bytes;
use chrono::{Local, NaiveDate};
use rand::Rng;
use telco_core::config::GenerationSettings;
use tracing::{error, info, instrument};

/// Counts for one completed iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationReport {
    pub iteration: u32,
    pub customers: usize,
    pub subscriptions: usize,
    pub call_records: usize,
    pub billing_infos: usize,
    /// Confirmation returned by the billing service
    pub billing_message: String,
}

/// Object key of the call record export for an iteration
pub fn call_records_path(prefix: &str, iteration: u32) -> String {
    format!("{}/data_{}.csv", prefix.trim_end_matches('/'), iteration)
}

/// Drives fabrication and dispatch across iterations
pub struct Pipeline<O, R, B> {
    settings: GenerationSettings,
    object_prefix: String,
    object_sink: O,
    relational_sink: R,
    billing_sink: B,
    fixed_today: Option<NaiveDate>,
}

impl<O, R, B> Pipeline<O, R, B>
where
    O: ObjectSink,
    R: RelationalSink,
    B: BillingSink,
{
    pub fn new(
        settings: GenerationSettings,
        object_prefix: impl Into<String>,
        object_sink: O,
        relational_sink: R,
        billing_sink: B,
    ) -> Self {
        Self {
            settings,
            object_prefix: object_prefix.into(),
            object_sink,
            relational_sink,
            billing_sink,
            fixed_today: None,
        }
    }

    /// Anchor every iteration on `today` instead of the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Fabricate one cohort and dispatch it to every sink
    #[instrument(skip(self, rng))]
    pub async fn run_iteration<G: Rng>(
        &self,
        iteration: u32,
        rng: &mut G,
    ) -> GenResult<IterationReport> {
        let fabricator = RecordFabricator::new(self.today());

        let customer_ids = fabricator.customer_ids(rng, self.settings.customers_per_iteration);
        let customers = fabricator.customers(rng, &customer_ids);
        let subscriptions = fabricator.subscriptions(rng, &customers);
        let call_records =
            fabricator.call_records(rng, &customer_ids, self.settings.call_records_per_iteration);
        let billing_infos = fabricator.billing_infos(rng, &subscriptions);

        info!(
            customers = customers.len(),
            subscriptions = subscriptions.len(),
            call_records = call_records.len(),
            billing_infos = billing_infos.len(),
            "Cohort fabricated"
        );

        let path = call_records_path(&self.object_prefix, iteration);
        let csv = encode_csv(&call_records)?;
        self.object_sink.write_object(&path, Bytes::from(csv)).await?;

        self.relational_sink
            .write_batches(&customers, &subscriptions)
            .await?;

        let billing_message = self.billing_sink.post_batch(&billing_infos).await?;

        Ok(IterationReport {
            iteration,
            customers: customers.len(),
            subscriptions: subscriptions.len(),
            call_records: call_records.len(),
            billing_infos: billing_infos.len(),
            billing_message,
        })
    }

    /// Run every configured iteration, pausing after each one
    ///
    /// Returns the number of completed iterations. A failed iteration ends
    /// the run without pausing.
    pub async fn run<G: Rng>(&self, rng: &mut G) -> GenResult<u32> {
        let total = self.settings.iterations;

        for iteration in 1..=total {
            info!("Starting iteration {}/{}", iteration, total);

            let report = self.run_iteration(iteration, rng).await.map_err(|e| {
                error!(iteration, kind = e.kind(), "Iteration failed: {}", e);
                e
            })?;

            info!(
                iteration,
                billing_message = %report.billing_message,
                "Iteration complete"
            );

            tokio::time::sleep(self.settings.pause()).await;
        }

        Ok(total)
    }
}
