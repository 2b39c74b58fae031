//! Rating retrieval.
//!
//! `RatingFetcher` turns a host-facing product identifier into a fully
//! populated [`RatingRecord`]:
//!
//! 1. resolve the identifier to a catalog id
//! 2. fetch the catalog entry on the blocking pool, bounded by a timeout
//! 3. classify the score and normalize brand/title
//!
//! Every failure along the way is logged and replaced by
//! [`RatingRecord::fallback`], so `fetch_rating` has no error path.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use rand::Rng;
use tracing::{debug, warn};

use crate::catalog::client::{CatalogSource, HttpCatalog};
use crate::catalog::resolve::resolve;
use crate::config::WidgetConfig;
use crate::error::FetchError;
use crate::rating::record::RatingRecord;

/// Inclusive range of the sampled test count.
pub const MIN_TEST_COUNT: u32 = 3;
pub const MAX_TEST_COUNT: u32 = 12;

#[derive(Clone)]
pub struct RatingFetcher {
    source: Arc<dyn CatalogSource>,
    timeout: Duration,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl RatingFetcher {
    pub fn new(source: Arc<dyn CatalogSource>, timeout: Duration) -> Self {
        Self {
            source,
            timeout,
            today: local_today,
        }
    }

    /// Fetcher backed by the HTTP catalog described in `config`.
    pub fn from_config(config: &WidgetConfig) -> Self {
        let catalog = HttpCatalog::new(config.api_base_url.clone(), config.timeout());
        Self::new(Arc::new(catalog), config.timeout())
    }

    /// Replace the clock used for `last_test_date`.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve, fetch and normalize the rating for `product_id`.
    pub async fn fetch_rating(&self, product_id: Option<&str>) -> RatingRecord {
        match self.try_fetch(product_id).await {
            Ok(record) => record,
            Err(err) => {
                warn!(product_id = product_id.unwrap_or(""), error = %err, "using fallback rating");
                RatingRecord::fallback()
            }
        }
    }

    async fn try_fetch(&self, product_id: Option<&str>) -> Result<RatingRecord, FetchError> {
        let catalog_id = resolve(product_id);
        debug!(product_id = product_id.unwrap_or(""), %catalog_id, "resolved catalog id");

        let source = Arc::clone(&self.source);
        let task = tokio::task::spawn_blocking(move || source.fetch_product(catalog_id));

        let product = tokio::time::timeout(self.timeout, task)
            .await
            .map_err(|_| FetchError::Timeout(self.timeout))?
            .map_err(|e| FetchError::Task(e.to_string()))??;

        Ok(RatingRecord::from_product(
            &product,
            sample_test_count(),
            format_test_date((self.today)()),
        ))
    }
}

/// Uniform sample from `MIN_TEST_COUNT..=MAX_TEST_COUNT`.
pub fn sample_test_count() -> u32 {
    rand::rng().random_range(MIN_TEST_COUNT..=MAX_TEST_COUNT)
}

/// Formats a date as `D Mon YYYY`, e.g. `19 Feb 2025`.
pub fn format_test_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}
