//! Concurrent multi-country fetch orchestration
//!
//! The dispatcher fans one application out across every market in the
//! catalog with a bounded number of fetches in flight. Each fetch returns its
//! own `FetchOutcome`; the dispatcher alone merges them, in completion order,
//! into a flat record list and a `CountryOutcomeSet`. Workers never write to
//! shared state.
//!
//! # Examples
//!
//! ```rust,no_run
//! use review_fetcher::app::{AppDescriptor, CountryCatalog, Dispatcher, DispatcherConfig, FeedClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = Dispatcher::new(FeedClient::new()?, DispatcherConfig::default());
//! let app = AppDescriptor::new("SLACK", 618783545);
//!
//! let result = dispatcher.dispatch(&app, CountryCatalog::default().codes()).await;
//! println!(
//!     "{} reviews, {} countries failed",
//!     result.records.len(),
//!     result.outcomes.failed.len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::app::client::ReviewSource;
use crate::app::models::{
    AppDescriptor, CountryCode, CountryOutcomeSet, FetchStatus, RawReviewRecord,
};

pub use config::DispatcherConfig;

/// Everything one application run produced
#[derive(Debug, Clone)]
pub struct DispatchResult {
    /// Application that was fetched
    pub app: AppDescriptor,
    /// Union of every successful country's records, in completion order
    pub records: Vec<RawReviewRecord>,
    /// Per-country classification
    pub outcomes: CountryOutcomeSet,
    /// Wall-clock time spent fetching
    pub elapsed: Duration,
}

impl DispatchResult {
    fn empty(app: &AppDescriptor) -> Self {
        Self {
            app: app.clone(),
            records: Vec::new(),
            outcomes: CountryOutcomeSet::new(),
            elapsed: Duration::ZERO,
        }
    }
}

/// Bounded fan-out of per-country fetches
#[derive(Debug)]
pub struct Dispatcher<S> {
    source: S,
    config: DispatcherConfig,
}

impl<S: ReviewSource> Dispatcher<S> {
    pub fn new(source: S, config: DispatcherConfig) -> Self {
        Self { source, config }
    }

    /// Fetch one application from every listed country
    pub async fn dispatch(
        &self,
        app: &AppDescriptor,
        countries: &[CountryCode],
    ) -> DispatchResult {
        self.dispatch_with_progress(app, countries, |_, _| {}).await
    }

    /// Fetch one application from every listed country, reporting each completion
    ///
    /// `on_complete` runs on the coordinating task after each country's
    /// outcome has been merged. Returns only after every fetch has finished.
    /// A country listed more than once is fetched once.
    pub async fn dispatch_with_progress<F>(
        &self,
        app: &AppDescriptor,
        countries: &[CountryCode],
        mut on_complete: F,
    ) -> DispatchResult
    where
        F: FnMut(&CountryCode, FetchStatus),
    {
        let started = Instant::now();
        let worker_count = self.config.worker_count.max(1);

        let mut seen = HashSet::with_capacity(countries.len());
        let unique: Vec<&CountryCode> = countries.iter().filter(|c| seen.insert(*c)).collect();
        if unique.len() < countries.len() {
            debug!(
                "Ignoring {} duplicate country codes for {}",
                countries.len() - unique.len(),
                app.slug()
            );
        }

        info!(
            "Processing app {} across {} countries with {} workers",
            app.slug(),
            unique.len(),
            worker_count
        );

        let source = &self.source;
        let mut completions = stream::iter(unique)
            .map(|country| async move {
                let outcome = source.fetch_reviews(country, app.id).await;
                (country, outcome)
            })
            .buffer_unordered(worker_count);

        let mut result = DispatchResult::empty(app);
        while let Some((country, outcome)) = completions.next().await {
            let status = outcome.status();
            debug!("{} -> {}", country, status);

            result.outcomes.record(country.clone(), status);
            result.records.extend(outcome.into_records());
            on_complete(country, status);
        }

        result.elapsed = started.elapsed();
        info!(
            "App {}: {} reviews; {} successful, {} without reviews, {} failed in {:.2?}",
            app.slug(),
            result.records.len(),
            result.outcomes.successful.len(),
            result.outcomes.no_reviews.len(),
            result.outcomes.failed.len(),
            result.elapsed
        );

        result
    }
}
