//! Core application logic for the review fetcher
//!
//! This module contains the feed client, the concurrent dispatcher, the
//! review parser, aggregation and reporting, and spreadsheet export.
//!
//! # Examples
//!
//! ```rust,no_run
//! use review_fetcher::app::{
//!     AppDescriptor, CountryCatalog, Dispatcher, DispatcherConfig, FeedClient, collect_reviews,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dispatcher = Dispatcher::new(FeedClient::new()?, DispatcherConfig::default());
//! let app = AppDescriptor::new("MOMCOZY", 6473000053);
//!
//! let result = dispatcher.dispatch(&app, CountryCatalog::default().codes()).await;
//! for review in collect_reviews(&result)? {
//!     println!("{} [{}] {}: {}", review.date, review.country, review.user_rating, review.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod countries;
pub mod dispatcher;
pub mod export;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod report;

// Re-export main public API
pub use client::{ClientConfig, FeedClient, FeedEntries, ReviewSource};
pub use countries::{CountryCatalog, DEFAULT_COUNTRY_CODES};
pub use dispatcher::{DispatchResult, Dispatcher, DispatcherConfig};
pub use export::SpreadsheetWriter;
pub use models::{
    AppDescriptor, CountryCode, CountryOutcomeSet, FetchOutcome, FetchStatus, RawReviewRecord,
    Review,
};
pub use parser::{parse_review, parse_reviews};
pub use pipeline::{AppRunOutcome, collect_reviews, process_app};
pub use report::{RunContext, RunSummary, SummaryWriter, sort_most_recent_first};
