//! Prelude module for the review fetcher library
//!
//! Re-exports the items needed for typical usage with a single
//! `use review_fetcher::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use review_fetcher::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     let dispatcher = Dispatcher::new(
//!         FeedClient::with_config(&config.fetch.client)?,
//!         config.fetch.dispatcher.clone(),
//!     );
//!
//!     for app in &config.apps {
//!         let result = dispatcher.dispatch(app, config.catalog().codes()).await;
//!         let reviews = collect_reviews(&result)?;
//!         println!("{}: {} reviews", app.name, reviews.len());
//!     }
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Configuration
pub use crate::config::AppConfig;

// Essential app components
pub use crate::app::{
    // Data types
    AppDescriptor,
    ClientConfig,
    CountryCatalog,
    CountryCode,
    CountryOutcomeSet,
    // Core orchestration
    DispatchResult,
    Dispatcher,
    DispatcherConfig,
    FeedClient,
    FetchOutcome,
    FetchStatus,
    RawReviewRecord,
    Review,
    ReviewSource,
    // Reporting and export
    RunContext,
    RunSummary,
    SpreadsheetWriter,
    SummaryWriter,

    // Pipeline functions
    collect_reviews,
    parse_reviews,
    process_app,
    sort_most_recent_first,
};
