//! HTTP client for the public customer-review feed
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `http`: the single GET-and-decode operation
//! - `feed`: normalization of the feed's heterogeneous `entry` shape
//!
//! `FeedClient` is the production `ReviewSource`. It never returns an error:
//! every failure is folded into `FetchOutcome::Failed`.

use std::future::Future;

use tracing::{debug, warn};
use url::Url;

use crate::app::models::{CountryCode, FetchOutcome};
use crate::errors::{FetchError, FetchResult};

pub mod config;
pub mod feed;
pub mod http;

pub use config::ClientConfig;
pub use feed::FeedEntries;

use http::HttpHandler;

/// Something that can fetch one storefront's reviews for one application
///
/// Implementations must classify every outcome instead of erroring, so the
/// dispatcher only ever sees `FetchOutcome` values.
pub trait ReviewSource: Send + Sync {
    fn fetch_reviews(
        &self,
        country: &CountryCode,
        app_id: u64,
    ) -> impl Future<Output = FetchOutcome> + Send;
}

/// Review feed client
#[derive(Debug, Clone)]
pub struct FeedClient {
    http_handler: HttpHandler,
    base_url: Url,
}

impl FeedClient {
    /// Creates a client with default configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if HTTP client creation fails
    pub fn new() -> FetchResult<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Creates a client with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the base URL is invalid or HTTP client
    /// creation fails
    pub fn with_config(config: &ClientConfig) -> FetchResult<Self> {
        let base_url = Url::parse(&config.feed_base_url).map_err(|e| FetchError::InvalidUrl {
            url: config.feed_base_url.clone(),
            error: e.to_string(),
        })?;
        let client = config.build_http_client()?;
        let http_handler = HttpHandler::new(client, config.request_timeout.as_secs());

        debug!("Created feed client for {}", base_url);

        Ok(Self {
            http_handler,
            base_url,
        })
    }

    /// Feed URL for one storefront and application, most recent first
    pub fn feed_url(&self, country: &CountryCode, app_id: u64) -> FetchResult<Url> {
        let path = format!(
            "{}/rss/customerreviews/id={}/sortBy=mostRecent/json",
            country.as_str().to_ascii_lowercase(),
            app_id
        );

        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }

        base.join(&path).map_err(|e| FetchError::InvalidUrl {
            url: format!("{}{}", base, path),
            error: e.to_string(),
        })
    }

    async fn try_fetch(&self, country: &CountryCode, app_id: u64) -> FetchResult<FeedEntries> {
        let url = self.feed_url(country, app_id)?;
        let body = self.http_handler.get_json(&url).await?;
        FeedEntries::from_body(body)
    }
}

impl ReviewSource for FeedClient {
    async fn fetch_reviews(&self, country: &CountryCode, app_id: u64) -> FetchOutcome {
        debug!("Getting reviews for country {}", country);

        match self.try_fetch(country, app_id).await {
            Ok(entries) => {
                debug!("{}: {} entries", country, entries.len());
                entries.into_outcome(country)
            }
            Err(e) => {
                warn!("Fetching reviews for {} failed: {}", country, e);
                FetchOutcome::Failed(e)
            }
        }
    }
}
