//! Application constants for the review fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("review-fetcher/", env!("CARGO_PKG_VERSION"));

    /// Response timeout applied to every feed request
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
}

/// Upstream review feed
pub mod feed {
    /// Base URL of the public customer-review RSS feed
    pub const BASE_URL: &str = "https://itunes.apple.com";

    /// Top-level container holding the entry collection
    pub const FEED_KEY: &str = "feed";

    /// Entry collection inside the feed container
    pub const ENTRY_KEY: &str = "entry";

    /// Field injected into every entry with the queried market code
    pub const COUNTRY_KEY: &str = "country";

    /// Member of a nested field object that carries the scalar value
    pub const LABEL_KEY: &str = "label";
}

/// Worker and concurrency configuration
pub mod workers {
    /// Default number of concurrent in-flight fetches per application
    pub const DEFAULT_WORKER_COUNT: usize = 15;

    /// Upper bound accepted by configuration validation
    pub const MAX_WORKER_COUNT: usize = 128;
}

/// Output file naming
pub mod output {
    /// Prefix of every exported spreadsheet
    pub const EXPORT_PREFIX: &str = "ios_";

    /// Suffix of every exported spreadsheet
    pub const EXPORT_SUFFIX: &str = "_reviews.xlsx";

    /// Default run summary file name
    pub const DEFAULT_LOG_FILE: &str = "ios_reviews_log.txt";

    /// Worksheet column headers, in `Review` field order
    pub const COLUMNS: [&str; 8] = [
        "date",
        "country",
        "user_rating",
        "title",
        "body",
        "vote_sum",
        "vote_count",
        "app_version",
    ];
}

/// Configuration file discovery
pub mod config {
    /// Project-local config file name
    pub const LOCAL_FILE: &str = "review-fetcher.toml";

    /// Directory name under the user config dir
    pub const APP_DIR: &str = "review-fetcher";

    /// Config file name inside the user config dir
    pub const FILE_NAME: &str = "config.toml";
}

// Re-export commonly used constants for convenience
pub use feed::BASE_URL as FEED_BASE_URL;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use workers::DEFAULT_WORKER_COUNT;
