//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the HTTP client
//! used for review feed requests.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::{feed, http};
use crate::errors::{FetchError, FetchResult};

/// Configuration for the feed HTTP client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the review feed
    pub feed_base_url: String,
    /// Total response timeout per request
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connect timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Connection pool idle timeout
    #[serde(with = "humantime_serde")]
    pub pool_idle_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            feed_base_url: feed::BASE_URL.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> FetchResult<Client> {
        let mut client_builder = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(http::USER_AGENT);

        if let Some(idle_timeout) = self.pool_idle_timeout {
            client_builder = client_builder.pool_idle_timeout(idle_timeout);
        }

        client_builder.build().map_err(FetchError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.feed_base_url, feed::BASE_URL);
    }

    #[test]
    fn test_http_client_creation() {
        let config = ClientConfig {
            request_timeout: Duration::from_millis(250),
            ..Default::default()
        };
        assert!(config.build_http_client().is_ok());
    }

    #[test]
    fn test_humantime_roundtrip_in_toml() {
        let config = ClientConfig::default();
        let rendered = toml::to_string(&config).unwrap();
        assert!(rendered.contains("request_timeout = \"5s\""));

        let parsed: ClientConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.request_timeout, config.request_timeout);
        assert_eq!(parsed.pool_idle_timeout, config.pool_idle_timeout);
    }
}
