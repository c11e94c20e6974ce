//! Core HTTP operations for feed requests
//!
//! One request, no retries. Every failure is mapped onto a `FetchError`
//! variant so callers can classify it.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::errors::{FetchError, FetchResult};

/// HTTP operations handler
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
    timeout_secs: u64,
}

impl HttpHandler {
    /// Creates a new HttpHandler
    ///
    /// `timeout_secs` is only used to label timeout errors; the timeout itself
    /// is enforced by the client.
    pub fn new(client: Client, timeout_secs: u64) -> Self {
        Self {
            client,
            timeout_secs,
        }
    }

    /// Fetches a URL and decodes the body as JSON
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on timeout, transport failure, any status other
    /// than 200, or a body that is not JSON
    pub async fn get_json(&self, url: &Url) -> FetchResult<Value> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| FetchError::from_transport(e, self.timeout_secs))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_transport(e, self.timeout_secs))?;

        tracing::trace!("Fetched {} bytes from {}", body.len(), url);
        Ok(serde_json::from_slice(&body)?)
    }
}
