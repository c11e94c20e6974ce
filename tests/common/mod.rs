//! Shared helpers for integration tests
//!
//! `FeedStub` wraps a `mockito` server with one mock per storefront, matched
//! on the storefront segment of the feed path. Storefronts without a mock get
//! mockito's default 501 reply.

#![allow(dead_code)]

use std::io::Write;
use std::time::Duration;

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{Value, json};

use review_fetcher::app::ClientConfig;

/// Canned reply for one storefront
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: usize,
    pub body: String,
    pub delay: Duration,
}

impl StubReply {
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: usize) -> Self {
        Self {
            status,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    /// Hold the body back for `delay` before streaming it
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Mock feed server; mocks live as long as the stub
pub struct FeedStub {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl FeedStub {
    pub async fn start(routes: Vec<(&str, StubReply)>) -> Self {
        let mut server = mockito::Server::new_async().await;
        let mut mocks = Vec::with_capacity(routes.len());

        for (country, reply) in routes {
            let path = Matcher::Regex(format!(
                r"^/{}/rss/customerreviews/id=\d+/sortBy=mostRecent/json$",
                country.to_ascii_lowercase()
            ));
            let mock = server
                .mock("GET", path)
                .with_status(reply.status)
                .with_header("content-type", "application/json");

            let mock = if reply.delay.is_zero() {
                mock.with_body(reply.body)
            } else {
                let StubReply { body, delay, .. } = reply;
                mock.with_chunked_body(move |writer: &mut dyn Write| {
                    std::thread::sleep(delay);
                    writer.write_all(body.as_bytes())
                })
            };

            mocks.push(mock.create_async().await);
        }

        Self { server, mocks }
    }

    pub fn base_url(&self) -> String {
        self.server.url()
    }

    /// Client settings pointed at this stub
    pub fn client_config(&self, request_timeout: Duration) -> ClientConfig {
        ClientConfig {
            feed_base_url: self.base_url(),
            request_timeout,
            connect_timeout: Duration::from_secs(2),
            pool_idle_timeout: None,
        }
    }
}

/// One feed entry in the shape the review feed uses
pub fn entry(updated: &str, rating: u8, title: &str, author_country: &str) -> Value {
    json!({
        "updated": { "label": updated },
        "im:rating": { "label": rating.to_string() },
        "title": { "label": title },
        "content": { "label": format!("{} body", title), "attributes": { "type": "text" } },
        "im:voteSum": { "label": "3" },
        "im:voteCount": { "label": "4" },
        "im:version": { "label": "2.1.0" },
        "author": {
            "uri": { "label": format!("https://itunes.apple.com/{}/reviews/id123", author_country) },
            "name": { "label": "someone" }
        }
    })
}

/// Feed document whose `entry` is an array
pub fn feed_many(entries: Vec<Value>) -> Value {
    json!({ "feed": { "entry": entries } })
}

/// Feed document whose `entry` is a single object
pub fn feed_single(entry: Value) -> Value {
    json!({ "feed": { "entry": entry } })
}

/// Feed document with no `entry` key
pub fn feed_without_entries() -> Value {
    json!({ "feed": { "author": { "name": { "label": "iTunes Store" } } } })
}
