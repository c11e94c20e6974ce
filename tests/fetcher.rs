//! Integration tests for the feed client against a mock feed server
//!
//! Every response shape the storefront feed can produce is mapped onto
//! exactly one fetch outcome.

mod common;

use std::time::Duration;

use serde_json::json;

use common::{FeedStub, StubReply, entry, feed_many, feed_single, feed_without_entries};
use review_fetcher::app::{CountryCode, FeedClient, FetchOutcome, FetchStatus, ReviewSource};
use review_fetcher::errors::FetchError;

const APP_ID: u64 = 6473000053;

fn cc(code: &str) -> CountryCode {
    code.parse().unwrap()
}

async fn client_for(stub: &FeedStub) -> FeedClient {
    FeedClient::with_config(&stub.client_config(Duration::from_secs(2))).unwrap()
}

#[tokio::test]
async fn test_array_feed_yields_every_entry_tagged_with_country() {
    let stub = FeedStub::start(vec![(
        "us",
        StubReply::json(feed_many(vec![
            entry("2024-05-01T10:00:00-07:00", 5, "Great", "us"),
            entry("2024-04-02T10:00:00-07:00", 3, "Fine", "us"),
        ])),
    )])
    .await;
    let client = client_for(&stub).await;

    let outcome = client.fetch_reviews(&cc("US"), APP_ID).await;
    assert_eq!(outcome.status(), FetchStatus::Success);

    let records = outcome.into_records();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.country() == Some("US")));
}

#[tokio::test]
async fn test_single_object_feed_yields_one_record() {
    let stub = FeedStub::start(vec![(
        "fr",
        StubReply::json(feed_single(entry("2024-03-09T08:00:00+01:00", 2, "Bof", "fr"))),
    )])
    .await;
    let client = client_for(&stub).await;

    let outcome = client.fetch_reviews(&cc("FR"), APP_ID).await;
    let records = outcome.into_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].country(), Some("FR"));
}

#[tokio::test]
async fn test_missing_entry_is_no_reviews() {
    let stub = FeedStub::start(vec![("de", StubReply::json(feed_without_entries()))]).await;
    let client = client_for(&stub).await;

    let outcome = client.fetch_reviews(&cc("DE"), APP_ID).await;
    assert!(matches!(outcome, FetchOutcome::NoReviews));
}

#[tokio::test]
async fn test_missing_feed_is_no_reviews() {
    let stub = FeedStub::start(vec![("jp", StubReply::json(json!({})))]).await;
    let client = client_for(&stub).await;

    let outcome = client.fetch_reviews(&cc("JP"), APP_ID).await;
    assert_eq!(outcome.status(), FetchStatus::NoReviews);
}

#[tokio::test]
async fn test_non_success_status_is_failure() {
    let stub = FeedStub::start(vec![("gb", StubReply::status(503))]).await;
    let client = client_for(&stub).await;

    let outcome = client.fetch_reviews(&cc("GB"), APP_ID).await;
    match outcome {
        FetchOutcome::Failed(FetchError::Status { status }) => assert_eq!(status, 503),
        other => panic!("expected status failure, got {:?}", other),
    }

    // Storefronts without a mock get mockito's 501
    let outcome = client.fetch_reviews(&cc("IT"), APP_ID).await;
    assert!(matches!(
        outcome,
        FetchOutcome::Failed(FetchError::Status { status: 501 })
    ));
}

#[tokio::test]
async fn test_malformed_body_is_failure() {
    let stub = FeedStub::start(vec![
        ("ca", StubReply::raw("<html>not json</html>")),
        ("au", StubReply::json(json!({ "feed": { "entry": "oops" } }))),
    ])
    .await;
    let client = client_for(&stub).await;

    let outcome = client.fetch_reviews(&cc("CA"), APP_ID).await;
    assert!(matches!(
        outcome,
        FetchOutcome::Failed(FetchError::InvalidBody(_))
    ));

    let outcome = client.fetch_reviews(&cc("AU"), APP_ID).await;
    assert!(matches!(
        outcome,
        FetchOutcome::Failed(FetchError::UnexpectedShape { .. })
    ));
}

#[tokio::test]
async fn test_slow_storefront_times_out_as_failure() {
    let stub = FeedStub::start(vec![(
        "br",
        StubReply::json(feed_without_entries()).delayed(Duration::from_secs(3)),
    )])
    .await;
    let config = stub.client_config(Duration::from_millis(300));
    let client = FeedClient::with_config(&config).unwrap();

    let outcome = client.fetch_reviews(&cc("BR"), APP_ID).await;
    assert_eq!(outcome.status(), FetchStatus::Failed);
    assert!(matches!(
        outcome,
        FetchOutcome::Failed(FetchError::Timeout { .. })
    ));
}

#[tokio::test]
async fn test_unreachable_host_is_failure() {
    let config = review_fetcher::app::ClientConfig {
        feed_base_url: "http://127.0.0.1:9".to_string(),
        request_timeout: Duration::from_secs(1),
        connect_timeout: Duration::from_secs(1),
        pool_idle_timeout: None,
    };
    let client = FeedClient::with_config(&config).unwrap();

    let outcome = client.fetch_reviews(&cc("US"), APP_ID).await;
    assert_eq!(outcome.status(), FetchStatus::Failed);
}
