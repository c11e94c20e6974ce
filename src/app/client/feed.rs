//! Review feed body normalization
//!
//! The feed's `entry` member is a single object when a storefront has one
//! review, an array when it has several, and missing when it has none. The
//! shape is resolved here, once, into `FeedEntries`.

use serde_json::{Map, Value};

use crate::app::models::{CountryCode, FetchOutcome, RawReviewRecord};
use crate::constants::feed;
use crate::errors::{FetchError, FetchResult};

/// The `feed.entry` member of a response body, by shape
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEntries {
    /// No `feed` container or no `entry` inside it
    Absent,
    /// Exactly one review
    Single(Map<String, Value>),
    /// A list of reviews
    Many(Vec<Map<String, Value>>),
}

impl FeedEntries {
    /// Classify a decoded response body
    ///
    /// # Errors
    ///
    /// Returns `FetchError::UnexpectedShape` when the body, the `feed`
    /// container, or the `entry` member is present but of the wrong type
    pub fn from_body(body: Value) -> FetchResult<Self> {
        let Value::Object(mut root) = body else {
            return Err(unexpected("response body is not a JSON object"));
        };

        let mut feed_container = match root.remove(feed::FEED_KEY) {
            None => return Ok(FeedEntries::Absent),
            Some(Value::Object(container)) => container,
            Some(_) => return Err(unexpected("'feed' is not an object")),
        };

        match feed_container.remove(feed::ENTRY_KEY) {
            None => Ok(FeedEntries::Absent),
            Some(Value::Object(entry)) => Ok(FeedEntries::Single(entry)),
            Some(Value::Array(entries)) => entries
                .into_iter()
                .enumerate()
                .map(|(i, entry)| match entry {
                    Value::Object(fields) => Ok(fields),
                    _ => Err(unexpected(&format!("'feed.entry[{}]' is not an object", i))),
                })
                .collect::<FetchResult<Vec<_>>>()
                .map(FeedEntries::Many),
            Some(_) => Err(unexpected("'feed.entry' is neither an object nor an array")),
        }
    }

    /// Number of entries carried
    pub fn len(&self) -> usize {
        match self {
            FeedEntries::Absent => 0,
            FeedEntries::Single(_) => 1,
            FeedEntries::Many(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a fetch outcome, tagging every entry with the market code
    pub fn into_outcome(self, country: &CountryCode) -> FetchOutcome {
        let entries = match self {
            FeedEntries::Absent => return FetchOutcome::NoReviews,
            FeedEntries::Single(entry) => vec![entry],
            FeedEntries::Many(entries) => entries,
        };

        FetchOutcome::Success(
            entries
                .into_iter()
                .map(|fields| RawReviewRecord::with_country(fields, country))
                .collect(),
        )
    }
}

fn unexpected(reason: &str) -> FetchError {
    FetchError::UnexpectedShape {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::app::models::FetchStatus;

    fn us() -> CountryCode {
        "US".parse().unwrap()
    }

    #[test]
    fn test_missing_feed_is_absent() {
        let entries = FeedEntries::from_body(json!({})).unwrap();
        assert_eq!(entries, FeedEntries::Absent);
        assert_eq!(entries.into_outcome(&us()).status(), FetchStatus::NoReviews);
    }

    #[test]
    fn test_missing_entry_is_absent() {
        let body = json!({"feed": {"author": {"name": {"label": "iTunes Store"}}}});
        assert_eq!(FeedEntries::from_body(body).unwrap(), FeedEntries::Absent);
    }

    #[test]
    fn test_single_entry_is_wrapped() {
        let body = json!({"feed": {"entry": {"title": {"label": "Solo"}}}});
        let entries = FeedEntries::from_body(body).unwrap();
        assert_eq!(entries.len(), 1);

        match entries.into_outcome(&us()) {
            FetchOutcome::Success(records) => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].country(), Some("US"));
                assert_eq!(records[0].label("title"), Some(&json!("Solo")));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_entry_list_is_used_as_is() {
        let body = json!({"feed": {"entry": [
            {"title": {"label": "one"}},
            {"title": {"label": "two"}},
            {"title": {"label": "three"}}
        ]}});
        let records = FeedEntries::from_body(body)
            .unwrap()
            .into_outcome(&us())
            .into_records();

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.country() == Some("US")));
        assert_eq!(records[2].label("title"), Some(&json!("three")));
    }

    #[test]
    fn test_injected_country_overrides_upstream_field() {
        let body = json!({"feed": {"entry": {"country": "XX"}}});
        let records = FeedEntries::from_body(body)
            .unwrap()
            .into_outcome(&us())
            .into_records();
        assert_eq!(records[0].country(), Some("US"));
    }

    #[test]
    fn test_wrong_shapes_are_errors() {
        for body in [
            json!([1, 2, 3]),
            json!({"feed": "nope"}),
            json!({"feed": {"entry": "nope"}}),
            json!({"feed": {"entry": [{"ok": 1}, 7]}}),
        ] {
            let result = FeedEntries::from_body(body.clone());
            assert!(
                matches!(result, Err(FetchError::UnexpectedShape { .. })),
                "body {} should be rejected",
                body
            );
        }
    }
}
