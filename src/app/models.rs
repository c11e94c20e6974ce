//! Data models for the review fetcher
//!
//! This module contains the core data structures that flow through the
//! pipeline: market codes and application descriptors from configuration,
//! raw feed records produced by the fetcher, the per-fetch outcome, the
//! per-country outcome bookkeeping, and the parsed `Review` entity.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::feed;
use crate::errors::{ConfigError, FetchError};

/// Two-letter storefront market code, always upper case
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CountryCode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidValue {
                field: "country".to_string(),
                value: s.to_string(),
                reason: "Expected a two-letter market code".to_string(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for CountryCode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An application to collect reviews for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    /// Display name, lower-cased for output file names
    pub name: String,
    /// Upstream numeric store identifier
    pub id: u64,
}

impl AppDescriptor {
    pub fn new(name: impl Into<String>, id: u64) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }

    /// Lower-case name used in file names and logs
    pub fn slug(&self) -> String {
        self.name.to_lowercase()
    }
}

impl FromStr for AppDescriptor {
    type Err = ConfigError;

    /// Parse the `NAME=ID` form accepted on the command line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidValue {
            field: "app".to_string(),
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (name, id) = s
            .split_once('=')
            .ok_or_else(|| invalid("Expected NAME=ID"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid("Application name cannot be empty"));
        }
        let id = id
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid("Application id must be numeric"))?;

        Ok(Self::new(name, id))
    }
}

/// One feed entry exactly as returned upstream, plus the injected market code
///
/// Nested fields are objects whose `label` member holds the scalar value,
/// e.g. `{"im:rating": {"label": "5"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawReviewRecord(Map<String, Value>);

impl RawReviewRecord {
    /// Wrap an entry object and inject the queried market code
    pub fn with_country(mut fields: Map<String, Value>, country: &CountryCode) -> Self {
        fields.insert(
            feed::COUNTRY_KEY.to_string(),
            Value::String(country.as_str().to_string()),
        );
        Self(fields)
    }

    /// Wrap an entry object as-is
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The market code injected by the fetcher
    pub fn country(&self) -> Option<&str> {
        self.0.get(feed::COUNTRY_KEY).and_then(Value::as_str)
    }

    /// The `label` member of a top-level nested field
    pub fn label(&self, field: &str) -> Option<&Value> {
        self.label_at(&[field])
    }

    /// The `label` member at the end of a path of nested objects
    pub fn label_at(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut node = self.0.get(*first)?;
        for key in rest {
            node = node.get(*key)?;
        }
        node.get(feed::LABEL_KEY)
    }
}

/// Classification of one (country, application) fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Success,
    NoReviews,
    Failed,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Success => write!(f, "success"),
            FetchStatus::NoReviews => write!(f, "no_reviews"),
            FetchStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result of one fetch, carrying the records or the failure cause
#[derive(Debug)]
pub enum FetchOutcome {
    /// Feed contained at least one entry
    Success(Vec<RawReviewRecord>),
    /// Feed had no `feed.entry` path
    NoReviews,
    /// Transport, status, or body-shape failure
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn status(&self) -> FetchStatus {
        match self {
            FetchOutcome::Success(_) => FetchStatus::Success,
            FetchOutcome::NoReviews => FetchStatus::NoReviews,
            FetchOutcome::Failed(_) => FetchStatus::Failed,
        }
    }

    /// Consume the outcome, keeping only the records
    pub fn into_records(self) -> Vec<RawReviewRecord> {
        match self {
            FetchOutcome::Success(records) => records,
            FetchOutcome::NoReviews | FetchOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Market codes partitioned by fetch status
///
/// Within one application run every queried country lands in exactly one
/// set. Summaries merge several runs by per-category union, so after
/// `merge` a country may appear in more than one set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryOutcomeSet {
    pub successful: BTreeSet<CountryCode>,
    pub no_reviews: BTreeSet<CountryCode>,
    pub failed: BTreeSet<CountryCode>,
}

impl CountryOutcomeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the status of one country
    pub fn record(&mut self, country: CountryCode, status: FetchStatus) {
        match status {
            FetchStatus::Success => self.successful.insert(country),
            FetchStatus::NoReviews => self.no_reviews.insert(country),
            FetchStatus::Failed => self.failed.insert(country),
        };
    }

    /// Per-category union with another set
    pub fn merge(&mut self, other: &CountryOutcomeSet) {
        self.successful.extend(other.successful.iter().cloned());
        self.no_reviews.extend(other.no_reviews.iter().cloned());
        self.failed.extend(other.failed.iter().cloned());
    }

    /// Countries recorded under the given status
    pub fn get(&self, status: FetchStatus) -> &BTreeSet<CountryCode> {
        match status {
            FetchStatus::Success => &self.successful,
            FetchStatus::NoReviews => &self.no_reviews,
            FetchStatus::Failed => &self.failed,
        }
    }

    /// Status of a country, if recorded (first match in success, no-reviews, failed order)
    pub fn status_of(&self, country: &CountryCode) -> Option<FetchStatus> {
        [
            FetchStatus::Success,
            FetchStatus::NoReviews,
            FetchStatus::Failed,
        ]
        .into_iter()
        .find(|status| self.get(*status).contains(country))
    }

    /// True when no country appears in more than one set
    pub fn is_disjoint(&self) -> bool {
        self.successful.is_disjoint(&self.no_reviews)
            && self.successful.is_disjoint(&self.failed)
            && self.no_reviews.is_disjoint(&self.failed)
    }

    /// All countries across the three sets
    pub fn all_countries(&self) -> BTreeSet<CountryCode> {
        self.successful
            .iter()
            .chain(&self.no_reviews)
            .chain(&self.failed)
            .cloned()
            .collect()
    }

    /// Total number of entries across the three sets
    pub fn total(&self) -> usize {
        self.successful.len() + self.no_reviews.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// A parsed customer review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub date: NaiveDate,
    pub country: CountryCode,
    pub user_rating: u8,
    pub title: String,
    pub body: String,
    pub vote_sum: i64,
    pub vote_count: u64,
    pub app_version: String,
}
