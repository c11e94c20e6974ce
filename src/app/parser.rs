//! Conversion of raw feed records into `Review` values
//!
//! Parsing is a pure, all-or-nothing pass: the first record with a missing
//! field or an uncoercible value fails the whole batch and nothing is
//! returned for it.
//!
//! The review's market code comes from the `country` field the fetcher
//! injected. The storefront segment of `author.uri` is only compared against
//! it for diagnostics.

use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

use crate::app::models::{CountryCode, RawReviewRecord, Review};
use crate::constants::feed;
use crate::errors::{ParseError, ParseResult};

/// Upstream field names
mod fields {
    pub const UPDATED: &str = "updated";
    pub const RATING: &str = "im:rating";
    pub const TITLE: &str = "title";
    pub const CONTENT: &str = "content";
    pub const VOTE_SUM: &str = "im:voteSum";
    pub const VOTE_COUNT: &str = "im:voteCount";
    pub const VERSION: &str = "im:version";
    pub const AUTHOR_URI: [&str; 2] = ["author", "uri"];
}

/// Parse every record of a run into a `Review`
///
/// # Errors
///
/// Returns the first `ParseError` encountered; no partial output is produced
pub fn parse_reviews(records: &[RawReviewRecord]) -> ParseResult<Vec<Review>> {
    info!("Parsing {} reviews", records.len());

    let reviews = records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_review(index, record))
        .collect::<ParseResult<Vec<_>>>()?;

    debug!("Parsed {} reviews", reviews.len());
    Ok(reviews)
}

/// Parse a single record; `index` is only used for error reporting
pub fn parse_review(index: usize, record: &RawReviewRecord) -> ParseResult<Review> {
    let reader = RecordReader { index, record };

    let country = reader.country()?;
    if let Some(uri_country) = country_from_author_uri(record) {
        if !uri_country.eq_ignore_ascii_case(country.as_str()) {
            debug!(
                "Review #{} fetched from {} but author URI points at {}",
                index, country, uri_country
            );
        }
    }

    Ok(Review {
        date: reader.date(fields::UPDATED)?,
        country,
        user_rating: reader.number(fields::RATING)?,
        title: reader.text(fields::TITLE)?,
        body: reader.text(fields::CONTENT)?,
        vote_sum: reader.number(fields::VOTE_SUM)?,
        vote_count: reader.number(fields::VOTE_COUNT)?,
        app_version: reader.text(fields::VERSION)?,
    })
}

/// Storefront segment of `author.uri.label`
///
/// `https://itunes.apple.com/gb/reviews/id123` yields `gb`.
pub fn country_from_author_uri(record: &RawReviewRecord) -> Option<&str> {
    record
        .label_at(&fields::AUTHOR_URI)?
        .as_str()?
        .split('/')
        .nth(3)
        .filter(|segment| !segment.is_empty())
}

/// Field accessors that report failures against the record index
struct RecordReader<'a> {
    index: usize,
    record: &'a RawReviewRecord,
}

impl RecordReader<'_> {
    fn missing(&self, field: &str) -> ParseError {
        ParseError::MissingField {
            index: self.index,
            field: field.to_string(),
        }
    }

    fn invalid(&self, field: &str, value: impl ToString) -> ParseError {
        ParseError::InvalidValue {
            index: self.index,
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    fn text(&self, field: &str) -> ParseResult<String> {
        match self.record.label(field) {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(Value::Number(number)) => Ok(number.to_string()),
            Some(other) => Err(self.invalid(field, other)),
            None => Err(self.missing(field)),
        }
    }

    fn number<T: FromStr>(&self, field: &str) -> ParseResult<T> {
        let text = self.text(field)?;
        text.trim()
            .parse::<T>()
            .map_err(|_| self.invalid(field, &text))
    }

    fn date(&self, field: &str) -> ParseResult<NaiveDate> {
        let text = self.text(field)?;
        let day = text.split('T').next().unwrap_or_default();
        NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| self.invalid(field, &text))
    }

    fn country(&self) -> ParseResult<CountryCode> {
        let code = self
            .record
            .country()
            .ok_or_else(|| self.missing(feed::COUNTRY_KEY))?;
        code.parse()
            .map_err(|_| self.invalid(feed::COUNTRY_KEY, code))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(country: &str, rating: &str, updated: &str) -> RawReviewRecord {
        let fields = json!({
            "author": {
                "uri": {"label": format!("https://itunes.apple.com/{}/reviews/id99", country.to_lowercase())},
                "name": {"label": "reviewer"}
            },
            "updated": {"label": updated},
            "im:rating": {"label": rating},
            "im:version": {"label": "3.2.1"},
            "id": {"label": "1234"},
            "title": {"label": "Title"},
            "content": {"label": "Body text", "attributes": {"type": "text"}},
            "im:voteSum": {"label": "-2"},
            "im:voteCount": {"label": "7"}
        });
        RawReviewRecord::with_country(
            fields.as_object().cloned().unwrap(),
            &country.parse().unwrap(),
        )
    }

    #[test]
    fn test_parse_full_record() {
        let review = parse_review(0, &raw("US", "5", "2024-05-01T10:00:00-07:00")).unwrap();

        assert_eq!(review.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(review.country.as_str(), "US");
        assert_eq!(review.user_rating, 5);
        assert_eq!(review.title, "Title");
        assert_eq!(review.body, "Body text");
        assert_eq!(review.vote_sum, -2);
        assert_eq!(review.vote_count, 7);
        assert_eq!(review.app_version, "3.2.1");
    }

    #[test]
    fn test_date_keeps_day_before_time_separator() {
        let review = parse_review(0, &raw("FR", "2", "2024-05-01T23:59:59+14:00")).unwrap();
        assert_eq!(review.date.to_string(), "2024-05-01");

        let date_only = parse_review(0, &raw("FR", "2", "2023-12-31")).unwrap();
        assert_eq!(date_only.date.to_string(), "2023-12-31");
    }

    #[test]
    fn test_numeric_labels_are_coerced() {
        let mut fields = raw("US", "5", "2024-05-01T10:00:00-07:00").fields().clone();
        fields.insert("im:rating".to_string(), json!({"label": 4}));
        let record = RawReviewRecord::from_fields(fields);

        assert_eq!(parse_review(0, &record).unwrap().user_rating, 4);
    }

    #[test]
    fn test_missing_field_fails_whole_batch() {
        let mut broken = raw("DE", "3", "2024-01-01T00:00:00Z").fields().clone();
        broken.remove("im:voteCount");
        let records = vec![
            raw("US", "5", "2024-05-01T10:00:00-07:00"),
            RawReviewRecord::from_fields(broken),
            raw("FR", "1", "2024-04-01T10:00:00-07:00"),
        ];

        assert_eq!(
            parse_reviews(&records),
            Err(ParseError::MissingField {
                index: 1,
                field: "im:voteCount".to_string()
            })
        );
    }

    #[test]
    fn test_uncoercible_value_fails() {
        let records = vec![raw("US", "five", "2024-05-01T10:00:00-07:00")];
        assert!(matches!(
            parse_reviews(&records),
            Err(ParseError::InvalidValue { index: 0, ref field, .. }) if field == "im:rating"
        ));

        let bad_date = vec![raw("US", "5", "yesterday")];
        assert!(parse_reviews(&bad_date).is_err());
    }

    #[test]
    fn test_country_comes_from_injected_field() {
        let mut fields = raw("GB", "4", "2024-05-01T10:00:00-07:00").fields().clone();
        fields.insert(
            "author".to_string(),
            json!({"uri": {"label": "https://itunes.apple.com/ie/reviews/id1"}}),
        );
        let record = RawReviewRecord::from_fields(fields);

        assert_eq!(country_from_author_uri(&record), Some("ie"));
        assert_eq!(parse_review(0, &record).unwrap().country.as_str(), "GB");
    }

    #[test]
    fn test_record_without_injected_country_fails() {
        let mut fields = raw("GB", "4", "2024-05-01T10:00:00-07:00").fields().clone();
        fields.remove("country");
        let record = RawReviewRecord::from_fields(fields);

        assert!(matches!(
            parse_review(0, &record),
            Err(ParseError::MissingField { ref field, .. }) if field == "country"
        ));
    }

    #[test]
    fn test_parse_is_pure_and_order_preserving() {
        let records = vec![
            raw("US", "5", "2024-05-01T10:00:00-07:00"),
            raw("FR", "2", "2024-03-01T10:00:00-07:00"),
            raw("JP", "4", "2024-04-01T10:00:00-07:00"),
        ];
        let forward = parse_reviews(&records).unwrap();
        assert_eq!(forward, parse_reviews(&records).unwrap());

        let reversed_input: Vec<_> = records.iter().rev().cloned().collect();
        let mut reversed_output = parse_reviews(&reversed_input).unwrap();
        reversed_output.reverse();
        assert_eq!(forward, reversed_output);
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(parse_reviews(&[]), Ok(Vec::new()));
    }
}
