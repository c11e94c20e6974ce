//! Run summary and its human-readable rendering

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::app::models::{CountryCode, CountryOutcomeSet, FetchStatus};

/// What a run did, across all applications processed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Application names in processing order
    pub apps_processed: Vec<String>,
    /// Wall-clock time from the first fetch to finalization
    pub elapsed: Duration,
    /// Per-category union of every application's outcomes
    pub outcomes: CountryOutcomeSet,
    /// When the run started
    pub started_at: DateTime<Local>,
    /// Applications whose reviews could not be parsed or exported
    pub incomplete_apps: Vec<String>,
}

impl RunSummary {
    /// Number of distinct countries per category
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.outcomes.successful.len(),
            self.outcomes.no_reviews.len(),
            self.outcomes.failed.len(),
        )
    }

    /// Render the report written to the run log
    pub fn render(&self) -> String {
        let mut out = String::new();
        let (successful, no_reviews, failed) = self.counts();

        let started = self.started_at.format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(out, "Review fetch run started {}", started);
        let _ = writeln!(
            out,
            "Total execution time: {:.2} seconds",
            self.elapsed.as_secs_f64()
        );
        let _ = writeln!(out);

        if self.apps_processed.is_empty() {
            let _ = writeln!(out, "Apps processed: none");
        } else {
            let _ = writeln!(out, "Apps processed: {}", self.apps_processed.join(", "));
        }
        if !self.incomplete_apps.is_empty() {
            let incomplete = self.incomplete_apps.join(", ");
            let _ = writeln!(out, "Apps without export: {}", incomplete);
        }
        let _ = writeln!(out);

        let sections = [
            ("Countries with reviews", successful, FetchStatus::Success),
            ("Countries without reviews", no_reviews, FetchStatus::NoReviews),
            ("Countries that failed", failed, FetchStatus::Failed),
        ];
        for (heading, count, status) in sections {
            let _ = writeln!(out, "{} ({}):", heading, count);
            let _ = writeln!(out, "  {}", join_codes(self.outcomes.get(status)));
        }

        out
    }
}

fn join_codes<'a>(codes: impl IntoIterator<Item = &'a CountryCode>) -> String {
    let joined = codes
        .into_iter()
        .map(CountryCode::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
