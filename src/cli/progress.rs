//! Per-application progress bar for the fetch command
//!
//! One bar per application, advanced once per completed country, with the
//! running success / no-reviews / failed tallies in the message.

use indicatif::{ProgressBar, ProgressStyle};

use crate::app::{CountryCode, FetchStatus};

/// Progress bar over the countries of one application
pub struct FetchProgress {
    bar: ProgressBar,
    successful: usize,
    no_reviews: usize,
    failed: usize,
}

impl FetchProgress {
    /// Create a bar for `total` countries; hidden when `enabled` is false
    pub fn new(app_name: &str, total: usize, enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::default_bar()
            .template("{prefix:>12.cyan.bold} [{bar:40.green/white}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_prefix(app_name.to_string());

        Self {
            bar,
            successful: 0,
            no_reviews: 0,
            failed: 0,
        }
    }

    /// Count one completed country
    pub fn record(&mut self, country: &CountryCode, status: FetchStatus) {
        match status {
            FetchStatus::Success => self.successful += 1,
            FetchStatus::NoReviews => self.no_reviews += 1,
            FetchStatus::Failed => self.failed += 1,
        }
        self.bar.set_message(format!(
            "{} | ok {} | empty {} | failed {}",
            country, self.successful, self.no_reviews, self.failed
        ));
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
