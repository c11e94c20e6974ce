//! Aggregation of parsed reviews and the run summary
//!
//! - [`summary`] - what the run did and how it is rendered
//! - [`context`] - run-scoped accumulation with guaranteed summary output

pub mod context;
pub mod summary;

pub use context::{RunContext, SummaryWriter};
pub use summary::RunSummary;

use crate::app::models::Review;

/// Order reviews newest first
///
/// The sort is stable, so reviews sharing a date keep their input order.
pub fn sort_most_recent_first(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.sort_by(|a, b| b.date.cmp(&a.date));
    reviews
}
