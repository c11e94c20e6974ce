//! Review Fetcher Library
//!
//! Collects App Store customer reviews for one or more applications across
//! every storefront market, concurrently, and exports them as spreadsheets
//! with a per-run summary of which markets had reviews, had none, or failed.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
