//! Per-application processing: fetch, parse, sort, export
//!
//! Parse failures are contained to the application they occur in: the
//! error is logged, the application is marked incomplete in the run summary,
//! and processing moves on. Export failures propagate.

use std::path::PathBuf;

use tracing::{error, info};

use crate::app::client::ReviewSource;
use crate::app::dispatcher::{DispatchResult, Dispatcher};
use crate::app::export::SpreadsheetWriter;
use crate::app::models::{AppDescriptor, CountryCode, FetchStatus, Review};
use crate::app::parser::parse_reviews;
use crate::app::report::{RunContext, sort_most_recent_first};
use crate::errors::{ExportResult, ParseError, ParseResult};

/// What happened to one application
#[derive(Debug)]
pub struct AppRunOutcome {
    pub app: AppDescriptor,
    /// Number of reviews exported
    pub review_count: usize,
    /// Workbook written, if parsing succeeded
    pub export_path: Option<PathBuf>,
    /// Why nothing was exported, if parsing failed
    pub parse_error: Option<ParseError>,
}

/// Parse a dispatch's records and order them newest first
pub fn collect_reviews(result: &DispatchResult) -> ParseResult<Vec<Review>> {
    parse_reviews(&result.records).map(sort_most_recent_first)
}

/// Run one application through the whole pipeline
///
/// The dispatch outcome is recorded in `context` before parsing starts, so
/// it reaches the run summary even if a later stage fails.
///
/// # Errors
///
/// Returns `ExportError` if the spreadsheet cannot be written
pub async fn process_app<S, F>(
    dispatcher: &Dispatcher<S>,
    app: &AppDescriptor,
    countries: &[CountryCode],
    exporter: &SpreadsheetWriter,
    context: &mut RunContext,
    on_complete: F,
) -> ExportResult<AppRunOutcome>
where
    S: ReviewSource,
    F: FnMut(&CountryCode, FetchStatus),
{
    info!("Processing app {}", app.slug());

    let result = dispatcher
        .dispatch_with_progress(app, countries, on_complete)
        .await;
    context.record_app(&result);

    let reviews = match collect_reviews(&result) {
        Ok(reviews) => reviews,
        Err(e) => {
            error!("Failed to parse reviews for {}: {}", app.slug(), e);
            context.mark_incomplete(app);
            return Ok(AppRunOutcome {
                app: app.clone(),
                review_count: 0,
                export_path: None,
                parse_error: Some(e),
            });
        }
    };

    let export_path = match exporter.write(app, &reviews) {
        Ok(path) => path,
        Err(e) => {
            context.mark_incomplete(app);
            return Err(e);
        }
    };

    Ok(AppRunOutcome {
        app: app.clone(),
        review_count: reviews.len(),
        export_path: Some(export_path),
        parse_error: None,
    })
}
