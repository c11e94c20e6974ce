//! Run-scoped bookkeeping with guaranteed summary output
//!
//! A `RunContext` is opened when fetching begins. Whatever happens afterwards,
//! the summary is handed to the `SummaryWriter` exactly once: by `finish` on
//! the normal path, or by `Drop` when the run is abandoned through an early
//! return or a panic.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{error, info, warn};

use super::summary::RunSummary;
use crate::app::dispatcher::DispatchResult;
use crate::app::models::{AppDescriptor, CountryOutcomeSet};
use crate::errors::{ExportError, ExportResult};

/// Writes the rendered run summary to a text file
#[derive(Debug, Clone)]
pub struct SummaryWriter {
    path: PathBuf,
}

impl SummaryWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log the summary and write it to the log file
    ///
    /// Synchronous so it can run from `Drop`.
    pub fn write(&self, summary: &RunSummary) -> ExportResult<()> {
        let rendered = summary.render();
        for line in rendered.lines().filter(|line| !line.is_empty()) {
            info!("{}", line);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|_| ExportError::DirectoryNotAccessible {
                path: parent.to_path_buf(),
            })?;
        }

        fs::write(&self.path, rendered).map_err(|source| ExportError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!("Run summary written to {}", self.path.display());
        Ok(())
    }
}

/// Accumulates per-application outcomes for the whole run
#[derive(Debug)]
pub struct RunContext {
    started: Instant,
    started_at: DateTime<Local>,
    apps_processed: Vec<String>,
    incomplete_apps: Vec<String>,
    outcomes: CountryOutcomeSet,
    writer: SummaryWriter,
    finalized: bool,
}

impl RunContext {
    /// Open a run; the clock starts now
    pub fn begin(writer: SummaryWriter) -> Self {
        Self {
            started: Instant::now(),
            started_at: Local::now(),
            apps_processed: Vec::new(),
            incomplete_apps: Vec::new(),
            outcomes: CountryOutcomeSet::new(),
            writer,
            finalized: false,
        }
    }

    /// Fold one application's dispatch into the run
    pub fn record_app(&mut self, result: &DispatchResult) {
        self.apps_processed.push(result.app.slug());
        self.outcomes.merge(&result.outcomes);
    }

    /// Note an application whose reviews were fetched but not exported
    pub fn mark_incomplete(&mut self, app: &AppDescriptor) {
        self.incomplete_apps.push(app.slug());
    }

    /// Snapshot of the run so far
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            apps_processed: self.apps_processed.clone(),
            elapsed: self.started.elapsed(),
            outcomes: self.outcomes.clone(),
            started_at: self.started_at,
            incomplete_apps: self.incomplete_apps.clone(),
        }
    }

    /// Close the run and write its summary
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the summary file cannot be written. The
    /// summary is not retried from `Drop`.
    pub fn finish(mut self) -> ExportResult<RunSummary> {
        self.finalized = true;
        let summary = self.summary();
        self.writer.write(&summary)?;
        Ok(summary)
    }
}

impl Drop for RunContext {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;

        warn!("Run ended before completion; writing partial summary");
        if let Err(e) = self.writer.write(&self.summary()) {
            error!("Failed to write run summary: {}", e);
        }
    }
}
