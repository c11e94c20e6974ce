//! Spreadsheet export of parsed reviews
//!
//! One workbook per application, named `ios_<lowercase name>_reviews.xlsx`,
//! with a header row followed by one row per review in the order given.

use std::fs;
use std::path::PathBuf;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::info;

use crate::app::models::{AppDescriptor, Review};
use crate::constants::output;
use crate::errors::{ExportError, ExportResult};

/// Writes review spreadsheets into an output directory
#[derive(Debug, Clone)]
pub struct SpreadsheetWriter {
    output_dir: PathBuf,
}

impl SpreadsheetWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the workbook for `app` is written to
    pub fn path_for(&self, app: &AppDescriptor) -> PathBuf {
        self.output_dir.join(format!(
            "{}{}{}",
            output::EXPORT_PREFIX,
            app.slug(),
            output::EXPORT_SUFFIX
        ))
    }

    /// Write one application's reviews, replacing any previous workbook
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the output directory cannot be created or the
    /// workbook cannot be built or saved
    pub fn write(&self, app: &AppDescriptor, reviews: &[Review]) -> ExportResult<PathBuf> {
        info!("Saving {} reviews for {} to spreadsheet", reviews.len(), app.slug());

        fs::create_dir_all(&self.output_dir).map_err(|_| ExportError::DirectoryNotAccessible {
            path: self.output_dir.clone(),
        })?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("reviews")?;
        write_header(worksheet)?;
        for (index, review) in reviews.iter().enumerate() {
            write_row(worksheet, index as u32 + 1, review)?;
        }

        let path = self.path_for(app);
        workbook.save(&path)?;

        info!("Saved {}", path.display());
        Ok(path)
    }
}

fn write_header(worksheet: &mut Worksheet) -> ExportResult<()> {
    let bold = Format::new().set_bold();
    for (col, name) in output::COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_row(worksheet: &mut Worksheet, row: u32, review: &Review) -> ExportResult<()> {
    worksheet.write_string(row, 0, review.date.format("%Y-%m-%d").to_string())?;
    worksheet.write_string(row, 1, review.country.as_str())?;
    worksheet.write_number(row, 2, f64::from(review.user_rating))?;
    worksheet.write_string(row, 3, &review.title)?;
    worksheet.write_string(row, 4, &review.body)?;
    worksheet.write_number(row, 5, review.vote_sum as f64)?;
    worksheet.write_number(row, 6, review.vote_count as f64)?;
    worksheet.write_string(row, 7, &review.app_version)?;
    Ok(())
}
