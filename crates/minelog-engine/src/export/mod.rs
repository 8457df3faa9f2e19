//! Report export: tabular CSV and branded PDF documents.
//!
//! Both formats project the filtered record set handed in by the caller;
//! nothing here reads or changes view state.

mod layout;
mod logo;
mod pdf;
mod tabular;

pub use layout::{
    Align, Element, GOLD, PageElement, Part, ROW_SHADE, ReportDocument, ReportPage, Rgb8,
    TABLE_BOTTOM, layout_report,
};
pub use logo::{DEFAULT_LOGO_PNG, Logo, LogoSource, decode_logo, load_logo};
pub use pdf::render_pdf;
pub use tabular::write_csv;

use chrono::{Local, NaiveDate, NaiveDateTime};
use minelog_types::{BrandingSettings, DateRange, Record, RecordKind, ReferenceData, Theme};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Result, Summarize};

/// Default display format for dates in exported cells
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A named blob ready for a download sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// strftime pattern for date cells
    pub date_format: String,
    pub theme: Theme,
    /// Stamped into file names and PDF footers
    pub generated_at: NaiveDateTime,
}

impl ExportOptions {
    pub fn new(generated_at: NaiveDateTime) -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            theme: Theme::default(),
            generated_at,
        }
    }

    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(Local::now().naive_local())
    }
}

/// `<domain>_<yyyy-MM-dd>.<ext>`
pub fn file_name(kind: RecordKind, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        kind.domain(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Export the filtered set as comma-separated text with a header row
pub fn export_csv<R: Record>(records: &[R], options: &ExportOptions) -> Result<ExportFile> {
    let bytes = write_csv(records, &options.date_format)?;
    let file_name = file_name(R::KIND, options.generated_at.date(), ExportFormat::Csv);
    tracing::info!(kind = %R::KIND, rows = records.len(), file = %file_name, "exported CSV");
    Ok(ExportFile {
        file_name,
        format: ExportFormat::Csv,
        bytes,
    })
}

/// Export the filtered set as a branded, paginated PDF.
///
/// Absent branding falls back to default text; a logo that fails to decode
/// falls back to the bundled image. Neither aborts the export.
pub fn export_pdf<R: Summarize>(
    records: &[R],
    range: &DateRange,
    branding: Option<&BrandingSettings>,
    reference: &ReferenceData,
    options: &ExportOptions,
) -> Result<ExportFile> {
    let logo = load_logo(branding, options.theme);
    let document = layout_report(records, range, branding, reference, options, logo.is_some());
    let bytes = render_pdf(&document, logo.as_ref())?;
    let file_name = file_name(R::KIND, options.generated_at.date(), ExportFormat::Pdf);
    tracing::info!(
        kind = %R::KIND,
        rows = document.row_count,
        pages = document.pages.len(),
        file = %file_name,
        "exported PDF"
    );
    Ok(ExportFile {
        file_name,
        format: ExportFormat::Pdf,
        bytes,
    })
}
