// Record engine: the generic fetch -> filter -> sort -> page -> export pipeline.
// Every operation is written once against `minelog_types::Record` and
// instantiated per record family.

pub mod error;
pub mod export;
pub mod filter;
pub mod pager;
pub mod range;
pub mod sort;
pub mod summary;
pub mod view;

pub use error::{Error, Result};
pub use export::{
    ExportFile, ExportFormat, ExportOptions, ReportDocument, export_csv, export_pdf, file_name,
    layout_report,
};
pub use filter::{filter, matches_search};
pub use pager::{page, page_count};
pub use range::{CustomBounds, effective_range, resolve, resolve_at};
pub use sort::sort;
pub use summary::{ReportSummary, Summarize};
pub use view::{TableView, ViewPage};
