use minelog_engine::{ExportFormat, ViewPage};
use minelog_types::{
    BrandingSettings, Chemical, Record, RecordKey, RecordKind, ResolvedBranding, SortDirection,
};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

const MAX_CELL_CHARS: usize = 40;

fn truncate_cell(s: &str) -> String {
    let flat = s.replace(['\n', '\r'], " ");
    if flat.chars().count() <= MAX_CELL_CHARS {
        flat
    } else {
        let truncated: String = flat.chars().take(MAX_CELL_CHARS - 3).collect();
        format!("{}...", truncated)
    }
}

/// Fixed-width table; every column is as wide as its widest cell
fn write_table(f: &mut fmt::Formatter<'_>, headers: &[String], rows: &[Vec<String>]) -> fmt::Result {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(f, "{}", line(headers))?;
    writeln!(f, "{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)))?;
    for row in rows {
        writeln!(f, "{}", line(row))?;
    }
    Ok(())
}

// --------------------------------------------------------
// Init
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct InitView {
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
    pub config_created: bool,
    pub db_path: PathBuf,
    pub schema_version: i32,
}

impl fmt::Display for InitView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config_state = if self.config_created {
            "created"
        } else {
            "loaded existing"
        };
        writeln!(f, "Workspace: {}", self.data_dir.display())?;
        writeln!(f, "Config:    {} ({})", self.config_path.display(), config_state)?;
        writeln!(
            f,
            "Database:  {} (schema v{})",
            self.db_path.display(),
            self.schema_version
        )
    }
}

// --------------------------------------------------------
// Record list
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RecordListView<R: Record> {
    pub kind: RecordKind,
    /// Effective range, `dd/MM/yyyy - dd/MM/yyyy`
    pub range: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    pub sort: String,
    pub direction: SortDirection,
    #[serde(flatten)]
    pub page: ViewPage<R>,
    #[serde(skip)]
    pub date_format: String,
}

impl<R: Record> fmt::Display for RecordListView<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.page.total == 0 {
            writeln!(f, "No {} records in {}", self.kind, self.range)?;
            return Ok(());
        }

        write_records(f, &self.page.rows, &self.date_format)?;
        writeln!(f)?;
        writeln!(
            f,
            "Page {} of {} ({} records) | {}",
            self.page.page_index + 1,
            self.page.page_count.max(1),
            self.page.total,
            self.range
        )
    }
}

fn write_records<R: Record>(f: &mut fmt::Formatter<'_>, records: &[R], date_format: &str) -> fmt::Result {
    let with_id = records
        .first()
        .is_some_and(|r| matches!(r.key(), RecordKey::Id(_)));

    let mut headers: Vec<String> = Vec::new();
    if with_id {
        headers.push("ID".to_string());
    }
    headers.extend(R::COLUMNS.iter().map(|c| c.label.to_string()));

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let mut cells = Vec::with_capacity(headers.len());
            if let RecordKey::Id(id) = record.key()
                && with_id
            {
                cells.push(id.to_string());
            }
            cells.extend(
                R::COLUMNS
                    .iter()
                    .map(|c| truncate_cell(&c.render(&record.value(c.field), date_format))),
            );
            cells
        })
        .collect();

    write_table(f, &headers, &rows)
}

// --------------------------------------------------------
// Single record mutations
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RecordView<R: Record> {
    pub record: R,
    #[serde(skip)]
    pub date_format: String,
}

impl<R: Record> fmt::Display for RecordView<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_records(f, std::slice::from_ref(&self.record), &self.date_format)
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedView {
    pub kind: RecordKind,
    pub key: RecordKey,
}

impl fmt::Display for DeletedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted {} record {}", self.kind, self.key)
    }
}

// --------------------------------------------------------
// Export
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ExportView {
    pub kind: RecordKind,
    pub format: ExportFormat,
    pub rows: usize,
    pub range: String,
    pub location: String,
}

impl fmt::Display for ExportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Exported {} {} record(s) for {} to {}",
            self.rows, self.kind, self.range, self.location
        )
    }
}

// --------------------------------------------------------
// Chemical catalog
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub chemical: Chemical,
    pub below_minimum: bool,
}

impl From<Chemical> for CatalogEntry {
    fn from(chemical: Chemical) -> Self {
        Self {
            below_minimum: chemical.below_minimum(),
            chemical,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub chemicals: Vec<CatalogEntry>,
}

impl fmt::Display for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.chemicals.is_empty() {
            writeln!(f, "No chemicals in the catalog.")?;
            return Ok(());
        }

        let headers: Vec<String> = ["ID", "NAME", "UNIT", "STOCK", "MINIMUM", "UNIT PRICE", ""]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let rows: Vec<Vec<String>> = self
            .chemicals
            .iter()
            .map(|entry| {
                let c = &entry.chemical;
                vec![
                    c.id.to_string(),
                    truncate_cell(&c.name),
                    c.unit.clone(),
                    format!("{:.2}", c.current_stock),
                    format!("{:.2}", c.minimum_required),
                    format!("{:.2}", c.unit_price),
                    if entry.below_minimum { "LOW" } else { "" }.to_string(),
                ]
            })
            .collect();
        write_table(f, &headers, &rows)
    }
}

// --------------------------------------------------------
// Branding
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct BrandingView {
    pub path: PathBuf,
    pub configured: bool,
    /// Text exports will print, defaults applied
    pub resolved: ResolvedBranding,
    pub light_logo: bool,
    pub dark_logo: bool,
}

impl BrandingView {
    pub fn new(path: PathBuf, stored: Option<&BrandingSettings>) -> Self {
        let has_logo = |logo: Option<&String>| logo.is_some_and(|s| !s.trim().is_empty());
        Self {
            path,
            configured: stored.is_some(),
            resolved: ResolvedBranding::from_settings(stored),
            light_logo: has_logo(stored.and_then(|s| s.light_logo.as_ref())),
            dark_logo: has_logo(stored.and_then(|s| s.dark_logo.as_ref())),
        }
    }
}

impl fmt::Display for BrandingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn logo(set: bool) -> &'static str {
            if set { "custom" } else { "bundled default" }
        }

        if !self.configured {
            writeln!(f, "No branding configured; exports use defaults.")?;
        }
        writeln!(f, "Name:       {}", self.resolved.name)?;
        writeln!(f, "Tagline:    {}", self.resolved.tagline)?;
        writeln!(f, "Email:      {}", self.resolved.email)?;
        for (label, value) in [
            ("Phone:      ", &self.resolved.phone),
            ("Website:    ", &self.resolved.website),
            ("Address:    ", &self.resolved.address),
        ] {
            if let Some(value) = value {
                writeln!(f, "{}{}", label, value)?;
            }
        }
        writeln!(f, "Light logo: {}", logo(self.light_logo))?;
        writeln!(f, "Dark logo:  {}", logo(self.dark_logo))
    }
}

// --------------------------------------------------------
// Guidance
// --------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GuidanceView {
    pub data_dir: PathBuf,
    pub initialized: bool,
}

impl fmt::Display for GuidanceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "minelog - mine production, energy and chemical records")?;
        writeln!(f)?;
        if self.initialized {
            writeln!(f, "Workspace: {}", self.data_dir.display())?;
        } else {
            writeln!(f, "No workspace at {}", self.data_dir.display())?;
        }
        Ok(())
    }
}
