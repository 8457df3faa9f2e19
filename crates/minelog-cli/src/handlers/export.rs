use super::HandlerContext;
use super::page::open_page;
use crate::args::ViewArgs;
use crate::presentation::views::ExportView;
use crate::presentation::{CommandResultViewModel, StatusBadge};
use crate::types::{ExportAs, ThemeArg};
use anyhow::Result;
use minelog_engine::{ExportFormat, ExportOptions, Summarize};
use minelog_runtime::config::validate_date_format;
use minelog_runtime::{BrandingCache, Config, DirectorySink};
use minelog_types::{Record, RecordStore};
use std::path::PathBuf;

pub struct ExportRequest {
    pub format: ExportAs,
    pub view: ViewArgs,
    pub output_dir: Option<PathBuf>,
    pub theme: Option<ThemeArg>,
    pub date_format: Option<String>,
}

pub fn handle<S>(
    ctx: &HandlerContext,
    store: S,
    config: &Config,
    request: &ExportRequest,
) -> Result<()>
where
    S: RecordStore,
    S::Record: Summarize,
{
    let date_format = request
        .date_format
        .clone()
        .unwrap_or_else(|| config.export.date_format.clone());
    validate_date_format(&date_format)?;

    let page = open_page(store, config, &request.view)?;
    let theme = request
        .theme
        .map(Into::into)
        .unwrap_or(config.export.theme);
    let options = ExportOptions::new(page.now())
        .with_date_format(date_format)
        .with_theme(theme);
    let mut sink = DirectorySink::new(
        request
            .output_dir
            .clone()
            .unwrap_or_else(|| config.export.output_dir.clone()),
    );

    let rows = page.filtered_rows()?.len();
    let format: ExportFormat = request.format.into();
    let location = match format {
        ExportFormat::Csv => page.export_csv(&mut sink, &options)?,
        ExportFormat::Pdf => {
            let mut branding = BrandingCache::new(ctx.workspace.branding_provider());
            page.export_pdf(&mut sink, branding.get(), &options)?
        }
    };

    let kind = <S::Record as Record>::KIND;
    tracing::debug!(%kind, rows, %location, "export delivered");

    let view = ExportView {
        kind,
        format,
        rows,
        range: page.effective_range().to_string(),
        location,
    };
    ctx.render(CommandResultViewModel::new(view).with_badge(StatusBadge::success("Export complete")))
}
