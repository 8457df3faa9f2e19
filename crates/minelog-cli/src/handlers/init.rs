use super::HandlerContext;
use crate::presentation::views::{GuidanceView, InitView};
use crate::presentation::{CommandResultViewModel, Guidance, StatusBadge};
use anyhow::Result;
use minelog_runtime::ConfigStatus;

pub fn handle(ctx: &HandlerContext) -> Result<()> {
    let result = ctx.workspace.init()?;

    let (config_path, config_created) = match result.config_status {
        ConfigStatus::Created { config_path } => (config_path, true),
        ConfigStatus::LoadedExisting { config_path } => (config_path, false),
    };

    let view = InitView {
        data_dir: ctx.workspace.root().to_path_buf(),
        config_path,
        config_created,
        db_path: result.db_path,
        schema_version: result.schema_version,
    };

    ctx.render(
        CommandResultViewModel::new(view)
            .with_badge(StatusBadge::success("Workspace ready"))
            .with_suggestion(
                Guidance::new("Record a production day")
                    .with_command("minelog production add --date 2024-01-31 ..."),
            )
            .with_suggestion(
                Guidance::new("Browse recent records").with_command("minelog list production"),
            ),
    )
}

/// Shown when no subcommand is given
pub fn guidance(ctx: &HandlerContext) -> Result<()> {
    let initialized = ctx.workspace.db_path().exists();
    let view = GuidanceView {
        data_dir: ctx.workspace.root().to_path_buf(),
        initialized,
    };

    let result = if initialized {
        CommandResultViewModel::new(view)
            .with_suggestion(
                Guidance::new("Browse records").with_command("minelog list energy --range week"),
            )
            .with_suggestion(
                Guidance::new("Export a report")
                    .with_command("minelog export production --as pdf"),
            )
    } else {
        CommandResultViewModel::new(view)
            .with_badge(StatusBadge::info("Workspace not initialized"))
            .with_suggestion(Guidance::new("Get started").with_command("minelog init"))
    };
    ctx.render(result)
}
