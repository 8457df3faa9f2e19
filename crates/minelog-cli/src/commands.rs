use crate::args::{Cli, Commands};
use crate::handlers::export::ExportRequest;
use crate::handlers::list::ListRequest;
use crate::handlers::{self, HandlerContext};
use crate::logging::init_tracing;
use crate::types::RecordType;
use anyhow::Result;
use minelog_index::SqliteRecordStore;
use minelog_runtime::Workspace;
use minelog_types::{ChemicalUsageRecord, EnergyUsageRecord, ProductionRecord};

pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_level);

    let workspace = Workspace::resolve(cli.data_dir.as_deref())?;
    tracing::debug!(data_dir = %workspace.root().display(), "resolved workspace");
    let ctx = HandlerContext::new(workspace, cli.format);

    let Some(command) = cli.command else {
        return handlers::init::guidance(&ctx);
    };

    match command {
        Commands::Init => handlers::init::handle(&ctx),

        Commands::List {
            kind,
            view,
            sort,
            desc,
            page,
            page_size,
        } => {
            let db = ctx.database()?;
            let config = ctx.config()?;
            let request = ListRequest {
                view,
                sort,
                desc,
                page,
                page_size,
            };

            match kind {
                RecordType::Production => handlers::list::handle(
                    &ctx,
                    SqliteRecordStore::<ProductionRecord>::new(&db),
                    &config,
                    &request,
                ),
                RecordType::Energy => handlers::list::handle(
                    &ctx,
                    SqliteRecordStore::<EnergyUsageRecord>::new(&db),
                    &config,
                    &request,
                ),
                RecordType::Chemical => handlers::list::handle(
                    &ctx,
                    SqliteRecordStore::<ChemicalUsageRecord>::new(&db),
                    &config,
                    &request,
                ),
            }
        }

        Commands::Export {
            kind,
            format,
            view,
            output_dir,
            theme,
            date_format,
        } => {
            let db = ctx.database()?;
            let config = ctx.config()?;
            let request = ExportRequest {
                format,
                view,
                output_dir,
                theme,
                date_format,
            };

            match kind {
                RecordType::Production => handlers::export::handle(
                    &ctx,
                    SqliteRecordStore::<ProductionRecord>::new(&db),
                    &config,
                    &request,
                ),
                RecordType::Energy => handlers::export::handle(
                    &ctx,
                    SqliteRecordStore::<EnergyUsageRecord>::new(&db),
                    &config,
                    &request,
                ),
                RecordType::Chemical => handlers::export::handle(
                    &ctx,
                    SqliteRecordStore::<ChemicalUsageRecord>::new(&db),
                    &config,
                    &request,
                ),
            }
        }

        Commands::Production { command } => handlers::production::handle(&ctx, command),

        Commands::Energy { command } => handlers::energy::handle(&ctx, command),

        Commands::Chemical { command } => handlers::chemical::handle(&ctx, command),

        Commands::Branding { command } => handlers::branding::handle(&ctx, command),
    }
}
