use super::HandlerContext;
use crate::args::CatalogCommand;
use crate::presentation::views::{CatalogEntry, CatalogView};
use crate::presentation::{CommandResultViewModel, StatusBadge};
use anyhow::Result;
use minelog_index::Database;
use minelog_types::NewChemical;

pub fn handle(ctx: &HandlerContext, db: &Database, command: CatalogCommand) -> Result<()> {
    match command {
        CatalogCommand::List => {
            let chemicals: Vec<CatalogEntry> =
                db.list_chemicals()?.into_iter().map(Into::into).collect();
            let low = chemicals.iter().filter(|c| c.below_minimum).count();

            let mut result = CommandResultViewModel::new(CatalogView { chemicals });
            if low > 0 {
                result = result.with_badge(StatusBadge::warning(format!(
                    "{} chemical(s) below minimum stock",
                    low
                )));
            }
            ctx.render(result)
        }
        CatalogCommand::Add {
            name,
            unit,
            unit_price,
            stock,
            minimum,
        } => {
            let chemical = db.insert_chemical(&NewChemical {
                name,
                unit,
                current_stock: stock,
                minimum_required: minimum,
                unit_price,
            })?;
            ctx.render(
                CommandResultViewModel::new(CatalogView {
                    chemicals: vec![chemical.into()],
                })
                .with_badge(StatusBadge::success("Chemical added to catalog")),
            )
        }
    }
}
