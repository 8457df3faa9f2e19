use super::{HandlerContext, catalog};
use crate::args::ChemicalCommand;
use crate::presentation::views::{DeletedView, RecordView};
use crate::presentation::{CommandResultViewModel, StatusBadge};
use anyhow::{Result, anyhow};
use minelog_index::SqliteRecordStore;
use minelog_runtime::{Clock, RecordPage};
use minelog_types::{ChemicalUsageRecord, NewChemicalUsage, Record, RecordKey};

pub fn handle(ctx: &HandlerContext, command: ChemicalCommand) -> Result<()> {
    let db = ctx.database()?;
    let config = ctx.config()?;
    let mut page = RecordPage::from_config(
        SqliteRecordStore::<ChemicalUsageRecord>::new(&db),
        &config.view,
        Clock::Local,
    )?;
    let date_format = config.export.date_format.clone();

    match command {
        ChemicalCommand::Add {
            date,
            chemical_id,
            amount,
            process,
            notes,
        } => {
            page.open_create_form();
            let record = page.submit_create(NewChemicalUsage {
                date,
                chemical_id,
                amount_used: amount,
                process,
                notes,
            })?;
            ctx.render(
                CommandResultViewModel::new(RecordView {
                    record,
                    date_format,
                })
                .with_badge(StatusBadge::success("Chemical usage recorded")),
            )
        }
        ChemicalCommand::Update {
            id,
            date,
            chemical_id,
            amount,
            process,
            notes,
        } => {
            let existing = db
                .get_chemical_usage(id)?
                .ok_or_else(|| anyhow!("chemical_usage #{}: record not found", id))?;
            page.open_edit_form(existing.clone());

            let mut record = existing;
            if let Some(date) = date {
                record.date = date;
            }
            if let Some(chemical_id) = chemical_id {
                let chemical = db
                    .get_chemical(chemical_id)?
                    .ok_or_else(|| anyhow!("chemical #{}: record not found", chemical_id))?;
                record.chemical = chemical.to_ref();
            }
            if let Some(amount) = amount {
                record.amount_used = amount;
            }
            if let Some(process) = process {
                record.process = process;
            }
            if notes.is_some() {
                record.notes = notes;
            }

            let record = page.submit_update(record)?;
            ctx.render(
                CommandResultViewModel::new(RecordView {
                    record,
                    date_format,
                })
                .with_badge(StatusBadge::success("Chemical usage updated")),
            )
        }
        ChemicalCommand::Delete { id } => {
            let key = RecordKey::Id(id);
            page.delete(&key)?;
            ctx.render(
                CommandResultViewModel::new(DeletedView {
                    kind: ChemicalUsageRecord::KIND,
                    key,
                })
                .with_badge(StatusBadge::success("Chemical usage deleted")),
            )
        }
        ChemicalCommand::Catalog { command } => catalog::handle(ctx, &db, command),
    }
}
