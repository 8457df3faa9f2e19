use super::HandlerContext;
use crate::args::{ProductionCommand, ProductionFields};
use crate::presentation::views::{DeletedView, RecordView};
use crate::presentation::{CommandResultViewModel, StatusBadge};
use anyhow::Result;
use chrono::NaiveDate;
use minelog_index::SqliteRecordStore;
use minelog_runtime::{Clock, RecordPage};
use minelog_types::{ProductionRecord, Record, RecordKey};

fn record_from(date: NaiveDate, fields: ProductionFields) -> ProductionRecord {
    ProductionRecord {
        date,
        total_tonnage_crushed: fields.crushed,
        total_tonnage_hoisted: fields.hoisted,
        gold_recovery_rate: fields.recovery,
        operational_efficiency: fields.efficiency,
        gold_smelted: fields.smelted,
        notes: fields.notes,
    }
}

pub fn handle(ctx: &HandlerContext, command: ProductionCommand) -> Result<()> {
    let db = ctx.database()?;
    let config = ctx.config()?;
    let mut page = RecordPage::from_config(
        SqliteRecordStore::<ProductionRecord>::new(&db),
        &config.view,
        Clock::Local,
    )?;
    let date_format = config.export.date_format.clone();

    match command {
        ProductionCommand::Add { date, fields } => {
            page.open_create_form();
            let record = page.submit_create(record_from(date, fields))?;
            ctx.render(
                CommandResultViewModel::new(RecordView {
                    record,
                    date_format,
                })
                .with_badge(StatusBadge::success("Production record created")),
            )
        }
        ProductionCommand::Update { date, fields } => {
            if let Some(existing) = db.get_production(date)? {
                page.open_edit_form(existing);
            }
            let record = page.submit_update(record_from(date, fields))?;
            ctx.render(
                CommandResultViewModel::new(RecordView {
                    record,
                    date_format,
                })
                .with_badge(StatusBadge::success("Production record updated")),
            )
        }
        ProductionCommand::Delete { date } => {
            let key = RecordKey::Date(date);
            page.delete(&key)?;
            ctx.render(
                CommandResultViewModel::new(DeletedView {
                    kind: ProductionRecord::KIND,
                    key,
                })
                .with_badge(StatusBadge::success("Production record deleted")),
            )
        }
    }
}
