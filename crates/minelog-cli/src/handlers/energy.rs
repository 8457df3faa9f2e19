use super::HandlerContext;
use crate::args::EnergyCommand;
use crate::presentation::views::{DeletedView, RecordView};
use crate::presentation::{CommandResultViewModel, StatusBadge};
use anyhow::{Result, anyhow};
use minelog_index::SqliteRecordStore;
use minelog_runtime::{Clock, RecordPage};
use minelog_types::{EnergyUsageRecord, NewEnergyUsage, Record, RecordKey};

pub fn handle(ctx: &HandlerContext, command: EnergyCommand) -> Result<()> {
    let db = ctx.database()?;
    let config = ctx.config()?;
    let mut page = RecordPage::from_config(
        SqliteRecordStore::<EnergyUsageRecord>::new(&db),
        &config.view,
        Clock::Local,
    )?;
    let date_format = config.export.date_format.clone();

    match command {
        EnergyCommand::Add {
            date,
            kwh,
            electricity_cost,
            diesel,
            diesel_cost,
            notes,
        } => {
            page.open_create_form();
            let record = page.submit_create(NewEnergyUsage {
                date,
                electricity_kwh: kwh,
                electricity_cost,
                diesel_liters: diesel,
                diesel_cost,
                notes,
            })?;
            ctx.render(
                CommandResultViewModel::new(RecordView {
                    record,
                    date_format,
                })
                .with_badge(StatusBadge::success("Energy usage recorded")),
            )
        }
        EnergyCommand::Update {
            id,
            date,
            kwh,
            electricity_cost,
            diesel,
            diesel_cost,
            notes,
        } => {
            let existing = db
                .get_energy(id)?
                .ok_or_else(|| anyhow!("energy_usage #{}: record not found", id))?;
            page.open_edit_form(existing.clone());

            let mut record = existing;
            if let Some(date) = date {
                record.date = date;
            }
            if let Some(kwh) = kwh {
                record.electricity_kwh = kwh;
            }
            if let Some(cost) = electricity_cost {
                record.electricity_cost = cost;
            }
            if let Some(liters) = diesel {
                record.diesel_liters = liters;
            }
            if let Some(cost) = diesel_cost {
                record.diesel_cost = cost;
            }
            if notes.is_some() {
                record.notes = notes;
            }

            let record = page.submit_update(record.with_recomputed_total())?;
            ctx.render(
                CommandResultViewModel::new(RecordView {
                    record,
                    date_format,
                })
                .with_badge(StatusBadge::success("Energy usage updated")),
            )
        }
        EnergyCommand::Delete { id } => {
            let key = RecordKey::Id(id);
            page.delete(&key)?;
            ctx.render(
                CommandResultViewModel::new(DeletedView {
                    kind: EnergyUsageRecord::KIND,
                    key,
                })
                .with_badge(StatusBadge::success("Energy usage deleted")),
            )
        }
    }
}
