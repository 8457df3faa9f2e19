use minelog_types::{EnergyUsageRecord, NewEnergyUsage, RangeQuery};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{date_column, date_param};
use crate::{Error, Result};

const COLUMNS: &str = "id, date, electricity_kwh, electricity_cost, diesel_liters, diesel_cost, \
                       total_cost, notes";

fn from_row(row: &Row<'_>) -> rusqlite::Result<EnergyUsageRecord> {
    Ok(EnergyUsageRecord {
        id: row.get(0)?,
        date: date_column(row, 1)?,
        electricity_kwh: row.get(2)?,
        electricity_cost: row.get(3)?,
        diesel_liters: row.get(4)?,
        diesel_cost: row.get(5)?,
        total_cost: row.get(6)?,
        notes: row.get(7)?,
    })
}

pub fn list(conn: &Connection, query: &RangeQuery) -> Result<Vec<EnergyUsageRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM energy_usage WHERE date >= ?1 AND date <= ?2 ORDER BY date DESC, id DESC",
        COLUMNS
    ))?;

    let records = stmt
        .query_map(
            params![date_param(query.from), date_param(query.to)],
            from_row,
        )?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(records)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<EnergyUsageRecord>> {
    let record = conn
        .query_row(
            &format!("SELECT {} FROM energy_usage WHERE id = ?1", COLUMNS),
            [id],
            from_row,
        )
        .optional()?;

    Ok(record)
}

/// Insert a record; `total_cost` is derived, never taken from input
pub fn insert(conn: &Connection, draft: NewEnergyUsage) -> Result<EnergyUsageRecord> {
    conn.execute(
        r#"
        INSERT INTO energy_usage (date, electricity_kwh, electricity_cost, diesel_liters,
                                  diesel_cost, total_cost, notes)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            date_param(draft.date),
            draft.electricity_kwh,
            draft.electricity_cost,
            draft.diesel_liters,
            draft.diesel_cost,
            draft.total_cost(),
            &draft.notes
        ],
    )?;

    Ok(draft.into_record(conn.last_insert_rowid()))
}

pub fn update(conn: &Connection, record: EnergyUsageRecord) -> Result<EnergyUsageRecord> {
    let record = record.with_recomputed_total();
    let changed = conn.execute(
        r#"
        UPDATE energy_usage SET
            date = ?2,
            electricity_kwh = ?3,
            electricity_cost = ?4,
            diesel_liters = ?5,
            diesel_cost = ?6,
            total_cost = ?7,
            notes = ?8
        WHERE id = ?1
        "#,
        params![
            record.id,
            date_param(record.date),
            record.electricity_kwh,
            record.electricity_cost,
            record.diesel_liters,
            record.diesel_cost,
            record.total_cost,
            &record.notes
        ],
    )?;

    if changed == 0 {
        return Err(Error::NotFound(format!("energy_usage #{}", record.id)));
    }
    Ok(record)
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM energy_usage WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(Error::NotFound(format!("energy_usage #{}", id)));
    }
    Ok(())
}
