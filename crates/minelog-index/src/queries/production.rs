use chrono::NaiveDate;
use minelog_types::{ProductionRecord, RangeQuery};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{date_column, date_param};
use crate::{Error, Result};

const COLUMNS: &str = "date, total_tonnage_crushed, total_tonnage_hoisted, gold_recovery_rate, \
                       operational_efficiency, gold_smelted, notes";

fn from_row(row: &Row<'_>) -> rusqlite::Result<ProductionRecord> {
    Ok(ProductionRecord {
        date: date_column(row, 0)?,
        total_tonnage_crushed: row.get(1)?,
        total_tonnage_hoisted: row.get(2)?,
        gold_recovery_rate: row.get(3)?,
        operational_efficiency: row.get(4)?,
        gold_smelted: row.get(5)?,
        notes: row.get(6)?,
    })
}

pub fn list(conn: &Connection, query: &RangeQuery) -> Result<Vec<ProductionRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM production WHERE date >= ?1 AND date <= ?2 ORDER BY date DESC",
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

pub fn get(conn: &Connection, date: NaiveDate) -> Result<Option<ProductionRecord>> {
    let record = conn
        .query_row(
            &format!("SELECT {} FROM production WHERE date = ?1", COLUMNS),
            [date_param(date)],
            from_row,
        )
        .optional()?;

    Ok(record)
}

/// Insert a new day. Fails with `Conflict` when the date is already recorded.
pub fn insert(conn: &Connection, record: &ProductionRecord) -> Result<()> {
    if get(conn, record.date)?.is_some() {
        return Err(Error::Conflict(
            "A record for this date already exists".to_string(),
        ));
    }

    conn.execute(
        r#"
        INSERT INTO production (date, total_tonnage_crushed, total_tonnage_hoisted,
                                gold_recovery_rate, operational_efficiency, gold_smelted, notes)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            date_param(record.date),
            record.total_tonnage_crushed,
            record.total_tonnage_hoisted,
            record.gold_recovery_rate,
            record.operational_efficiency,
            record.gold_smelted,
            &record.notes
        ],
    )?;

    Ok(())
}

/// Replace the figures for an existing day
pub fn update(conn: &Connection, record: &ProductionRecord) -> Result<()> {
    let changed = conn.execute(
        r#"
        UPDATE production SET
            total_tonnage_crushed = ?2,
            total_tonnage_hoisted = ?3,
            gold_recovery_rate = ?4,
            operational_efficiency = ?5,
            gold_smelted = ?6,
            notes = ?7
        WHERE date = ?1
        "#,
        params![
            date_param(record.date),
            record.total_tonnage_crushed,
            record.total_tonnage_hoisted,
            record.gold_recovery_rate,
            record.operational_efficiency,
            record.gold_smelted,
            &record.notes
        ],
    )?;

    if changed == 0 {
        return Err(Error::NotFound(format!("production {}", date_param(record.date))));
    }
    Ok(())
}

pub fn delete(conn: &Connection, date: NaiveDate) -> Result<()> {
    let changed = conn.execute("DELETE FROM production WHERE date = ?1", [date_param(date)])?;
    if changed == 0 {
        return Err(Error::NotFound(format!("production {}", date_param(date))));
    }
    Ok(())
}
