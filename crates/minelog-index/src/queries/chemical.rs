use minelog_types::{
    Chemical, ChemicalRef, ChemicalUsageRecord, NewChemical, NewChemicalUsage, RangeQuery,
};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{date_column, date_param};
use crate::{Error, Result};

// Catalog

fn chemical_from_row(row: &Row<'_>) -> rusqlite::Result<Chemical> {
    Ok(Chemical {
        id: row.get(0)?,
        name: row.get(1)?,
        unit: row.get(2)?,
        current_stock: row.get(3)?,
        minimum_required: row.get(4)?,
        unit_price: row.get(5)?,
    })
}

pub fn list_catalog(conn: &Connection) -> Result<Vec<Chemical>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, name, unit, current_stock, minimum_required, unit_price
        FROM chemicals
        ORDER BY name COLLATE NOCASE
        "#,
    )?;

    let chemicals = stmt
        .query_map([], chemical_from_row)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(chemicals)
}

pub fn get_chemical(conn: &Connection, id: i64) -> Result<Option<Chemical>> {
    let chemical = conn
        .query_row(
            r#"
            SELECT id, name, unit, current_stock, minimum_required, unit_price
            FROM chemicals
            WHERE id = ?1
            "#,
            [id],
            chemical_from_row,
        )
        .optional()?;

    Ok(chemical)
}

pub fn insert_chemical(conn: &Connection, draft: &NewChemical) -> Result<Chemical> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM chemicals WHERE name = ?1 COLLATE NOCASE)",
        [&draft.name],
        |row| row.get(0),
    )?;
    if exists {
        return Err(Error::Conflict(format!(
            "A chemical named '{}' already exists",
            draft.name
        )));
    }

    conn.execute(
        r#"
        INSERT INTO chemicals (name, unit, current_stock, minimum_required, unit_price)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            &draft.name,
            &draft.unit,
            draft.current_stock,
            draft.minimum_required,
            draft.unit_price
        ],
    )?;

    Ok(Chemical {
        id: conn.last_insert_rowid(),
        name: draft.name.clone(),
        unit: draft.unit.clone(),
        current_stock: draft.current_stock,
        minimum_required: draft.minimum_required,
        unit_price: draft.unit_price,
    })
}

fn adjust_stock(conn: &Connection, chemical_id: i64, delta: f64) -> Result<()> {
    let changed = conn.execute(
        "UPDATE chemicals SET current_stock = current_stock + ?2 WHERE id = ?1",
        params![chemical_id, delta],
    )?;
    if changed == 0 {
        return Err(Error::NotFound(format!("chemical #{}", chemical_id)));
    }
    Ok(())
}

// Usage

const USAGE_SELECT: &str = r#"
    SELECT u.id, u.date, c.id, c.name, c.unit, u.amount_used, u.process, u.notes
    FROM chemical_usage u
    JOIN chemicals c ON c.id = u.chemical_id
"#;

fn usage_from_row(row: &Row<'_>) -> rusqlite::Result<ChemicalUsageRecord> {
    Ok(ChemicalUsageRecord {
        id: row.get(0)?,
        date: date_column(row, 1)?,
        chemical: ChemicalRef {
            id: row.get(2)?,
            name: row.get(3)?,
            unit: row.get(4)?,
        },
        amount_used: row.get(5)?,
        process: row.get(6)?,
        notes: row.get(7)?,
    })
}

pub fn list_usage(conn: &Connection, query: &RangeQuery) -> Result<Vec<ChemicalUsageRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE u.date >= ?1 AND u.date <= ?2 ORDER BY u.date DESC, u.id DESC",
        USAGE_SELECT
    ))?;

    let records = stmt
        .query_map(
            params![date_param(query.from), date_param(query.to)],
            usage_from_row,
        )?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(records)
}

pub fn get_usage(conn: &Connection, id: i64) -> Result<Option<ChemicalUsageRecord>> {
    let record = conn
        .query_row(
            &format!("{} WHERE u.id = ?1", USAGE_SELECT),
            [id],
            usage_from_row,
        )
        .optional()?;

    Ok(record)
}

/// Record usage and draw the amount from the chemical's stock
pub fn insert_usage(conn: &Connection, draft: &NewChemicalUsage) -> Result<ChemicalUsageRecord> {
    let tx = conn.unchecked_transaction()?;

    let chemical = get_chemical(&tx, draft.chemical_id)?
        .ok_or_else(|| Error::NotFound(format!("chemical #{}", draft.chemical_id)))?;

    tx.execute(
        r#"
        INSERT INTO chemical_usage (date, chemical_id, amount_used, process, notes)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            date_param(draft.date),
            draft.chemical_id,
            draft.amount_used,
            &draft.process,
            &draft.notes
        ],
    )?;
    let id = tx.last_insert_rowid();
    adjust_stock(&tx, chemical.id, -draft.amount_used)?;
    tx.commit()?;

    Ok(ChemicalUsageRecord {
        id,
        date: draft.date,
        chemical: chemical.to_ref(),
        amount_used: draft.amount_used,
        process: draft.process.clone(),
        notes: draft.notes.clone(),
    })
}

/// Replace a usage record. The previous amount goes back to the previous
/// chemical before the new amount is drawn.
pub fn update_usage(conn: &Connection, record: &ChemicalUsageRecord) -> Result<ChemicalUsageRecord> {
    let tx = conn.unchecked_transaction()?;

    let previous = get_usage(&tx, record.id)?
        .ok_or_else(|| Error::NotFound(format!("chemical_usage #{}", record.id)))?;
    let chemical = get_chemical(&tx, record.chemical.id)?
        .ok_or_else(|| Error::NotFound(format!("chemical #{}", record.chemical.id)))?;

    tx.execute(
        r#"
        UPDATE chemical_usage SET
            date = ?2,
            chemical_id = ?3,
            amount_used = ?4,
            process = ?5,
            notes = ?6
        WHERE id = ?1
        "#,
        params![
            record.id,
            date_param(record.date),
            chemical.id,
            record.amount_used,
            &record.process,
            &record.notes
        ],
    )?;
    adjust_stock(&tx, previous.chemical.id, previous.amount_used)?;
    adjust_stock(&tx, chemical.id, -record.amount_used)?;
    tx.commit()?;

    Ok(ChemicalUsageRecord {
        chemical: chemical.to_ref(),
        ..record.clone()
    })
}

/// Remove a usage record and return its amount to stock
pub fn delete_usage(conn: &Connection, id: i64) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    let previous = get_usage(&tx, id)?
        .ok_or_else(|| Error::NotFound(format!("chemical_usage #{}", id)))?;
    tx.execute("DELETE FROM chemical_usage WHERE id = ?1", [id])?;
    adjust_stock(&tx, previous.chemical.id, previous.amount_used)?;
    tx.commit()?;

    Ok(())
}
