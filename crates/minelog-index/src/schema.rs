use rusqlite::Connection;

use crate::{Error, Result};

// Schema version (increment when appending a migration)
pub const SCHEMA_VERSION: i32 = 2;

// Migration N brings a database from user_version N to N + 1. Records are the
// source of truth here, so migrations only ever add; nothing is dropped.
const MIGRATIONS: &[&str] = &[
    // 0 -> 1: record tables
    r#"
    CREATE TABLE IF NOT EXISTS production (
        date TEXT PRIMARY KEY,
        total_tonnage_crushed REAL NOT NULL,
        total_tonnage_hoisted REAL NOT NULL,
        gold_recovery_rate REAL NOT NULL,
        operational_efficiency REAL NOT NULL,
        gold_smelted REAL NOT NULL,
        notes TEXT
    );

    CREATE TABLE IF NOT EXISTS energy_usage (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        electricity_kwh REAL NOT NULL,
        electricity_cost REAL NOT NULL,
        diesel_liters REAL NOT NULL,
        diesel_cost REAL NOT NULL,
        total_cost REAL NOT NULL,
        notes TEXT
    );

    CREATE TABLE IF NOT EXISTS chemicals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        unit TEXT NOT NULL,
        current_stock REAL NOT NULL DEFAULT 0,
        minimum_required REAL NOT NULL DEFAULT 0,
        unit_price REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS chemical_usage (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        chemical_id INTEGER NOT NULL,
        amount_used REAL NOT NULL,
        process TEXT NOT NULL,
        notes TEXT,
        FOREIGN KEY (chemical_id) REFERENCES chemicals(id)
    );
    "#,
    // 1 -> 2: date lookups for range fetches
    r#"
    CREATE INDEX IF NOT EXISTS idx_energy_date ON energy_usage(date);
    CREATE INDEX IF NOT EXISTS idx_chemical_usage_date ON chemical_usage(date);
    CREATE INDEX IF NOT EXISTS idx_chemical_usage_chemical ON chemical_usage(chemical_id);
    "#,
];

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version > SCHEMA_VERSION {
        return Err(Error::Query(format!(
            "database schema version {} is newer than supported version {}",
            current_version, SCHEMA_VERSION
        )));
    }

    for (version, migration) in MIGRATIONS
        .iter()
        .enumerate()
        .skip(current_version.max(0) as usize)
    {
        tracing::debug!(from = version, to = version + 1, "applying schema migration");
        conn.execute_batch(migration)?;
    }

    if current_version != SCHEMA_VERSION {
        conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
    }

    Ok(())
}
