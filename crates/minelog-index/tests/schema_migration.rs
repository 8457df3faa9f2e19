//! Integration tests for schema migration
//!
//! Database::open upgrades older files in place and keeps their records.

use chrono::NaiveDate;
use minelog_index::{Database, Error, SCHEMA_VERSION, SqliteRecordStore};
use minelog_types::{EnergyUsageRecord, RangeQuery, RecordStore};
use rusqlite::Connection;
use std::path::Path;
use tempfile::TempDir;

/// Create a version 1 database (tables without date indexes) holding one energy record
fn create_v1_db(path: &Path) {
    let conn = Connection::open(path).unwrap();

    conn.execute_batch(
        r#"
        CREATE TABLE production (
            date TEXT PRIMARY KEY,
            total_tonnage_crushed REAL NOT NULL,
            total_tonnage_hoisted REAL NOT NULL,
            gold_recovery_rate REAL NOT NULL,
            operational_efficiency REAL NOT NULL,
            gold_smelted REAL NOT NULL,
            notes TEXT
        );

        CREATE TABLE energy_usage (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            electricity_kwh REAL NOT NULL,
            electricity_cost REAL NOT NULL,
            diesel_liters REAL NOT NULL,
            diesel_cost REAL NOT NULL,
            total_cost REAL NOT NULL,
            notes TEXT
        );

        CREATE TABLE chemicals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            unit TEXT NOT NULL,
            current_stock REAL NOT NULL DEFAULT 0,
            minimum_required REAL NOT NULL DEFAULT 0,
            unit_price REAL NOT NULL
        );

        CREATE TABLE chemical_usage (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            chemical_id INTEGER NOT NULL,
            amount_used REAL NOT NULL,
            process TEXT NOT NULL,
            notes TEXT,
            FOREIGN KEY (chemical_id) REFERENCES chemicals(id)
        );

        PRAGMA user_version = 1;
        "#,
    )
    .unwrap();

    conn.execute(
        "INSERT INTO energy_usage (date, electricity_kwh, electricity_cost, diesel_liters, diesel_cost, total_cost)
         VALUES ('2024-01-15', 1200.0, 180.0, 300.0, 420.0, 600.0)",
        [],
    )
    .unwrap();
}

fn index_names(path: &Path) -> Vec<String> {
    let conn = Connection::open(path).unwrap();
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_upgrade_keeps_existing_records() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("minelog.db");
    create_v1_db(&db_path);

    // Open with current code - should migrate forward, not recreate
    let db = Database::open(&db_path).unwrap();
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);

    let store = SqliteRecordStore::<EnergyUsageRecord>::new(&db);
    let records = store
        .fetch(&RangeQuery {
            from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        })
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].total_cost, 600.0);

    drop(db);
    assert_eq!(
        index_names(&db_path),
        vec![
            "idx_chemical_usage_chemical",
            "idx_chemical_usage_date",
            "idx_energy_date"
        ]
    );
}

#[test]
fn test_reopening_current_database_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("minelog.db");

    Database::open(&db_path).unwrap();
    let db = Database::open(&db_path).unwrap();
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
}

#[test]
fn test_newer_schema_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("minelog.db");
    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION + 1))
            .unwrap();
    }

    let result = Database::open(&db_path);
    assert!(matches!(result, Err(Error::Query(_))));
}
