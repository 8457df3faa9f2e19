use chrono::NaiveDate;
use minelog_types::{
    Chemical, ChemicalUsageRecord, EnergyUsageRecord, NewChemical, NewChemicalUsage,
    NewEnergyUsage, ProductionRecord, RangeQuery,
};
use rusqlite::Connection;
use std::path::Path;

use crate::queries::{chemical, energy, production};
use crate::{Error, Result};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| {
            Error::Query(format!(
                "Failed to open database: {}: {}",
                db_path.display(),
                e
            ))
        })?;

        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn init_schema(&self) -> Result<()> {
        crate::schema::init_schema(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i32> {
        let version = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version)
    }

    // Production operations

    pub fn list_production(&self, query: &RangeQuery) -> Result<Vec<ProductionRecord>> {
        production::list(&self.conn, query)
    }

    pub fn get_production(&self, date: NaiveDate) -> Result<Option<ProductionRecord>> {
        production::get(&self.conn, date)
    }

    pub fn insert_production(&self, record: &ProductionRecord) -> Result<()> {
        production::insert(&self.conn, record)
    }

    pub fn update_production(&self, record: &ProductionRecord) -> Result<()> {
        production::update(&self.conn, record)
    }

    pub fn delete_production(&self, date: NaiveDate) -> Result<()> {
        production::delete(&self.conn, date)
    }

    // Energy operations

    pub fn list_energy(&self, query: &RangeQuery) -> Result<Vec<EnergyUsageRecord>> {
        energy::list(&self.conn, query)
    }

    pub fn get_energy(&self, id: i64) -> Result<Option<EnergyUsageRecord>> {
        energy::get(&self.conn, id)
    }

    pub fn insert_energy(&self, draft: NewEnergyUsage) -> Result<EnergyUsageRecord> {
        energy::insert(&self.conn, draft)
    }

    pub fn update_energy(&self, record: EnergyUsageRecord) -> Result<EnergyUsageRecord> {
        energy::update(&self.conn, record)
    }

    pub fn delete_energy(&self, id: i64) -> Result<()> {
        energy::delete(&self.conn, id)
    }

    // Chemical catalog operations

    pub fn list_chemicals(&self) -> Result<Vec<Chemical>> {
        chemical::list_catalog(&self.conn)
    }

    pub fn get_chemical(&self, id: i64) -> Result<Option<Chemical>> {
        chemical::get_chemical(&self.conn, id)
    }

    pub fn insert_chemical(&self, draft: &NewChemical) -> Result<Chemical> {
        chemical::insert_chemical(&self.conn, draft)
    }

    // Chemical usage operations

    pub fn list_chemical_usage(&self, query: &RangeQuery) -> Result<Vec<ChemicalUsageRecord>> {
        chemical::list_usage(&self.conn, query)
    }

    pub fn get_chemical_usage(&self, id: i64) -> Result<Option<ChemicalUsageRecord>> {
        chemical::get_usage(&self.conn, id)
    }

    pub fn insert_chemical_usage(&self, draft: &NewChemicalUsage) -> Result<ChemicalUsageRecord> {
        chemical::insert_usage(&self.conn, draft)
    }

    pub fn update_chemical_usage(
        &self,
        record: &ChemicalUsageRecord,
    ) -> Result<ChemicalUsageRecord> {
        chemical::update_usage(&self.conn, record)
    }

    pub fn delete_chemical_usage(&self, id: i64) -> Result<()> {
        chemical::delete_usage(&self.conn, id)
    }
}
