use std::marker::PhantomData;

use minelog_types::{
    ChemicalUsageRecord, EnergyUsageRecord, NewChemicalUsage, NewEnergyUsage, ProductionRecord,
    RangeQuery, Record, RecordKey, RecordStore, ReferenceData,
};

use crate::{Database, Error, Result};

/// `RecordStore` for one record family over a shared `Database`
pub struct SqliteRecordStore<'a, R> {
    db: &'a Database,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Record> SqliteRecordStore<'a, R> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    pub fn database(&self) -> &'a Database {
        self.db
    }
}

fn id_key<R: Record>(key: &RecordKey) -> Result<i64> {
    match key {
        RecordKey::Id(id) => Ok(*id),
        RecordKey::Date(_) => Err(Error::Query(format!(
            "{} records are addressed by id, got {}",
            R::KIND,
            key
        ))),
    }
}

impl RecordStore for SqliteRecordStore<'_, ProductionRecord> {
    type Record = ProductionRecord;
    type Draft = ProductionRecord;
    type Error = Error;

    fn fetch(&self, query: &RangeQuery) -> Result<Vec<ProductionRecord>> {
        self.db.list_production(query)
    }

    fn create(&self, draft: ProductionRecord) -> Result<ProductionRecord> {
        self.db.insert_production(&draft)?;
        tracing::info!(date = %draft.date, "created production record");
        Ok(draft)
    }

    fn update(&self, record: ProductionRecord) -> Result<ProductionRecord> {
        self.db.update_production(&record)?;
        tracing::info!(date = %record.date, "updated production record");
        Ok(record)
    }

    fn delete(&self, key: &RecordKey) -> Result<()> {
        let date = match key {
            RecordKey::Date(date) => *date,
            RecordKey::Id(_) => {
                return Err(Error::Query(format!(
                    "production records are addressed by date, got {}",
                    key
                )));
            }
        };
        self.db.delete_production(date)?;
        tracing::info!(%date, "deleted production record");
        Ok(())
    }
}

impl RecordStore for SqliteRecordStore<'_, EnergyUsageRecord> {
    type Record = EnergyUsageRecord;
    type Draft = NewEnergyUsage;
    type Error = Error;

    fn fetch(&self, query: &RangeQuery) -> Result<Vec<EnergyUsageRecord>> {
        self.db.list_energy(query)
    }

    fn create(&self, draft: NewEnergyUsage) -> Result<EnergyUsageRecord> {
        let record = self.db.insert_energy(draft)?;
        tracing::info!(id = record.id, "created energy usage record");
        Ok(record)
    }

    fn update(&self, record: EnergyUsageRecord) -> Result<EnergyUsageRecord> {
        let record = self.db.update_energy(record)?;
        tracing::info!(id = record.id, "updated energy usage record");
        Ok(record)
    }

    fn delete(&self, key: &RecordKey) -> Result<()> {
        let id = id_key::<EnergyUsageRecord>(key)?;
        self.db.delete_energy(id)?;
        tracing::info!(id, "deleted energy usage record");
        Ok(())
    }
}

impl RecordStore for SqliteRecordStore<'_, ChemicalUsageRecord> {
    type Record = ChemicalUsageRecord;
    type Draft = NewChemicalUsage;
    type Error = Error;

    fn fetch(&self, query: &RangeQuery) -> Result<Vec<ChemicalUsageRecord>> {
        self.db.list_chemical_usage(query)
    }

    fn create(&self, draft: NewChemicalUsage) -> Result<ChemicalUsageRecord> {
        let record = self.db.insert_chemical_usage(&draft)?;
        tracing::info!(id = record.id, chemical = %record.chemical.name, "created chemical usage record");
        Ok(record)
    }

    fn update(&self, record: ChemicalUsageRecord) -> Result<ChemicalUsageRecord> {
        let record = self.db.update_chemical_usage(&record)?;
        tracing::info!(id = record.id, "updated chemical usage record");
        Ok(record)
    }

    fn delete(&self, key: &RecordKey) -> Result<()> {
        let id = id_key::<ChemicalUsageRecord>(key)?;
        self.db.delete_chemical_usage(id)?;
        tracing::info!(id, "deleted chemical usage record");
        Ok(())
    }

    /// Whole catalog, regardless of the fetched range
    fn reference_data(&self) -> Result<ReferenceData> {
        Ok(ReferenceData {
            chemicals: self.db.list_chemicals()?,
        })
    }
}
