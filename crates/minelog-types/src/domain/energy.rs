use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{Record, RecordKey, RecordKind};
use super::value::{CellFormat, ColumnDef, FieldDef, FieldKind, FieldValue};

/// Energy consumption and cost for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyUsageRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub electricity_kwh: f64,
    pub electricity_cost: f64,
    pub diesel_liters: f64,
    pub diesel_cost: f64,
    /// Always `electricity_cost + diesel_cost`
    pub total_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl EnergyUsageRecord {
    /// Re-derive `total_cost` from its components
    pub fn with_recomputed_total(mut self) -> Self {
        self.total_cost = self.electricity_cost + self.diesel_cost;
        self
    }
}

/// Fields for a new energy record; the store assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEnergyUsage {
    pub date: NaiveDate,
    pub electricity_kwh: f64,
    pub electricity_cost: f64,
    pub diesel_liters: f64,
    pub diesel_cost: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewEnergyUsage {
    pub fn total_cost(&self) -> f64 {
        self.electricity_cost + self.diesel_cost
    }

    pub fn into_record(self, id: i64) -> EnergyUsageRecord {
        EnergyUsageRecord {
            id,
            date: self.date,
            electricity_kwh: self.electricity_kwh,
            electricity_cost: self.electricity_cost,
            diesel_liters: self.diesel_liters,
            diesel_cost: self.diesel_cost,
            total_cost: self.total_cost(),
            notes: self.notes,
        }
    }
}

impl Record for EnergyUsageRecord {
    const KIND: RecordKind = RecordKind::EnergyUsage;

    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", "ID", FieldKind::Integer, false),
        FieldDef::new("date", "Date", FieldKind::Date, true),
        FieldDef::new("electricity_kwh", "Electricity (kWh)", FieldKind::Number, true),
        FieldDef::new("electricity_cost", "Electricity Cost ($)", FieldKind::Number, false),
        FieldDef::new("diesel_liters", "Diesel (L)", FieldKind::Number, true),
        FieldDef::new("diesel_cost", "Diesel Cost ($)", FieldKind::Number, false),
        FieldDef::new("total_cost", "Total Cost ($)", FieldKind::Number, true),
        FieldDef::new("notes", "Notes", FieldKind::Text, true),
    ];

    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::new("Date", "date", CellFormat::Date, Some(25.0)),
        ColumnDef::new("Electricity (kWh)", "electricity_kwh", CellFormat::Decimal(2), Some(25.0)),
        ColumnDef::new("Electricity Cost ($)", "electricity_cost", CellFormat::Decimal(2), Some(25.0)),
        ColumnDef::new("Diesel (L)", "diesel_liters", CellFormat::Decimal(2), Some(25.0)),
        ColumnDef::new("Diesel Cost ($)", "diesel_cost", CellFormat::Decimal(2), Some(25.0)),
        ColumnDef::new("Total Cost ($)", "total_cost", CellFormat::Decimal(2), Some(25.0)),
        ColumnDef::new("Notes", "notes", CellFormat::Text, None),
    ];

    fn key(&self) -> RecordKey {
        RecordKey::Id(self.id)
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "id" => FieldValue::Integer(self.id),
            "date" => FieldValue::Date(self.date),
            "electricity_kwh" => FieldValue::Number(self.electricity_kwh),
            "electricity_cost" => FieldValue::Number(self.electricity_cost),
            "diesel_liters" => FieldValue::Number(self.diesel_liters),
            "diesel_cost" => FieldValue::Number(self.diesel_cost),
            "total_cost" => FieldValue::Number(self.total_cost),
            "notes" => FieldValue::optional_text(self.notes.as_deref()),
            _ => FieldValue::Null,
        }
    }
}
