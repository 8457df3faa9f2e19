use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{Record, RecordKey, RecordKind};
use super::value::{CellFormat, ColumnDef, FieldDef, FieldKind, FieldValue};

/// Daily gold production figures. The date is the primary key: there is at
/// most one record per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub date: NaiveDate,
    /// Tonnes crushed
    pub total_tonnage_crushed: f64,
    /// Tonnes hoisted
    pub total_tonnage_hoisted: f64,
    /// Percent
    pub gold_recovery_rate: f64,
    /// Percent
    pub operational_efficiency: f64,
    /// Grams
    pub gold_smelted: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record for ProductionRecord {
    const KIND: RecordKind = RecordKind::Production;

    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("date", "Date", FieldKind::Date, true),
        FieldDef::new("total_tonnage_crushed", "Tonnage Crushed (t)", FieldKind::Number, true),
        FieldDef::new("total_tonnage_hoisted", "Tonnage Hoisted (t)", FieldKind::Number, true),
        FieldDef::new("gold_recovery_rate", "Recovery Rate (%)", FieldKind::Number, true),
        FieldDef::new("operational_efficiency", "Efficiency (%)", FieldKind::Number, true),
        FieldDef::new("gold_smelted", "Gold Smelted (g)", FieldKind::Number, true),
        FieldDef::new("notes", "Notes", FieldKind::Text, true),
    ];

    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::new("Date", "date", CellFormat::Date, Some(25.0)),
        ColumnDef::new("Tonnage Crushed (t)", "total_tonnage_crushed", CellFormat::Decimal(2), Some(25.0)),
        ColumnDef::new("Tonnage Hoisted (t)", "total_tonnage_hoisted", CellFormat::Decimal(2), Some(25.0)),
        ColumnDef::new("Recovery Rate (%)", "gold_recovery_rate", CellFormat::Decimal(2), Some(25.0)),
        ColumnDef::new("Efficiency (%)", "operational_efficiency", CellFormat::Decimal(2), Some(25.0)),
        ColumnDef::new("Gold Smelted (g)", "gold_smelted", CellFormat::Decimal(2), Some(25.0)),
        ColumnDef::new("Notes", "notes", CellFormat::Text, None),
    ];

    fn key(&self) -> RecordKey {
        RecordKey::Date(self.date)
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn value(&self, field: &str) -> FieldValue {
        match field {
            "date" => FieldValue::Date(self.date),
            "total_tonnage_crushed" => FieldValue::Number(self.total_tonnage_crushed),
            "total_tonnage_hoisted" => FieldValue::Number(self.total_tonnage_hoisted),
            "gold_recovery_rate" => FieldValue::Number(self.gold_recovery_rate),
            "operational_efficiency" => FieldValue::Number(self.operational_efficiency),
            "gold_smelted" => FieldValue::Number(self.gold_smelted),
            "notes" => FieldValue::optional_text(self.notes.as_deref()),
            _ => FieldValue::Null,
        }
    }
}
