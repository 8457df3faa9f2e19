use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{Record, RecordKey, RecordKind};
use super::value::{CellFormat, ColumnDef, FieldDef, FieldKind, FieldValue};

/// Catalog entry for a chemical consumed on site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chemical {
    pub id: i64,
    pub name: String,
    /// Unit of measure, e.g. "kg" or "L"
    pub unit: String,
    #[serde(default)]
    pub current_stock: f64,
    #[serde(default)]
    pub minimum_required: f64,
    /// Price per unit, in dollars
    pub unit_price: f64,
}

impl Chemical {
    pub fn to_ref(&self) -> ChemicalRef {
        ChemicalRef {
            id: self.id,
            name: self.name.clone(),
            unit: self.unit.clone(),
        }
    }

    pub fn below_minimum(&self) -> bool {
        self.current_stock < self.minimum_required
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChemical {
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub current_stock: f64,
    #[serde(default)]
    pub minimum_required: f64,
    pub unit_price: f64,
}

/// Chemical identity embedded in a usage record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemicalRef {
    pub id: i64,
    pub name: String,
    pub unit: String,
}

/// Amount of one chemical used by a process on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalUsageRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub chemical: ChemicalRef,
    pub amount_used: f64,
    pub process: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ChemicalUsageRecord {
    /// Amount with its unit, e.g. `"12.5 kg"`
    pub fn amount_display(&self) -> String {
        format!("{} {}", self.amount_used, self.chemical.unit)
    }
}

/// Fields for a new usage record; the store assigns the id and resolves the
/// chemical name and unit from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChemicalUsage {
    pub date: NaiveDate,
    pub chemical_id: i64,
    pub amount_used: f64,
    pub process: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Record for ChemicalUsageRecord {
    const KIND: RecordKind = RecordKind::ChemicalUsage;

    const FIELDS: &'static [FieldDef] = &[
        FieldDef::new("id", "ID", FieldKind::Integer, false),
        FieldDef::new("date", "Date", FieldKind::Date, false),
        FieldDef::new("chemical", "Chemical", FieldKind::Text, true),
        FieldDef::new("amount_used", "Amount Used", FieldKind::Number, false),
        FieldDef::new("process", "Process", FieldKind::Text, true),
        FieldDef::new("notes", "Notes", FieldKind::Text, true),
    ];

    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::new("Date", "date", CellFormat::Date, Some(25.0)),
        ColumnDef::new("Chemical", "chemical", CellFormat::Text, Some(35.0)),
        ColumnDef::new("Amount Used", "amount_display", CellFormat::Text, Some(30.0)),
        ColumnDef::new("Process", "process", CellFormat::Text, Some(35.0)),
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
            "chemical" => FieldValue::text(&self.chemical.name),
            "amount_used" => FieldValue::Number(self.amount_used),
            "amount_display" => FieldValue::Text(self.amount_display()),
            "process" => FieldValue::text(&self.process),
            "notes" => FieldValue::optional_text(self.notes.as_deref()),
            _ => FieldValue::Null,
        }
    }
}

/// Reference lists a report needs besides the records themselves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub chemicals: Vec<Chemical>,
}

impl ReferenceData {
    pub fn chemical(&self, id: i64) -> Option<&Chemical> {
        self.chemicals.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(amount: f64, unit: &str) -> ChemicalUsageRecord {
        ChemicalUsageRecord {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            chemical: ChemicalRef {
                id: 3,
                name: "Sodium Cyanide".to_string(),
                unit: unit.to_string(),
            },
            amount_used: amount,
            process: "Leaching".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_amount_display_keeps_short_number_form() {
        assert_eq!(usage(12.5, "kg").amount_display(), "12.5 kg");
        assert_eq!(usage(40.0, "L").amount_display(), "40 L");
    }

    #[test]
    fn test_date_is_not_searchable_for_usage() {
        let searchable: Vec<_> = ChemicalUsageRecord::searchable_fields()
            .map(|f| f.name)
            .collect();
        assert_eq!(searchable, vec!["chemical", "process", "notes"]);
    }
}
