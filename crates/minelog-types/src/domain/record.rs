use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::value::{ColumnDef, FieldDef, FieldValue};
use crate::{Error, Result};

/// Record families managed by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Production,
    EnergyUsage,
    ChemicalUsage,
}

impl RecordKind {
    /// Domain prefix used in export file names
    pub fn domain(&self) -> &'static str {
        match self {
            RecordKind::Production => "production",
            RecordKind::EnergyUsage => "energy_usage",
            RecordKind::ChemicalUsage => "chemical_usage",
        }
    }

    /// Title printed on document reports
    pub fn report_title(&self) -> &'static str {
        match self {
            RecordKind::Production => "Gold Production Report",
            RecordKind::EnergyUsage => "Energy Usage Report",
            RecordKind::ChemicalUsage => "Chemical Usage Report",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}

/// Mutation identity of a record.
///
/// Production records are keyed by their date; the other families carry a
/// surrogate numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordKey {
    Id(i64),
    Date(NaiveDate),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "#{}", id),
            RecordKey::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl FromStr for RecordKey {
    type Err = Error;

    /// Integers parse as ids, `yyyy-MM-dd` parses as a date key
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().trim_start_matches('#');
        if let Ok(id) = s.parse::<i64>() {
            return Ok(RecordKey::Id(id));
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        Ok(RecordKey::Date(date))
    }
}

/// Schema of a record family.
///
/// Filter, sorter, pager and exporters are written once against this trait
/// and instantiated per record type.
pub trait Record: Clone + fmt::Debug + Serialize {
    const KIND: RecordKind;

    /// Every field addressable by search and sort
    const FIELDS: &'static [FieldDef];

    /// Export column order, shared by CSV and document tables
    const COLUMNS: &'static [ColumnDef];

    /// Name of the field holding the record date
    const DATE_FIELD: &'static str = "date";

    fn key(&self) -> RecordKey;

    fn date(&self) -> NaiveDate;

    /// Value of a declared field; undeclared names yield `Null`
    fn value(&self, field: &str) -> FieldValue;

    fn field(name: &str) -> Option<&'static FieldDef> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }

    fn searchable_fields() -> impl Iterator<Item = &'static FieldDef> {
        Self::FIELDS.iter().filter(|f| f.searchable)
    }

    /// Fails with `UnknownField` when the schema does not declare `name`
    fn require_field(name: &str) -> Result<&'static FieldDef> {
        Self::field(name).ok_or_else(|| Error::UnknownField {
            kind: Self::KIND.domain().to_string(),
            field: name.to_string(),
        })
    }
}
