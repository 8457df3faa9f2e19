pub mod chemical;
pub mod energy;
pub mod production;

use chrono::NaiveDate;
use rusqlite::Row;
use rusqlite::types::Type;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dates are stored as `yyyy-MM-dd` text so range filters compare lexically
pub(crate) fn date_param(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
