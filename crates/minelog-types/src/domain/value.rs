use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write;

/// ISO form used when a pattern cannot render a date
pub const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Render `date` with a strftime `pattern`.
///
/// Returns `None` for patterns chrono rejects, and for patterns asking for
/// fields a plain date does not have (`%H`, `%S`, `%z`, ...).
pub fn format_date(date: NaiveDate, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}

/// Value of a single record field as seen by the filter, sorter and exporter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Date(NaiveDate),
    Number(f64),
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// `None` maps to `Null`, anything else to `Text`
    pub fn optional_text(value: Option<&str>) -> Self {
        match value {
            Some(s) => FieldValue::Text(s.to_string()),
            None => FieldValue::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text used for substring search. Numbers use their shortest form
    /// (`100`, `12.5`), dates use ISO `yyyy-MM-dd`.
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
        }
    }

    /// Ordering between two non-null values.
    ///
    /// Dates compare chronologically, two numeric operands compare
    /// numerically, everything else compares case-insensitively as text.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        if let (FieldValue::Date(a), FieldValue::Date(b)) = (self, other) {
            return a.cmp(b);
        }
        if let (Some(a), Some(b)) = (self.as_number(), other.as_number()) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
        let a = self.search_text().unwrap_or_default().to_lowercase();
        let b = other.search_text().unwrap_or_default().to_lowercase();
        a.cmp(&b)
    }
}

/// Storage type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Date,
    Number,
    Integer,
    Text,
}

/// One declared field of a record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Included in the free-text search whitelist
    pub searchable: bool,
}

impl FieldDef {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        kind: FieldKind,
        searchable: bool,
    ) -> Self {
        Self {
            name,
            label,
            kind,
            searchable,
        }
    }
}

/// How an exported cell renders its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// Date in the configured display format
    Date,
    /// Fixed number of decimals
    Decimal(usize),
    /// Value as-is, empty for null
    Text,
}

/// One exported column: shared by the CSV and the PDF table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDef {
    pub label: &'static str,
    pub field: &'static str,
    pub format: CellFormat,
    /// Fixed width in the document table; `None` takes the remaining width
    pub width_mm: Option<f32>,
}

impl ColumnDef {
    pub const fn new(
        label: &'static str,
        field: &'static str,
        format: CellFormat,
        width_mm: Option<f32>,
    ) -> Self {
        Self {
            label,
            field,
            format,
            width_mm,
        }
    }

    pub fn render(&self, value: &FieldValue, date_format: &str) -> String {
        match (self.format, value) {
            (_, FieldValue::Null) => String::new(),
            (CellFormat::Date, FieldValue::Date(d)) => format_date(*d, date_format)
                .unwrap_or_else(|| d.format(FALLBACK_DATE_FORMAT).to_string()),
            (CellFormat::Decimal(places), v) => match v.as_number() {
                Some(n) => format!("{:.*}", places, n),
                None => v.search_text().unwrap_or_default(),
            },
            (_, v) => v.search_text().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_fields_in_date_pattern_do_not_panic() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date, "%d/%m/%Y").as_deref(), Some("05/03/2024"));
        assert_eq!(format_date(date, "%H:%M"), None);
        assert_eq!(format_date(date, "%z"), None);

        let column = ColumnDef::new("Date", "date", CellFormat::Date, None);
        assert_eq!(column.render(&FieldValue::Date(date), "%H:%M"), "2024-03-05");
    }

    #[test]
    fn test_search_text_uses_shortest_number_form() {
        assert_eq!(FieldValue::Number(100.0).search_text().unwrap(), "100");
        assert_eq!(FieldValue::Number(12.5).search_text().unwrap(), "12.5");
        assert_eq!(FieldValue::Null.search_text(), None);
    }

    #[test]
    fn test_compare_mixed_numeric_kinds() {
        let a = FieldValue::Integer(3);
        let b = FieldValue::Number(2.5);
        assert_eq!(a.compare(&b), Ordering::Greater);
    }

    #[test]
    fn test_compare_text_ignores_case() {
        let a = FieldValue::text("alpha");
        let b = FieldValue::text("Beta");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(
            FieldValue::text("LEACHING").compare(&FieldValue::text("leaching")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_render_decimal_and_null() {
        let col = ColumnDef::new("Cost", "cost", CellFormat::Decimal(2), Some(25.0));
        assert_eq!(col.render(&FieldValue::Number(3.14159), "%d/%m/%Y"), "3.14");
        assert_eq!(col.render(&FieldValue::Null, "%d/%m/%Y"), "");
    }

    #[test]
    fn test_render_date_with_format() {
        let col = ColumnDef::new("Date", "date", CellFormat::Date, Some(25.0));
        let value = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(col.render(&value, "%d/%m/%Y"), "09/03/2024");
        assert_eq!(col.render(&value, "%Y-%m-%d"), "2024-03-09");
    }
}
