use chrono::NaiveDateTime;
use std::fmt;

/// Result type for minelog-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building ranges, specs and values
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Custom range selected without both bounds
    IncompleteRange,

    /// Custom range whose start lies after its end
    InvertedRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Page size outside the allowed set (10, 25, 50)
    InvalidPageSize(usize),

    /// Field name not declared by the record schema
    UnknownField { kind: String, field: String },

    /// Unrecognised range selector text
    UnknownSelector(String),

    /// Malformed textual input (dates, numbers, themes)
    Parse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IncompleteRange => {
                write!(f, "Incomplete range: custom range needs both a start and an end date")
            }
            Error::InvertedRange { start, end } => write!(
                f,
                "Invalid range: start {} is after end {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
            Error::InvalidPageSize(size) => {
                write!(f, "Invalid page size {}: expected 10, 25 or 50", size)
            }
            Error::UnknownField { kind, field } => {
                write!(f, "Unknown field '{}' for {} records", field, kind)
            }
            Error::UnknownSelector(text) => write!(
                f,
                "Unknown range '{}': expected today, week, month, last7days, last30days or custom",
                text
            ),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Parse(err.to_string())
    }
}
