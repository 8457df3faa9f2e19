use std::fmt;

/// Result type for minelog-index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the store layer
#[derive(Debug)]
pub enum Error {
    /// Database operation failed
    Database(rusqlite::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Stored data could not be interpreted, or input was invalid
    Query(String),

    /// Write would break a uniqueness rule
    Conflict(String),

    /// Update or delete addressed a record that does not exist
    NotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) => {
                let msg = err.to_string();
                if msg.contains("no such column") || msg.contains("no such table") {
                    write!(
                        f,
                        "Database schema mismatch: {}. Run `minelog init` to migrate.",
                        msg
                    )
                } else {
                    write!(f, "Database error: {}", err)
                }
            }
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Query(msg) => write!(f, "Query error: {}", msg),
            Error::Conflict(msg) => write!(f, "{}", msg),
            Error::NotFound(what) => write!(f, "{}: record not found", what),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Query(_) | Error::Conflict(_) | Error::NotFound(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_error_message() {
        let sqlite_err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("no such table: energy_usage".to_string()),
        );
        let msg = Error::Database(sqlite_err).to_string();

        assert!(msg.contains("Database schema mismatch"));
        assert!(msg.contains("minelog init"));
    }

    #[test]
    fn test_not_found_message() {
        let msg = Error::NotFound("energy_usage #12".to_string()).to_string();
        assert_eq!(msg, "energy_usage #12: record not found");
    }
}
