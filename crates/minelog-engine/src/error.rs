use std::fmt;

/// Result type for minelog-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the record engine
#[derive(Debug)]
pub enum Error {
    /// Invalid range, sort or page input
    Types(minelog_types::Error),

    /// CSV serialization failed
    Csv(csv::Error),

    /// Document rendering failed
    Render(String),

    /// A branding asset could not be embedded. Recovered inside `export_pdf`.
    ExportAssetFailure(String),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Types(err) => write!(f, "{}", err),
            Error::Csv(err) => write!(f, "CSV export error: {}", err),
            Error::Render(msg) => write!(f, "PDF render error: {}", msg),
            Error::ExportAssetFailure(msg) => write!(f, "Export asset failure: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Types(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Render(_) | Error::ExportAssetFailure(_) => None,
        }
    }
}

impl From<minelog_types::Error> for Error {
    fn from(err: minelog_types::Error) -> Self {
        Error::Types(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
