use std::fmt;

/// Result type for minelog-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Record or reference fetch failed; no rows are shown as valid
    FetchFailed(String),

    /// Create, update or delete was rejected by the store; prior state is kept
    MutationFailed(String),

    /// Configuration error
    Config(String),

    /// Branding settings could not be read or written
    Branding(String),

    /// Workspace not initialized
    NotInitialized(String),

    /// Engine layer error (range resolution, export)
    Engine(minelog_engine::Error),

    /// Invalid range, sort or page input
    Types(minelog_types::Error),

    /// Database layer error outside a page operation
    Index(minelog_index::Error),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FetchFailed(msg) => write!(f, "Failed to load records: {}", msg),
            Error::MutationFailed(msg) => write!(f, "Failed to save changes: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Branding(msg) => write!(f, "Branding error: {}", msg),
            Error::NotInitialized(msg) => write!(f, "Workspace not initialized: {}", msg),
            Error::Engine(err) => write!(f, "{}", err),
            Error::Types(err) => write!(f, "{}", err),
            Error::Index(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Engine(err) => Some(err),
            Error::Types(err) => Some(err),
            Error::Index(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::FetchFailed(_)
            | Error::MutationFailed(_)
            | Error::Config(_)
            | Error::Branding(_)
            | Error::NotInitialized(_) => None,
        }
    }
}

impl From<minelog_engine::Error> for Error {
    fn from(err: minelog_engine::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<minelog_types::Error> for Error {
    fn from(err: minelog_types::Error) -> Self {
        Error::Types(err)
    }
}

impl From<minelog_index::Error> for Error {
    fn from(err: minelog_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
