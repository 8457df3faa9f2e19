pub mod branding;
pub mod config;
pub mod error;
pub mod page;
pub mod sink;
pub mod workspace;

pub use branding::{BrandingCache, FileBrandingProvider};
pub use config::{Config, ExportConfig, ViewConfig, resolve_workspace_path};
pub use error::{Error, Result};
pub use page::{Clock, FormState, RecordPage, Snapshot};
pub use sink::{DirectorySink, DownloadSink, MemorySink};
pub use workspace::{ConfigStatus, InitResult, Workspace};
