// SQLite record store
// One connection backs every record family; stores borrow it per page

mod db;
mod error;
mod queries;
mod schema;
mod store;

// Public API
pub use db::Database;
pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
pub use store::SqliteRecordStore;
