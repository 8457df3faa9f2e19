pub mod domain;
pub mod error;
pub mod store;

pub use domain::*;
pub use error::{Error, Result};
pub use store::*;
