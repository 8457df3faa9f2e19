mod context;
mod page;

pub mod branding;
pub mod catalog;
pub mod chemical;
pub mod energy;
pub mod export;
pub mod init;
pub mod list;
pub mod production;

pub use context::HandlerContext;
