// minelog keeps the record store as the single source of truth. Every
// command opens a page over one record family, lets the store answer the
// range query, then filters, sorts and pages in memory. Mutations go to
// the store and are followed by a refetch; nothing is patched locally.

mod args;
mod commands;
mod handlers;
mod logging;
pub mod presentation;
pub mod types;

pub use args::{
    BrandingCommand, CatalogCommand, ChemicalCommand, Cli, Commands, EnergyCommand,
    ProductionCommand,
};
pub use commands::run;
