//! Testing infrastructure for minelog integration tests.
//!
//! - `TestWorld`: isolated workspace plus CLI execution
//! - `assertions`: checks over the JSON envelope printed with `--format json`
//! - `fixtures`: argument builders for seeding records through the CLI

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
