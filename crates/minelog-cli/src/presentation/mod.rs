mod renderer;
mod result;
pub mod views;

pub use renderer::ConsoleRenderer;
pub use result::{CommandResultViewModel, Guidance, StatusBadge, StatusLevel};
