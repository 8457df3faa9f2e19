use crate::presentation::{CommandResultViewModel, ConsoleRenderer};
use crate::types::OutputFormat;
use anyhow::Result;
use minelog_index::Database;
use minelog_runtime::{Config, Workspace};
use serde::Serialize;
use std::fmt::Display;

/// Workspace and output settings shared by every handler
pub struct HandlerContext {
    pub workspace: Workspace,
    renderer: ConsoleRenderer,
}

impl HandlerContext {
    pub fn new(workspace: Workspace, format: OutputFormat) -> Self {
        Self {
            workspace,
            renderer: ConsoleRenderer::new(format),
        }
    }

    pub fn config(&self) -> Result<Config> {
        Ok(self.workspace.load_config()?)
    }

    pub fn database(&self) -> Result<Database> {
        Ok(self.workspace.open_database()?)
    }

    pub fn render<T>(&self, view_model: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + Display,
    {
        self.renderer.render(view_model)
    }
}
