use crate::Result;
use minelog_engine::ExportFile;
use std::path::{Path, PathBuf};

/// Destination for finished export files
pub trait DownloadSink {
    /// Hand over `file`; returns where it ended up
    fn deliver(&mut self, file: ExportFile) -> Result<String>;
}

/// Writes each file into a directory, replacing any file of the same name
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, file: ExportFile) -> Result<String> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&file.file_name);
        std::fs::write(&path, &file.bytes)?;
        tracing::debug!(path = %path.display(), bytes = file.bytes.len(), "export written");
        Ok(path.display().to_string())
    }
}

/// Keeps delivered files in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<ExportFile>,
}

impl DownloadSink for MemorySink {
    fn deliver(&mut self, file: ExportFile) -> Result<String> {
        let name = file.file_name.clone();
        self.files.push(file);
        Ok(name)
    }
}
