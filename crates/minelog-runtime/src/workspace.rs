use crate::branding::FileBrandingProvider;
use crate::config::{Config, resolve_workspace_path};
use crate::{Error, Result};
use minelog_index::Database;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "minelog.db";
const BRANDING_FILE: &str = "branding.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigStatus {
    Created { config_path: PathBuf },
    LoadedExisting { config_path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct InitResult {
    pub config_status: ConfigStatus,
    pub db_path: PathBuf,
    pub schema_version: i32,
}

/// Data directory holding the config file, record database and branding settings
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn resolve(explicit_path: Option<&str>) -> Result<Self> {
        Ok(Self::at(resolve_workspace_path(explicit_path)?))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join(DB_FILE)
    }

    pub fn branding_path(&self) -> PathBuf {
        self.root.join(BRANDING_FILE)
    }

    /// Create the directory, write a default config if none exists and
    /// bring the database schema up to date. Safe to run repeatedly.
    pub fn init(&self) -> Result<InitResult> {
        std::fs::create_dir_all(&self.root)?;

        let config_path = self.config_path();
        let config_status = if config_path.exists() {
            Config::load_from(&config_path)?;
            ConfigStatus::LoadedExisting { config_path }
        } else {
            Config::default().save_to(&config_path)?;
            tracing::info!(path = %config_path.display(), "wrote default config");
            ConfigStatus::Created { config_path }
        };

        let db_path = self.db_path();
        let db = Database::open(&db_path)?;
        let schema_version = db.schema_version()?;
        tracing::info!(path = %db_path.display(), schema_version, "database ready");

        Ok(InitResult {
            config_status,
            db_path,
            schema_version,
        })
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path())
    }

    /// Open the record database. Fails rather than creating an empty one.
    pub fn open_database(&self) -> Result<Database> {
        let db_path = self.db_path();
        if !db_path.exists() {
            return Err(Error::NotInitialized(format!(
                "no database at {}. Run `minelog init` first.",
                db_path.display()
            )));
        }
        Ok(Database::open(&db_path)?)
    }

    pub fn branding_provider(&self) -> FileBrandingProvider {
        FileBrandingProvider::new(self.branding_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config_and_database() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let workspace = Workspace::at(temp_dir.path().join("data"));

        let result = workspace.init()?;
        assert!(matches!(result.config_status, ConfigStatus::Created { .. }));
        assert_eq!(result.schema_version, minelog_index::SCHEMA_VERSION);
        assert!(workspace.config_path().exists());
        assert!(workspace.db_path().exists());
        Ok(())
    }

    #[test]
    fn test_second_init_keeps_existing_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let workspace = Workspace::at(temp_dir.path());

        let mut config = Config::default();
        config.export.date_format = "%Y-%m-%d".to_string();
        config.save_to(&workspace.config_path())?;

        let result = workspace.init()?;
        assert!(matches!(
            result.config_status,
            ConfigStatus::LoadedExisting { .. }
        ));
        assert_eq!(workspace.load_config()?.export.date_format, "%Y-%m-%d");
        Ok(())
    }

    #[test]
    fn test_open_database_requires_init() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let workspace = Workspace::at(temp_dir.path());

        assert!(matches!(
            workspace.open_database(),
            Err(Error::NotInitialized(_))
        ));
        assert!(!workspace.db_path().exists());

        workspace.init()?;
        assert!(workspace.open_database().is_ok());
        Ok(())
    }
}
