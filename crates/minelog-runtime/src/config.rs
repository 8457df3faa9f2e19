use crate::{Error, Result};
use chrono::NaiveDate;
use minelog_types::{PageSize, RangeSelector, Theme, format_date};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the workspace data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. MINELOG_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.minelog (fallback for systems without XDG)
pub fn resolve_workspace_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    // Priority 2: MINELOG_PATH environment variable
    if let Ok(env_path) = std::env::var("MINELOG_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    // Priority 3: XDG data directory
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("minelog"));
    }

    // Priority 4: ~/.minelog
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".minelog"));
    }

    Err(Error::Config(
        "Could not determine workspace path: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Selector applied when a page opens; `custom` is not allowed here
    #[serde(default = "default_range")]
    pub default_range: RangeSelector,
    #[serde(default)]
    pub page_size: PageSize,
}

fn default_range() -> RangeSelector {
    RangeSelector::Last30Days
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_range: default_range(),
            page_size: PageSize::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub theme: Theme,
    /// strftime pattern for exported date cells
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_date_format() -> String {
    minelog_engine::export::DEFAULT_DATE_FORMAT.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            date_format: default_date_format(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values that would only fail later, mid-export or mid-view
    pub fn validate(&self) -> Result<()> {
        if self.view.default_range == RangeSelector::Custom {
            return Err(Error::Config(
                "view.default_range cannot be 'custom': a custom range needs explicit dates"
                    .to_string(),
            ));
        }
        validate_date_format(&self.export.date_format)
    }
}

/// The pattern must render a plain calendar date; time and zone fields cannot
pub fn validate_date_format(pattern: &str) -> Result<()> {
    let sample = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default();
    if pattern.is_empty() || format_date(sample, pattern).is_none() {
        return Err(Error::Config(format!(
            "invalid export.date_format '{}'",
            pattern
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.view.default_range, RangeSelector::Last30Days);
        assert_eq!(config.view.page_size, PageSize::Ten);
        assert_eq!(config.export.date_format, "%d/%m/%Y");
        assert_eq!(config.export.theme, Theme::Light);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.view.page_size = PageSize::Fifty;
        config.export.theme = Theme::Dark;
        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[view]\ndefault_range = \"7days\"\n")?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.view.default_range, RangeSelector::Last7Days);
        assert_eq!(config.view.page_size, PageSize::Ten);
        assert_eq!(config.export, ExportConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_page_size_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[view]\npage_size = 20\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("Invalid page size 20"));
        Ok(())
    }

    #[test]
    fn test_custom_default_range_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[view]\ndefault_range = \"custom\"\n")?;

        assert!(matches!(
            Config::load_from(&config_path),
            Err(Error::Config(_))
        ));
        Ok(())
    }

    #[test]
    fn test_date_format_validation() {
        assert!(validate_date_format("%d/%m/%Y").is_ok());
        assert!(validate_date_format("%Y-%m-%d").is_ok());
        assert!(validate_date_format("%Q").is_err());
        assert!(validate_date_format("").is_err());
        assert!(validate_date_format("%H:%M").is_err());
        assert!(validate_date_format("%d/%m/%Y %S").is_err());
        assert!(validate_date_format("%z").is_err());
    }

    #[test]
    fn test_explicit_path_expands_tilde() {
        let Some(home) = std::env::var_os("HOME") else {
            return;
        };
        let path = resolve_workspace_path(Some("~/mine-data")).unwrap();
        assert_eq!(path, PathBuf::from(home).join("mine-data"));
    }
}
