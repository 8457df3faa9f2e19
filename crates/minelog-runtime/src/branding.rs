use crate::{Error, Result};
use minelog_types::{BrandingProvider, BrandingSettings};
use std::path::{Path, PathBuf};

/// Branding settings stored as a camelCase JSON document
#[derive(Debug, Clone)]
pub struct FileBrandingProvider {
    path: PathBuf,
}

impl FileBrandingProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, settings: &BrandingSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| Error::Branding(format!("cannot serialize settings: {}", e)))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove stored settings; exports fall back to defaults afterwards
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl BrandingProvider for FileBrandingProvider {
    type Error = Error;

    fn read(&self) -> Result<Option<BrandingSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let settings = serde_json::from_str(&content).map_err(|e| {
            Error::Branding(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(Some(settings))
    }
}

/// Read-mostly holder for branding settings.
///
/// Loaded from the provider on first use and replaced as a whole, never
/// patched in place, so readers always see a complete snapshot.
pub struct BrandingCache<P> {
    provider: P,
    current: Option<Option<BrandingSettings>>,
}

impl<P: BrandingProvider> BrandingCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            current: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Current settings; `None` when nothing is configured.
    ///
    /// A provider failure is logged and treated as "not configured" so an
    /// export can still proceed with default branding.
    pub fn get(&mut self) -> Option<&BrandingSettings> {
        if self.current.is_none() {
            let loaded = match self.provider.read() {
                Ok(settings) => settings,
                Err(err) => {
                    tracing::warn!(error = %err, "branding unavailable, using defaults");
                    None
                }
            };
            self.current = Some(loaded);
        }
        self.current.as_ref().and_then(|s| s.as_ref())
    }

    /// Swap in a new snapshot without touching the provider
    pub fn replace(&mut self, settings: Option<BrandingSettings>) {
        self.current = Some(settings);
    }

    /// Drop the cached snapshot; the next `get` re-reads the provider
    pub fn invalidate(&mut self) {
        self.current = None;
    }
}

impl BrandingCache<FileBrandingProvider> {
    pub fn save(&mut self, settings: BrandingSettings) -> Result<()> {
        self.provider.write(&settings)?;
        self.replace(Some(settings));
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.provider.clear()?;
        self.replace(None);
        Ok(())
    }
}
