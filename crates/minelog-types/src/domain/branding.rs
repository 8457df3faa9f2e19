use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

pub const DEFAULT_COMPANY_NAME: &str = "Mining Company Ltd.";
pub const DEFAULT_TAGLINE: &str = "Excellence in Mining Operations";
pub const DEFAULT_EMAIL: &str = "info@miningcompany.com";

/// Company identity used to decorate exported documents.
///
/// Every field is optional; the exporter substitutes defaults for missing
/// text and a bundled image for missing logos. Logos are base64 strings,
/// optionally in `data:image/png;base64,...` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_logo: Option<String>,
}

impl BrandingSettings {
    pub fn logo_for(&self, theme: Theme) -> Option<&str> {
        let logo = match theme {
            Theme::Light => self.light_logo.as_deref(),
            Theme::Dark => self.dark_logo.as_deref(),
        };
        logo.filter(|s| !s.trim().is_empty())
    }
}

/// Header text lines with defaults applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBranding {
    pub name: String,
    pub tagline: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
}

impl ResolvedBranding {
    pub fn from_settings(settings: Option<&BrandingSettings>) -> Self {
        fn present(value: Option<&String>) -> Option<String> {
            value.filter(|s| !s.trim().is_empty()).cloned()
        }

        let settings = settings.cloned().unwrap_or_default();
        Self {
            name: present(settings.name.as_ref())
                .unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string()),
            tagline: present(settings.tagline.as_ref())
                .unwrap_or_else(|| DEFAULT_TAGLINE.to_string()),
            email: present(settings.email.as_ref()).unwrap_or_else(|| DEFAULT_EMAIL.to_string()),
            phone: present(settings.phone.as_ref()),
            website: present(settings.website.as_ref()),
            address: present(settings.address.as_ref()),
        }
    }
}

/// UI theme; picks the light or dark logo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::Parse(format!("unknown theme '{}'", other))),
        }
    }
}
