use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use minelog_types::{BrandingSettings, Theme};
use printpdf::image_crate::{self, DynamicImage};

use crate::{Error, Result};

/// Logo used when branding has none or it cannot be decoded
pub static DEFAULT_LOGO_PNG: &[u8] = include_bytes!("../../assets/default_logo.png");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoSource {
    Branding,
    Bundled,
}

#[derive(Debug, Clone)]
pub struct Logo {
    pub image: DynamicImage,
    pub source: LogoSource,
}

/// Pick the header logo for `theme`.
///
/// A configured logo that fails to decode is logged and replaced by the
/// bundled image. `None` only if the bundled image itself is unreadable.
pub fn load_logo(branding: Option<&BrandingSettings>, theme: Theme) -> Option<Logo> {
    if let Some(data) = branding.and_then(|b| b.logo_for(theme)) {
        match decode_logo(data) {
            Ok(image) => {
                return Some(Logo {
                    image,
                    source: LogoSource::Branding,
                });
            }
            Err(err) => {
                tracing::warn!(%theme, error = %err, "branding logo unusable, using bundled logo");
            }
        }
    }

    match image_crate::load_from_memory(DEFAULT_LOGO_PNG) {
        Ok(image) => Some(Logo {
            image,
            source: LogoSource::Bundled,
        }),
        Err(err) => {
            tracing::warn!(error = %err, "bundled logo unreadable, exporting without logo");
            None
        }
    }
}

/// Decode a base64 image, with or without a `data:<mime>;base64,` prefix
pub fn decode_logo(data: &str) -> Result<DynamicImage> {
    let payload = match data.trim().strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, encoded)| encoded)
            .ok_or_else(|| Error::ExportAssetFailure("malformed data URL".to_string()))?,
        None => data,
    };
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| Error::ExportAssetFailure(format!("invalid base64 logo: {}", e)))?;
    image_crate::load_from_memory(&bytes)
        .map_err(|e| Error::ExportAssetFailure(format!("undecodable logo image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branding_with_logo(logo: &str) -> BrandingSettings {
        BrandingSettings {
            light_logo: Some(logo.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_branding_uses_bundled_logo() {
        let logo = load_logo(None, Theme::Light).unwrap();
        assert_eq!(logo.source, LogoSource::Bundled);
    }

    #[test]
    fn test_broken_logo_falls_back_to_bundled() {
        let branding = branding_with_logo("data:image/png;base64,not-an-image!!");
        let logo = load_logo(Some(&branding), Theme::Light).unwrap();
        assert_eq!(logo.source, LogoSource::Bundled);
    }

    #[test]
    fn test_valid_data_url_logo_is_used() {
        let encoded = format!("data:image/png;base64,{}", STANDARD.encode(DEFAULT_LOGO_PNG));
        let branding = branding_with_logo(&encoded);

        let logo = load_logo(Some(&branding), Theme::Light).unwrap();
        assert_eq!(logo.source, LogoSource::Branding);

        // dark theme has no logo configured
        let dark = load_logo(Some(&branding), Theme::Dark).unwrap();
        assert_eq!(dark.source, LogoSource::Bundled);
    }

    #[test]
    fn test_decode_rejects_non_image_bytes() {
        let encoded = STANDARD.encode(b"plain text, not a png");
        assert!(matches!(
            decode_logo(&encoded),
            Err(Error::ExportAssetFailure(_))
        ));
    }
}
