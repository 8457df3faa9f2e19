use super::HandlerContext;
use crate::args::BrandingCommand;
use crate::presentation::views::BrandingView;
use crate::presentation::{CommandResultViewModel, StatusBadge};
use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use minelog_engine::export::decode_logo;
use minelog_runtime::BrandingCache;
use minelog_types::BrandingProvider;
use std::path::Path;

pub fn handle(ctx: &HandlerContext, command: BrandingCommand) -> Result<()> {
    let provider = ctx.workspace.branding_provider();
    let path = provider.path().to_path_buf();
    let mut cache = BrandingCache::new(provider);

    match command {
        BrandingCommand::Show => {
            let view = BrandingView::new(path, cache.get());
            ctx.render(CommandResultViewModel::new(view))
        }
        BrandingCommand::Set {
            name,
            tagline,
            email,
            phone,
            address,
            website,
            light_logo,
            dark_logo,
        } => {
            // Read errors surface here; silently starting over would drop fields
            let mut settings = cache.provider().read()?.unwrap_or_default();
            for (slot, value) in [
                (&mut settings.name, name),
                (&mut settings.tagline, tagline),
                (&mut settings.email, email),
                (&mut settings.phone, phone),
                (&mut settings.address, address),
                (&mut settings.website, website),
            ] {
                if value.is_some() {
                    *slot = value;
                }
            }
            if let Some(file) = light_logo {
                settings.light_logo = Some(logo_data_url(&file)?);
            }
            if let Some(file) = dark_logo {
                settings.dark_logo = Some(logo_data_url(&file)?);
            }

            cache.save(settings)?;
            let view = BrandingView::new(path, cache.get());
            ctx.render(
                CommandResultViewModel::new(view).with_badge(StatusBadge::success("Branding saved")),
            )
        }
        BrandingCommand::Clear => {
            cache.clear()?;
            let view = BrandingView::new(path, cache.get());
            ctx.render(
                CommandResultViewModel::new(view)
                    .with_badge(StatusBadge::success("Branding cleared")),
            )
        }
    }
}

/// Encode an image file as a `data:` URL, rejecting files that will not decode
fn logo_data_url(path: &Path) -> Result<String> {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => bail!(
            "unsupported logo file {}: use a PNG or JPEG image",
            path.display()
        ),
    };

    let bytes =
        std::fs::read(path).with_context(|| format!("cannot read logo {}", path.display()))?;
    let url = format!("data:{};base64,{}", mime, STANDARD.encode(&bytes));
    decode_logo(&url).with_context(|| format!("{} is not a usable image", path.display()))?;
    tracing::debug!(file = %path.display(), bytes = bytes.len(), "encoded logo");
    Ok(url)
}
