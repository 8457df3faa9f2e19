use printpdf::image_crate::{DynamicImage, GenericImageView};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfLayerReference, Rect, Rgb,
};

use super::layout::{Align, Element, PAGE_HEIGHT, PAGE_WIDTH, ReportDocument, Rgb8, text_width};
use super::logo::Logo;
use crate::{Error, Result};

const LOGO_DPI: f32 = 300.0;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn render_error(err: impl std::fmt::Debug) -> Error {
    Error::Render(format!("{:?}", err))
}

fn color(rgb: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(rgb.0) / 255.0,
        f32::from(rgb.1) / 255.0,
        f32::from(rgb.2) / 255.0,
        None,
    ))
}

/// Render a laid-out report into PDF bytes
pub fn render_pdf(document: &ReportDocument, logo: Option<&Logo>) -> Result<Vec<u8>> {
    let (pdf, first_page, first_layer) = PdfDocument::new(
        &document.title,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?,
    };

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                pdf.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            pdf.get_page(page_index).get_layer(layer_index)
        };

        for item in &page.elements {
            draw(&layer, &item.element, &fonts, logo);
        }
    }

    pdf.save_to_bytes().map_err(render_error)
}

fn draw(layer: &PdfLayerReference, element: &Element, fonts: &Fonts, logo: Option<&Logo>) {
    match element {
        Element::Text {
            x,
            y,
            size,
            bold,
            color: rgb,
            align,
            text,
        } => {
            let left = match align {
                Align::Left => *x,
                Align::Center => x - text_width(text, *size) / 2.0,
            };
            let font = if *bold { &fonts.bold } else { &fonts.regular };
            layer.set_fill_color(color(*rgb));
            layer.use_text(text.as_str(), *size, Mm(left), Mm(PAGE_HEIGHT - y), font);
        }
        Element::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            layer.set_fill_color(color(*fill));
            let rect = Rect::new(
                Mm(*x),
                Mm(PAGE_HEIGHT - y - height),
                Mm(x + width),
                Mm(PAGE_HEIGHT - y),
            )
            .with_mode(PaintMode::Fill);
            layer.add_rect(rect);
        }
        Element::Logo {
            x,
            y,
            width,
            height,
        } => {
            if let Some(logo) = logo {
                draw_logo(layer, &logo.image, *x, *y, *width, *height);
            }
        }
    }
}

/// Fit the image inside the box, keeping its aspect ratio
fn draw_logo(layer: &PdfLayerReference, image: &DynamicImage, x: f32, y: f32, width: f32, height: f32) {
    let (px_w, px_h) = image.dimensions();
    if px_w == 0 || px_h == 0 {
        return;
    }
    let natural_w = px_w as f32 / LOGO_DPI * 25.4;
    let natural_h = px_h as f32 / LOGO_DPI * 25.4;
    let scale = (width / natural_w).min(height / natural_h);

    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    Image::from_dynamic_image(&rgb).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(PAGE_HEIGHT - y - natural_h * scale)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(LOGO_DPI),
            ..Default::default()
        },
    );
}
