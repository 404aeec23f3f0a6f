// Certificate PDF export.
// The page holds a single full-bleed raster of the rendered canvas.
use genpdf::fonts::{FontData, FontFamily};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;
use tracing::info;

use crate::render::canvas::Canvas;
use crate::render::certificate::{page_size_mm, DPI};

pub const FILENAME: &str = "certificadoMaraton.pdf";
const TITLE: &str = "Certificado Maratón HD 2025";

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("failed to encode canvas: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to build PDF: {0}")]
    Pdf(#[from] genpdf::error::Error),
}

pub struct PdfExporter {
    font_family: FontFamily<FontData>,
}

impl PdfExporter {
    /// genpdf wants a font family even for documents without text.
    pub fn new(font_family: FontFamily<FontData>) -> Self {
        Self { font_family }
    }

    pub fn export(&self, canvas: &Canvas) -> Result<Vec<u8>, PdfError> {
        let rgb = canvas.to_rgb();
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )?;

        let (width_mm, height_mm) = page_size_mm();
        let mut doc = genpdf::Document::new(self.font_family.clone());
        doc.set_title(TITLE);
        doc.set_paper_size(genpdf::Size::new(f64::from(width_mm), f64::from(height_mm)));

        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(0);
        doc.set_page_decorator(decorator);

        // At the canvas DPI the raster covers the page exactly.
        let image = genpdf::elements::Image::from_reader(Cursor::new(png))?
            .with_position(genpdf::Position::new(0, 0))
            .with_dpi(f64::from(DPI));
        doc.push(image);

        let mut out = Vec::new();
        doc.render(&mut out)?;
        info!("Exported certificate PDF ({} bytes)", out.len());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::fixture_fonts;
    use crate::render::certificate::canvas_size;
    use image::Rgba;

    #[test]
    fn exports_single_landscape_page() {
        let source = fixture_fonts();
        let exporter = PdfExporter::new(source.pdf_family().unwrap());
        let (w, h) = canvas_size();
        let mut canvas = Canvas::new(w, h, source.raster_fonts().unwrap());
        canvas.fill(Rgba([255, 255, 255, 255]));

        let pdf = exporter.export(&canvas).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(String::from_utf8_lossy(&pdf).contains("/Image"));
    }
}
