use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use rusttype::{point, Font, Scale};

use crate::fonts::RasterFonts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Em size in pixels.
    pub size: f32,
    pub weight: Weight,
    pub align: Align,
    pub color: Rgba<u8>,
}

/// Offscreen RGBA surface plus the fonts text is drawn with.
///
/// Text is positioned on its vertical middle: the `y` given to
/// [`Canvas::fill_text`] is halfway between the font's ascent and descent.
pub struct Canvas {
    image: RgbaImage,
    fonts: RasterFonts,
}

impl Canvas {
    pub fn new(width: u32, height: u32, fonts: RasterFonts) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            fonts,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn clear(&mut self) {
        self.fill(Rgba([0, 0, 0, 0]));
    }

    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    pub fn measure_text(&self, text: &str, size: f32, weight: Weight) -> f32 {
        let font = self.font(weight);
        let scale = em_scale(font, size);
        font.layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    pub fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let start_x = match style.align {
            Align::Left => x,
            Align::Center => x - self.measure_text(text, style.size, style.weight) / 2.0,
        };

        let Self { image, fonts } = self;
        let font = match style.weight {
            Weight::Regular => &fonts.regular,
            Weight::Bold => &fonts.bold,
        };
        let scale = em_scale(font, style.size);
        let v_metrics = font.v_metrics(scale);
        let baseline = y + (v_metrics.ascent + v_metrics.descent) / 2.0;

        for glyph in font.layout(text, scale, point(start_x, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px as u32 >= image.width() || py as u32 >= image.height() {
                    return;
                }
                blend(image.get_pixel_mut(px as u32, py as u32), style.color, coverage);
            });
        }
    }

    /// Draws `img` centered on `(cx, cy)`, scaled to fit `max_width` x
    /// `max_height` with its aspect ratio kept.
    pub fn draw_image_fit(&mut self, img: &DynamicImage, cx: f32, cy: f32, max_width: f32, max_height: f32) {
        let (w, h) = fit_size(img.width(), img.height(), max_width, max_height);
        let resized = imageops::resize(&img.to_rgba8(), w, h, FilterType::CatmullRom);
        let left = (cx - w as f32 / 2.0).round() as i64;
        let top = (cy - h as f32 / 2.0).round() as i64;
        imageops::overlay(&mut self.image, &resized, left, top);
    }

    /// Opaque copy of the surface for export.
    pub fn to_rgb(&self) -> RgbImage {
        DynamicImage::ImageRgba8(self.image.clone()).to_rgb8()
    }

    fn font(&self, weight: Weight) -> &Font<'static> {
        match weight {
            Weight::Regular => &self.fonts.regular,
            Weight::Bold => &self.fonts.bold,
        }
    }
}

/// rusttype scales by ascent-to-descent height; CSS-style sizes are em sizes.
fn em_scale(font: &Font<'_>, size: f32) -> Scale {
    let units = font.v_metrics_unscaled();
    let upem = f32::from(font.units_per_em().max(1));
    Scale::uniform(size * (units.ascent - units.descent) / upem)
}

pub fn fit_size(width: u32, height: u32, max_width: f32, max_height: f32) -> (u32, u32) {
    let scale = (max_width / width.max(1) as f32).min(max_height / height.max(1) as f32);
    (
        ((width as f32 * scale).round() as u32).max(1),
        ((height as f32 * scale).round() as u32).max(1),
    )
}

fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let a = coverage.clamp(0.0, 1.0) * color.0[3] as f32 / 255.0;
    if a <= 0.0 {
        return;
    }
    let inv = 1.0 - a;
    for c in 0..3 {
        dst.0[c] = (color.0[c] as f32 * a + dst.0[c] as f32 * inv).round() as u8;
    }
    dst.0[3] = (255.0 * a + dst.0[3] as f32 * inv).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_ratio() {
        assert_eq!(fit_size(400, 200, 330.0, 255.0), (330, 165));
        assert_eq!(fit_size(100, 400, 330.0, 255.0), (64, 255));
        assert_eq!(fit_size(10, 10, 330.0, 255.0), (255, 255));
    }

    #[test]
    fn blend_full_coverage_replaces_color() {
        let mut px = Rgba([255, 255, 255, 255]);
        blend(&mut px, Rgba([0x22, 0x22, 0x22, 255]), 1.0);
        assert_eq!(px, Rgba([0x22, 0x22, 0x22, 255]));
    }

    #[test]
    fn blend_zero_coverage_is_noop() {
        let mut px = Rgba([10, 20, 30, 255]);
        blend(&mut px, Rgba([200, 200, 200, 255]), 0.0);
        assert_eq!(px, Rgba([10, 20, 30, 255]));
    }
}
