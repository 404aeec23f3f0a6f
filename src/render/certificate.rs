use image::Rgba;
use tracing::info;

use super::assets::{AssetError, AssetLoader};
use super::canvas::{Align, Canvas, TextStyle, Weight};
use crate::layout;

/// Canvas resolution in pixels per inch.
pub const DPI: f32 = 150.0;
pub const PAGE_WIDTH_IN: f32 = 11.0;
pub const PAGE_HEIGHT_IN: f32 = 8.5;
pub const MM_PER_IN: f32 = 25.4;

/// Horizontal bands the page height is divided into for placement.
const Y_DIVISIONS: f32 = 20.0;

const BACKGROUND: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const INK: Rgba<u8> = Rgba([0x22, 0x22, 0x22, 0xff]);

pub const LOGO: &str = "Logo.png";

const HEADING: &str = "La Red Colombiana de Humanidades Digitales certifica que";
const INTRO: &str = "Fue participante en la Maratón HD 2025 en las siguientes actividades:";
const VENUE: &str = "La Maratón se realizó en la Universidad EAFIT y virtualmente los días 18 y 19 de septiembre de 2025";
const VERIFY: &str = "Puede verificar este certificado consultando la programación del evento en rchd.com.co/maraton";

pub fn canvas_size() -> (u32, u32) {
    (
        (PAGE_WIDTH_IN * DPI).round() as u32,
        (PAGE_HEIGHT_IN * DPI).round() as u32,
    )
}

pub fn page_size_mm() -> (f32, f32) {
    (PAGE_WIDTH_IN * MM_PER_IN, PAGE_HEIGHT_IN * MM_PER_IN)
}

/// A signature image with the caption printed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureBlock {
    pub asset: String,
    pub caption: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Positions and sizes derived once from the canvas dimensions.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    width: f32,
    height: f32,
    y_unit: f32,
    base: f32,
    max_text_width: f32,
    line_height: f32,
    regular_size: f32,
    name_size: f32,
    small_size: f32,
}

impl Geometry {
    fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as f32, height as f32);
        let y_unit = height / Y_DIVISIONS;
        Self {
            width,
            height,
            y_unit,
            base: y_unit * 5.0,
            max_text_width: width * 0.8,
            line_height: rounded_fraction(height, 0.04),
            regular_size: rounded_fraction(height, 0.03),
            name_size: rounded_fraction(height, 0.04),
            small_size: rounded_fraction(height, 0.02),
        }
    }

    fn column_left(&self) -> f32 {
        (self.width - self.max_text_width) / 2.0
    }
}

// f64 so that exact halves such as 1275 * 0.02 round up.
fn rounded_fraction(length: f32, fraction: f64) -> f32 {
    (f64::from(length) * fraction).round() as f32
}

pub struct CertificateRenderer {
    canvas: Canvas,
    signatures: Vec<SignatureBlock>,
}

impl CertificateRenderer {
    pub fn new(canvas: Canvas, signatures: Vec<SignatureBlock>) -> Self {
        Self { canvas, signatures }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Draws one certificate onto the shared canvas. Overflowing activity
    /// lists are not reflowed and may run into the footer text.
    pub async fn render(
        &mut self,
        assets: &AssetLoader,
        name: &str,
        activity_lines: &[String],
    ) -> Result<(), RenderError> {
        info!("Rendering certificate for {} ({} activities)", name, activity_lines.len());

        let g = Geometry::new(self.canvas.width(), self.canvas.height());
        let canvas = &mut self.canvas;

        canvas.clear();
        canvas.fill(BACKGROUND);

        let logo = assets.load(LOGO).await?;
        canvas.draw_image_fit(&logo, g.width * 0.5, g.height * 0.1, g.width * 0.2, g.height * 0.2);

        let regular = TextStyle {
            size: g.regular_size,
            weight: Weight::Regular,
            align: Align::Center,
            color: INK,
        };
        canvas.fill_text(HEADING, g.width / 2.0, g.base, regular);
        canvas.fill_text(
            name,
            g.width / 2.0,
            g.base + g.y_unit * 1.5,
            TextStyle {
                size: g.name_size,
                weight: Weight::Bold,
                ..regular
            },
        );
        canvas.fill_text(INTRO, g.width / 2.0, g.base + g.y_unit * 3.0, regular);

        let activity = TextStyle {
            weight: Weight::Bold,
            align: Align::Left,
            ..regular
        };
        for (i, title) in activity_lines.iter().enumerate() {
            let y = g.base + g.y_unit * 5.0 + g.y_unit * 2.0 * i as f32;
            draw_wrapped(canvas, title, g.column_left(), y, &g, activity);
        }

        draw_wrapped(canvas, VENUE, g.width / 2.0, g.base + g.y_unit * 11.0, &g, regular);
        draw_wrapped(
            canvas,
            VERIFY,
            g.width / 2.0,
            g.base + g.y_unit * 14.0,
            &g,
            TextStyle {
                size: g.small_size,
                ..regular
            },
        );

        let count = self.signatures.len();
        for (j, signature) in self.signatures.iter().enumerate() {
            let x = g.width * (j + 1) as f32 / (count + 1) as f32;
            let image = assets.load(&signature.asset).await?;
            canvas.draw_image_fit(&image, x, g.height * 0.88, g.width * 0.18, g.height * 0.1);
            canvas.fill_text(
                &signature.caption,
                x,
                g.height * 0.95,
                TextStyle {
                    size: g.small_size,
                    ..regular
                },
            );
        }

        Ok(())
    }
}

fn draw_wrapped(canvas: &mut Canvas, text: &str, x: f32, y: f32, g: &Geometry, style: TextStyle) {
    let lines = layout::layout(text, x, y, g.max_text_width, g.line_height, |s| {
        canvas.measure_text(s, style.size, style.weight)
    });
    for line in lines {
        canvas.fill_text(&line.text, line.x, line.y, style);
    }
}
