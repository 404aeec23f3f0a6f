// Font discovery shared by the rasterizer and the PDF writer.
// Both need real font files: rusttype for glyph outlines, genpdf for metrics.
use genpdf::fonts::{FontData, FontFamily};
use rusttype::Font;
use std::path::{Path, PathBuf};
use tracing::info;

const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-serif",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/truetype/noto",
    "/usr/share/fonts/noto",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu-serif-fonts",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/System/Library/Fonts/Supplemental",
    "/Library/Fonts",
];

/// Regular and bold file names of each serif family, in order of preference.
const SERIF_FAMILIES: &[(&str, &str, &str)] = &[
    ("LiberationSerif", "LiberationSerif-Regular.ttf", "LiberationSerif-Bold.ttf"),
    ("NotoSerif", "NotoSerif-Regular.ttf", "NotoSerif-Bold.ttf"),
    ("Tinos", "Tinos-Regular.ttf", "Tinos-Bold.ttf"),
    ("DejaVuSerif", "DejaVuSerif.ttf", "DejaVuSerif-Bold.ttf"),
];

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error(
        "no serif font family found (looked for Liberation Serif, Noto Serif, Tinos and DejaVu Serif \
         in FONT_DIR and the system font paths); install one with `apt install fonts-liberation` \
         or point FONT_DIR at a directory holding the regular and bold faces"
    )]
    NotFound,
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("font file {0} is not a usable TrueType font")]
    Invalid(PathBuf),
    #[error("font family rejected by the PDF writer: {0}")]
    Pdf(#[from] genpdf::error::Error),
}

/// Regular and bold faces of one serif family.
#[derive(Debug, Clone)]
pub struct FontSource {
    pub family: String,
    pub regular: PathBuf,
    pub bold: PathBuf,
}

/// The two weights the certificate is drawn with.
pub struct RasterFonts {
    pub regular: Font<'static>,
    pub bold: Font<'static>,
}

impl FontSource {
    /// Looks in `override_dir` first, then in the usual system font paths.
    pub fn discover(override_dir: Option<&Path>) -> Result<Self, FontError> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        if let Some(dir) = override_dir {
            dirs.push(dir.to_path_buf());
        }
        dirs.extend(FONT_PATHS.iter().map(PathBuf::from));

        let source = dirs
            .iter()
            .filter(|dir| dir.exists())
            .find_map(|dir| find_family(dir))
            .ok_or(FontError::NotFound)?;

        info!("Using font family {} from {}", source.family, source.regular.display());
        Ok(source)
    }

    pub fn raster_fonts(&self) -> Result<RasterFonts, FontError> {
        Ok(RasterFonts {
            regular: load_raster(&self.regular)?,
            bold: load_raster(&self.bold)?,
        })
    }

    pub fn pdf_family(&self) -> Result<FontFamily<FontData>, FontError> {
        // The PDF holds no text, so builtin Times faces are referenced
        // instead of embedding the files.
        let regular = FontData::new(
            read(&self.regular)?,
            Some(printpdf::BuiltinFont::TimesRoman),
        )?;
        let bold = FontData::new(read(&self.bold)?, Some(printpdf::BuiltinFont::TimesBold))?;
        Ok(FontFamily {
            italic: regular.clone(),
            bold_italic: bold.clone(),
            regular,
            bold,
        })
    }
}

fn find_family(dir: &Path) -> Option<FontSource> {
    SERIF_FAMILIES.iter().find_map(|(family, regular, bold)| {
        let (regular, bold) = (dir.join(regular), dir.join(bold));
        (regular.is_file() && bold.is_file()).then(|| FontSource {
            family: family.to_string(),
            regular,
            bold,
        })
    })
}

fn read(path: &Path) -> Result<Vec<u8>, FontError> {
    std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_raster(path: &Path) -> Result<Font<'static>, FontError> {
    Font::try_from_vec(read(path)?).ok_or_else(|| FontError::Invalid(path.to_path_buf()))
}

/// DejaVu Serif regular and bold, shipped with the tests.
#[cfg(test)]
pub(crate) fn fixture_fonts() -> FontSource {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts");
    find_family(&dir)
        .expect("tests/fixtures/fonts must hold DejaVuSerif.ttf and DejaVuSerif-Bold.ttf")
}
