//! Font discovery and glyph outlines
//!
//! Faces are looked up in the system font database and their bytes copied out,
//! so a [`FontSet`] can be loaded once and shared by every render. Text is
//! drawn from glyph outlines without shaping: one glyph per character,
//! advanced by its horizontal metric.

use tiny_skia::{Path, PathBuilder};
use tracing::debug;

use super::text_fit::TextMeasure;
use crate::{Error, Result};

/// Families tried, in order, when no preferred family is configured or found
const FALLBACK_FAMILIES: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "FreeSans",
];

/// One loaded font face
#[derive(Clone)]
pub struct FontFace {
    data: Vec<u8>,
    index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontFace {
    /// Wrap raw font file bytes, checking that they parse
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self> {
        ttf_parser::Face::parse(&data, index)
            .map_err(|e| Error::font(format!("Invalid font data: {}", e)))?;
        Ok(Self { data, index })
    }

    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }

    /// Glyph outlines of a whole line of text, origin at the start of the
    /// baseline; `None` when nothing visible would be drawn
    pub fn outline_text(&self, text: &str, font_size: f32) -> Option<Path> {
        let face = self.face()?;
        let scale = font_size / f32::from(face.units_per_em());

        let mut outline = GlyphOutline {
            builder: PathBuilder::new(),
            scale,
            offset_x: 0.0,
        };

        for c in text.chars() {
            let glyph = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
            face.outline_glyph(glyph, &mut outline);
            outline.offset_x += advance(&face, glyph) * scale;
        }

        outline.builder.finish()
    }
}

impl TextMeasure for FontFace {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        let Some(face) = self.face() else {
            return 0.0;
        };
        let scale = font_size / f32::from(face.units_per_em());
        text.chars()
            .map(|c| {
                let glyph = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
                advance(&face, glyph) * scale
            })
            .sum()
    }
}

fn advance(face: &ttf_parser::Face<'_>, glyph: ttf_parser::GlyphId) -> f32 {
    face.glyph_hor_advance(glyph).map(f32::from).unwrap_or(0.0)
}

/// Converts ttf-parser outlines into a tiny-skia path, flipping the y axis
struct GlyphOutline {
    builder: PathBuilder,
    scale: f32,
    offset_x: f32,
}

impl GlyphOutline {
    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.offset_x + x * self.scale, -y * self.scale)
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Regular and bold faces of one family
#[derive(Debug, Clone)]
pub struct FontSet {
    pub regular: FontFace,
    pub bold: FontFace,
}

impl FontSet {
    /// Load faces from the fonts installed on this system
    pub fn load_system(preferred_family: Option<&str>) -> Result<Self> {
        let mut database = fontdb::Database::new();
        database.load_system_fonts();
        debug!("Font database holds {} faces", database.len());
        Self::from_database(&database, preferred_family)
    }

    /// Load faces from an existing font database
    pub fn from_database(database: &fontdb::Database, preferred_family: Option<&str>) -> Result<Self> {
        Ok(Self {
            regular: find_face(database, preferred_family, fontdb::Weight::NORMAL)?,
            bold: find_face(database, preferred_family, fontdb::Weight::BOLD)?,
        })
    }

    /// Face for the requested weight
    pub fn face(&self, bold: bool) -> &FontFace {
        if bold { &self.bold } else { &self.regular }
    }
}

fn find_face(
    database: &fontdb::Database,
    preferred_family: Option<&str>,
    weight: fontdb::Weight,
) -> Result<FontFace> {
    let mut families: Vec<fontdb::Family<'_>> = Vec::new();
    if let Some(family) = preferred_family {
        families.push(fontdb::Family::Name(family));
    }
    families.push(fontdb::Family::SansSerif);
    families.extend(FALLBACK_FAMILIES.iter().map(|name| fontdb::Family::Name(name)));

    let query = fontdb::Query {
        families: &families,
        weight,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };

    // Any installed face beats no text at all
    let id = database
        .query(&query)
        .or_else(|| database.faces().next().map(|face| face.id))
        .ok_or_else(|| Error::font("No fonts are installed on this system"))?;

    let (data, index) = database
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| Error::font("Font file could not be read"))?;

    FontFace::from_bytes(data, index)
}
