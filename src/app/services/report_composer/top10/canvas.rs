//! Raster canvas for the Top 10 image

use image::imageops::FilterType;
use tiny_skia::{
    Color, ColorU8, FillRule, IntSize, Paint, Pixmap, PixmapPaint, Rect, Transform,
};

use super::font::FontFace;
use super::text_fit::TextMeasure;
use crate::{Error, Result};

pub const WHITE: Color = Color::WHITE;
pub const BLACK: Color = Color::BLACK;

/// Brand title color
pub fn brand_orange() -> Color {
    Color::from_rgba8(0xFF, 0x5A, 0x1F, 0xFF)
}

/// Column header band color
pub fn band_orange() -> Color {
    Color::from_rgba8(0xEA, 0x58, 0x0C, 0xFF)
}

/// Horizontal anchoring of drawn text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Text starts at the anchor
    Left,
    /// Text is centered on the anchor
    Center,
}

/// Face, size, color and anchoring of one piece of text
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub face: &'a FontFace,
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

/// A decoded logo, scaled to its square slot
#[derive(Debug, Clone)]
pub struct LogoImage {
    pixmap: Pixmap,
}

impl LogoImage {
    /// Decode PNG or JPEG bytes and stretch them to `size` x `size`
    pub fn decode(reference: &str, bytes: &[u8], size: u32) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| Error::logo_load(reference, e.to_string()))?;
        let rgba = decoded
            .resize_exact(size, size, FilterType::Triangle)
            .to_rgba8();

        // tiny-skia stores premultiplied alpha
        let mut data = rgba.into_raw();
        for pixel in data.chunks_exact_mut(4) {
            let color = ColorU8::from_rgba(pixel[0], pixel[1], pixel[2], pixel[3]).premultiply();
            pixel.copy_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }

        let pixmap = IntSize::from_wh(size, size)
            .and_then(|int_size| Pixmap::from_vec(data, int_size))
            .ok_or_else(|| Error::logo_load(reference, "logo has an invalid size"))?;

        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

/// Drawing surface with a white background
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| Error::render(format!("Invalid canvas size {}x{}", width, height)))?;
        pixmap.fill(WHITE);
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) -> Result<()> {
        let rect = Rect::from_xywh(x, y, width, height)
            .ok_or_else(|| Error::render(format!("Invalid rectangle at ({}, {})", x, y)))?;
        self.pixmap
            .fill_rect(rect, &solid_paint(color), Transform::identity(), None);
        Ok(())
    }

    /// Draw a logo with its top-left corner at `(x, y)`
    pub fn draw_logo(&mut self, logo: &LogoImage, x: f32, y: f32) {
        self.pixmap.draw_pixmap(
            x as i32,
            y as i32,
            logo.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Draw one line of text on a baseline
    pub fn draw_text(&mut self, text: &str, anchor_x: f32, baseline: f32, style: TextStyle<'_>) {
        let start_x = match style.align {
            Align::Left => anchor_x,
            Align::Center => anchor_x - style.face.measure(text, style.size) / 2.0,
        };

        if let Some(path) = style.face.outline_text(text, style.size) {
            self.pixmap.fill_path(
                &path,
                &solid_paint(style.color),
                FillRule::Winding,
                Transform::from_translate(start_x, baseline),
                None,
            );
        }
    }

    /// Encode the canvas as PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| Error::render(format!("PNG encoding failed: {}", e)))
    }
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}
