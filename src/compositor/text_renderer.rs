//! Text measurement and layer rendering.
//!
//! Text is laid out once per composition: glyphs are positioned on a baseline
//! at the font ascent with kerning applied, then outlined. The union of the
//! outlined glyph pixel bounds is the tight bounding box of the text. The
//! same outlines are then drawn, centered, into a square transparent layer
//! big enough to survive any rotation.

use ab_glyph::{point, Font, GlyphId, OutlinedGlyph, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

use super::position::PixelRect;
use super::style::{BoxSize, Color};

/// Tight bounding box of laid out text, relative to the layout origin.
///
/// `min_x`/`min_y` are usually positive: the top of the ink sits below the
/// ascent line and the first glyph may have a left side bearing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub width: u32,
    pub height: u32,
}

impl TextBounds {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Outlined glyphs plus their combined bounds.
pub struct TextLayout {
    glyphs: Vec<OutlinedGlyph>,
    bounds: TextBounds,
}

impl TextLayout {
    pub fn bounds(&self) -> TextBounds {
        self.bounds
    }

    /// Number of glyphs with a visible outline.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

/// A transparent working layer with text drawn on it.
pub struct TextLayer {
    pub image: RgbaImage,
    /// Region that may contain non-transparent pixels. `None` for a blank layer.
    pub ink: Option<PixelRect>,
}

impl std::fmt::Debug for TextLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayer")
            .field("dimensions", &(self.image.width(), self.image.height()))
            .field("ink", &self.ink)
            .finish()
    }
}

/// Lay out `text` in a single line and compute its tight bounding box.
///
/// Control characters are skipped. Characters missing from the font are
/// drawn with whatever the font maps them to (usually `.notdef`). Text
/// without any visible outline (empty, whitespace) yields empty bounds.
pub fn layout_text<F: Font>(font: &F, scale: PxScale, text: &str) -> TextLayout {
    let scaled_font = font.as_scaled(scale);
    let baseline_y = scaled_font.ascent();

    let mut glyphs = Vec::new();
    let mut cursor_x = 0.0f32;
    let mut prev_glyph: Option<GlyphId> = None;

    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);

    for c in text.chars().filter(|c| !c.is_control()) {
        let glyph_id = scaled_font.glyph_id(c);

        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y));
        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            min_x = min_x.min(bounds.min.x);
            min_y = min_y.min(bounds.min.y);
            max_x = max_x.max(bounds.max.x);
            max_y = max_y.max(bounds.max.y);
            glyphs.push(outlined);
        }
    }

    let bounds = if glyphs.is_empty() {
        TextBounds::default()
    } else {
        // px_bounds are already snapped to whole pixels
        TextBounds {
            min_x: min_x as i32,
            min_y: min_y as i32,
            width: (max_x - min_x).max(0.0) as u32,
            height: (max_y - min_y).max(0.0) as u32,
        }
    };

    TextLayout { glyphs, bounds }
}

/// Measure the tight bounding box of `text`.
pub fn measure_text<F: Font>(font: &F, scale: PxScale, text: &str) -> TextBounds {
    layout_text(font, scale, text).bounds()
}

/// Side length of the square working layer for text with the given bounds.
///
/// The layer must hold the text diagonal at any rotation, plus padding, and
/// is never smaller than the configured minimum box.
pub fn layer_side(bounds: &TextBounds, min_box: BoxSize, padding: u32) -> u32 {
    let w = bounds.width as f64;
    let h = bounds.height as f64;
    let diagonal = (w * w + h * h).sqrt().ceil() as u32;

    diagonal
        .saturating_add(padding)
        .max(min_box.width)
        .max(min_box.height)
        .max(1)
}

/// Draw the laid out text into a fresh `side` x `side` transparent layer.
///
/// The top-left of the ink box lands on `(side/2 - w/2, side/2 - h/2)`.
pub fn render_layer(layout: &TextLayout, side: u32, color: Color) -> TextLayer {
    let mut image = RgbaImage::new(side, side);
    let bounds = layout.bounds;

    let origin_x = (side / 2) as i64 - (bounds.width / 2) as i64;
    let origin_y = (side / 2) as i64 - (bounds.height / 2) as i64;
    let shift_x = origin_x - bounds.min_x as i64;
    let shift_y = origin_y - bounds.min_y as i64;
    let limit = side as i64;

    for glyph in &layout.glyphs {
        let glyph_bounds = glyph.px_bounds();
        let glyph_x = glyph_bounds.min.x as i64 + shift_x;
        let glyph_y = glyph_bounds.min.y as i64 + shift_y;

        glyph.draw(|x, y, coverage| {
            let px = glyph_x + x as i64;
            let py = glyph_y + y as i64;
            if px < 0 || py < 0 || px >= limit || py >= limit {
                return;
            }

            let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u32;
            if alpha == 0 {
                return;
            }

            // Same color everywhere, so overlapping glyphs only combine alpha
            let pixel = image.get_pixel_mut(px as u32, py as u32);
            let existing = pixel[3] as u32;
            let combined = alpha + existing * (255 - alpha) / 255;
            *pixel = Rgba([color.r, color.g, color.b, combined.min(255) as u8]);
        });
    }

    let ink = if bounds.is_empty() {
        None
    } else {
        let x0 = origin_x.clamp(0, limit);
        let y0 = origin_y.clamp(0, limit);
        let x1 = (origin_x + bounds.width as i64).clamp(0, limit);
        let y1 = (origin_y + bounds.height as i64).clamp(0, limit);
        Some(PixelRect::new(
            x0 as u32,
            y0 as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        ))
        .filter(|rect| !rect.is_empty())
    };

    TextLayer { image, ink }
}
