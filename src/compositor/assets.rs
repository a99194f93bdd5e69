//! Asset loading.
//!
//! The background image and the font are read from disk on every call. No
//! copy is cached between requests, so every composition starts from a
//! pristine base image.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale};
use image::RgbaImage;

use super::CompositionError;

/// Load the background image as an RGBA pixel buffer.
pub fn load_base_image(path: &Path) -> Result<RgbaImage, CompositionError> {
    let image =
        image::open(path).map_err(|e| CompositionError::missing_base_image(path, e))?;
    Ok(image.to_rgba8())
}

/// Load a TrueType/OpenType font from disk.
///
/// There is no fallback font: a missing or corrupt file is an error.
pub fn load_font(path: &Path) -> Result<FontVec, CompositionError> {
    let data = std::fs::read(path).map_err(|e| CompositionError::missing_font(path, e))?;
    FontVec::try_from_vec(data).map_err(|e| CompositionError::missing_font(path, e))
}

/// Load both assets once and discard them, to report problems at startup.
pub fn check_assets(base_image: &Path, font: &Path) -> Result<(u32, u32), CompositionError> {
    let image = load_base_image(base_image)?;
    load_font(font)?;
    Ok(image.dimensions())
}

/// Scale at which one em of `font` spans `font_size` pixels.
///
/// ab_glyph scales by ascent-to-descent height, so the em size has to be
/// converted through the font's own metrics.
pub fn em_scale<F: Font>(font: &F, font_size: f32) -> Result<PxScale, CompositionError> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(CompositionError::rendering(format!(
            "font size must be a positive number, got {}",
            font_size
        )));
    }

    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    let height = font.height_unscaled();
    if units_per_em <= 0.0 || height <= 0.0 {
        return Ok(PxScale::from(font_size));
    }

    Ok(PxScale::from(font_size * height / units_per_em))
}
