//! PNG encoding into an in-memory buffer.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder as _, RgbaImage};

use super::CompositionError;

/// Encode an RGBA image as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CompositionError> {
    let mut output = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut output);

    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ColorType::Rgba8,
        )
        .map_err(|e| CompositionError::rendering_caused_by("png encoding failed", e))?;

    Ok(output.into_inner())
}
