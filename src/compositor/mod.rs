//! Text compositor: draws styled, rotated text onto the card background.
//!
//! This is the heart of the service. `compose` takes the user's text and the
//! deploy-time [`StyleConfig`] and returns a complete PNG, or an error. It never
//! returns a partial image and never mutates anything shared between calls.
//!
//! # Pipeline
//!
//! 1. Load the base image (RGBA) and the font, both fresh from disk
//! 2. Measure the tight bounding box of the text
//! 3. Size a square transparent layer that fits the text diagonal
//! 4. Draw the text centered in that layer
//! 5. Rotate the layer about its center, expanding the canvas
//! 6. Paste the rotated layer so its center lands on the anchor point
//! 7. Encode the result as PNG
//!
//! # Example
//!
//! ```ignore
//! use greetcard::compositor::{compose, StyleConfig};
//!
//! let style = StyleConfig::new("assets/card.png", "assets/fonts/DejaVuSans-Bold.ttf");
//! let png = compose("Anna", &style)?;
//! ```

pub mod assets;
pub mod blend;
pub mod encoder;
pub mod error;
pub mod position;
pub mod rotate;
pub mod style;
pub mod text_renderer;

use std::sync::Arc;

pub use error::CompositionError;
pub use position::{centered_origin, PixelRect, PlacementPosition};
pub use style::{parse_hex_color, BoxSize, Color, ColorParseError, StyleConfig};
pub use text_renderer::{layer_side, layout_text, measure_text, TextBounds, TextLayer};

use crate::constants::MAX_LAYER_SIDE;

/// Compose `text` onto the base image described by `style`, returning PNG bytes.
///
/// Empty or whitespace-only text is not rejected here; it produces the base
/// image unchanged.
pub fn compose(text: &str, style: &StyleConfig) -> Result<Vec<u8>, CompositionError> {
    if !style.angle_degrees.is_finite() {
        return Err(CompositionError::rendering(format!(
            "rotation angle must be a finite number, got {}",
            style.angle_degrees
        )));
    }

    let mut base = assets::load_base_image(&style.base_image)?;
    let font = assets::load_font(&style.font)?;
    let scale = assets::em_scale(&font, style.font_size)?;

    let layout = layout_text(&font, scale, text);
    let bounds = layout.bounds();

    let side = layer_side(&bounds, style.min_box, style.padding);
    if side > MAX_LAYER_SIDE {
        return Err(CompositionError::rendering(format!(
            "text layer of {}px exceeds the {}px limit",
            side, MAX_LAYER_SIDE
        )));
    }

    let layer = text_renderer::render_layer(&layout, side, style.color);
    let rotated = rotate::rotate_layer(&layer, style.angle_degrees);
    drop(layer);

    let origin = centered_origin(style.anchor, rotated.image.width(), rotated.image.height());
    blend::paste_over(&mut base, &rotated, origin);

    tracing::debug!(
        text_width = bounds.width,
        text_height = bounds.height,
        layer_side = side,
        rotated_width = rotated.image.width(),
        rotated_height = rotated.image.height(),
        paste_x = origin.x,
        paste_y = origin.y,
        "Composed text layer"
    );

    encoder::encode_png(&base)
}

/// Renders a card for a piece of text.
///
/// The request handler only depends on this trait, so it can be exercised
/// without touching the filesystem.
#[cfg_attr(test, mockall::automock)]
pub trait CardRenderer: Send + Sync {
    fn render(&self, text: &str) -> Result<Vec<u8>, CompositionError>;
}

/// The production renderer: runs [`compose`] with a shared, immutable style.
#[derive(Debug, Clone)]
pub struct Compositor {
    style: Arc<StyleConfig>,
}

impl Compositor {
    pub fn new(style: Arc<StyleConfig>) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

impl CardRenderer for Compositor {
    fn render(&self, text: &str) -> Result<Vec<u8>, CompositionError> {
        compose(text, &self.style)
    }
}
