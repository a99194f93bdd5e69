//! Card styling.
//!
//! `StyleConfig` is built once at startup from the YAML configuration and
//! shared read-only by every request. It carries everything the compositor
//! needs: asset paths, font size, fill color, rotation and placement.

use std::path::PathBuf;

use crate::constants::{
    DEFAULT_ANCHOR_X, DEFAULT_ANCHOR_Y, DEFAULT_ANGLE_DEGREES, DEFAULT_BASE_IMAGE_PATH,
    DEFAULT_BOX_HEIGHT, DEFAULT_BOX_WIDTH, DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE,
    DEFAULT_LAYER_PADDING,
};

use super::position::PlacementPosition;

/// RGB fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Errors from [`parse_hex_color`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color must start with '#'")]
    MissingHash,

    #[error("color must be #RGB or #RRGGBB format, got {0} characters")]
    BadLength(usize),

    #[error("invalid hex digit in color '{0}'")]
    BadDigit(String),
}

/// Parse a hex color string into RGB components.
///
/// Supports both #RGB and #RRGGBB formats, case-insensitive.
///
/// ```
/// use greetcard::compositor::{parse_hex_color, Color};
///
/// assert_eq!(parse_hex_color("#ff5757").unwrap(), Color::new(255, 87, 87));
/// assert_eq!(parse_hex_color("#FFF").unwrap(), Color::new(255, 255, 255));
/// ```
pub fn parse_hex_color(hex: &str) -> Result<Color, ColorParseError> {
    let digits = hex
        .trim()
        .strip_prefix('#')
        .ok_or(ColorParseError::MissingHash)?;

    // Non-ASCII input would make the byte slicing below land mid-character.
    if !digits.is_ascii() {
        return Err(ColorParseError::BadDigit(hex.to_string()));
    }

    let channel = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| ColorParseError::BadDigit(hex.to_string()))
    };

    match digits.len() {
        3 => {
            // 0xF -> 0xFF, 0xA -> 0xAA
            let r = channel(&digits[0..1])?;
            let g = channel(&digits[1..2])?;
            let b = channel(&digits[2..3])?;
            Ok(Color::new(r * 17, g * 17, b * 17))
        }
        6 => Ok(Color::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        n => Err(ColorParseError::BadLength(n)),
    }
}

/// Minimum size of the square working layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxSize {
    pub width: u32,
    pub height: u32,
}

/// Immutable styling for every composed card.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Background image the text is drawn onto.
    pub base_image: PathBuf,
    /// TrueType/OpenType font file.
    pub font: PathBuf,
    /// Font size in pixels per em.
    pub font_size: f32,
    /// Text fill color.
    pub color: Color,
    /// Rotation in degrees, counter-clockwise positive.
    pub angle_degrees: f32,
    /// Where the center of the rotated text layer lands on the base image.
    pub anchor: PlacementPosition,
    /// Lower bound for the working layer side.
    pub min_box: BoxSize,
    /// Added to the text diagonal when sizing the working layer.
    pub padding: u32,
}

impl StyleConfig {
    /// Default styling with the given asset paths.
    pub fn new(base_image: impl Into<PathBuf>, font: impl Into<PathBuf>) -> Self {
        Self {
            base_image: base_image.into(),
            font: font.into(),
            ..Self::default()
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            base_image: PathBuf::from(DEFAULT_BASE_IMAGE_PATH),
            font: PathBuf::from(DEFAULT_FONT_PATH),
            font_size: DEFAULT_FONT_SIZE,
            color: Color::new(0xff, 0x57, 0x57),
            angle_degrees: DEFAULT_ANGLE_DEGREES,
            anchor: PlacementPosition::new(DEFAULT_ANCHOR_X, DEFAULT_ANCHOR_Y),
            min_box: BoxSize {
                width: DEFAULT_BOX_WIDTH,
                height: DEFAULT_BOX_HEIGHT,
            },
            padding: DEFAULT_LAYER_PADDING,
        }
    }
}
