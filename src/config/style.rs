//! Card style configuration.
//!
//! The YAML form of [`StyleConfig`](crate::compositor::StyleConfig). Every
//! field is optional; omitted fields fall back to the deployed card's values.
//!
//! ```yaml
//! style:
//!   base_image: "assets/card.png"
//!   font: "assets/fonts/DejaVuSans-Bold.ttf"
//!   font_size: 100
//!   color: "#ff5757"
//!   angle: 4
//!   anchor: { x: 1140, y: 625 }
//!   box: { width: 5000, height: 300 }
//!   padding: 20
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::compositor::{parse_hex_color, BoxSize, PlacementPosition, StyleConfig};
use crate::constants::{
    DEFAULT_ANCHOR_X, DEFAULT_ANCHOR_Y, DEFAULT_ANGLE_DEGREES, DEFAULT_BASE_IMAGE_PATH,
    DEFAULT_BOX_HEIGHT, DEFAULT_BOX_WIDTH, DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE,
    DEFAULT_LAYER_PADDING, DEFAULT_TEXT_COLOR,
};

use super::ConfigError;

fn default_base_image() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_IMAGE_PATH)
}

fn default_font() -> PathBuf {
    PathBuf::from(DEFAULT_FONT_PATH)
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn default_color() -> String {
    DEFAULT_TEXT_COLOR.to_string()
}

fn default_angle() -> f32 {
    DEFAULT_ANGLE_DEGREES
}

fn default_padding() -> u32 {
    DEFAULT_LAYER_PADDING
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnchorConfig {
    pub x: i32,
    pub y: i32,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            x: DEFAULT_ANCHOR_X,
            y: DEFAULT_ANCHOR_Y,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoxConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOX_WIDTH,
            height: DEFAULT_BOX_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSection {
    #[serde(default = "default_base_image")]
    pub base_image: PathBuf,
    #[serde(default = "default_font")]
    pub font: PathBuf,
    /// Font size in pixels per em
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Hex color, #RGB or #RRGGBB
    #[serde(default = "default_color")]
    pub color: String,
    /// Degrees, counter-clockwise positive
    #[serde(default = "default_angle")]
    pub angle: f32,
    #[serde(default)]
    pub anchor: AnchorConfig,
    #[serde(default, rename = "box")]
    pub min_box: BoxConfig,
    #[serde(default = "default_padding")]
    pub padding: u32,
}

impl Default for StyleSection {
    fn default() -> Self {
        Self {
            base_image: default_base_image(),
            font: default_font(),
            font_size: default_font_size(),
            color: default_color(),
            angle: default_angle(),
            anchor: AnchorConfig::default(),
            min_box: BoxConfig::default(),
            padding: default_padding(),
        }
    }
}

impl StyleSection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "style.font_size must be a positive number, got {}",
                self.font_size
            )));
        }

        if !self.angle.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "style.angle must be a finite number, got {}",
                self.angle
            )));
        }

        parse_hex_color(&self.color)
            .map_err(|e| ConfigError::Invalid(format!("style.color: {}", e)))?;

        Ok(())
    }

    /// Convert into the compositor's runtime style.
    pub fn to_style_config(&self) -> Result<StyleConfig, ConfigError> {
        self.validate()?;
        let color = parse_hex_color(&self.color)
            .map_err(|e| ConfigError::Invalid(format!("style.color: {}", e)))?;

        Ok(StyleConfig {
            base_image: self.base_image.clone(),
            font: self.font.clone(),
            font_size: self.font_size,
            color,
            angle_degrees: self.angle,
            anchor: PlacementPosition::new(self.anchor.x, self.anchor.y),
            min_box: BoxSize {
                width: self.min_box.width,
                height: self.min_box.height,
            },
            padding: self.padding,
        })
    }
}
