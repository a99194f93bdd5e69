// Constants module - centralized default values for configuration
//
// The style defaults reproduce the deployed greeting card. Everything here can
// be overridden from the YAML configuration.

// =============================================================================
// Server defaults
// =============================================================================

/// Default number of worker threads
pub const DEFAULT_THREADS: usize = 4;

/// Default maximum request body size (16 KB, a form post carries one short field)
pub const DEFAULT_MAX_BODY_SIZE: usize = 16 * 1024;

// =============================================================================
// Style defaults
// =============================================================================

/// Default background image path
pub const DEFAULT_BASE_IMAGE_PATH: &str = "assets/card.png";

/// Default font path
pub const DEFAULT_FONT_PATH: &str = "assets/fonts/DejaVuSans-Bold.ttf";

/// Default font size in pixels per em
pub const DEFAULT_FONT_SIZE: f32 = 100.0;

/// Default fill color
pub const DEFAULT_TEXT_COLOR: &str = "#ff5757";

/// Default rotation in degrees, counter-clockwise positive
pub const DEFAULT_ANGLE_DEGREES: f32 = 4.0;

/// Default anchor point (center of the text area on the base image)
pub const DEFAULT_ANCHOR_X: i32 = 1140;
pub const DEFAULT_ANCHOR_Y: i32 = 625;

/// Default minimum working layer box
pub const DEFAULT_BOX_WIDTH: u32 = 5000;
pub const DEFAULT_BOX_HEIGHT: u32 = 300;

/// Padding added to the text diagonal when sizing the working layer
pub const DEFAULT_LAYER_PADDING: u32 = 20;

/// Upper bound for the working layer side; larger layers are refused instead
/// of allocated
pub const MAX_LAYER_SIDE: u32 = 10_000;

// =============================================================================
// User-facing messages
// =============================================================================

/// Shown when the submitted text is empty or whitespace-only
pub const MSG_EMPTY_TEXT: &str = "please enter a name or message";

/// Shown for any composition failure; internal causes are only logged
pub const MSG_GENERIC_FAILURE: &str =
    "sorry, the image could not be created, please try again later";

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";
