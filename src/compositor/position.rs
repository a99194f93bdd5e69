//! Placement geometry.
//!
//! The compositor positions layers by their center: given the anchor point on
//! the base image and the size of the (rotated) layer, compute the top-left
//! corner where the layer must be pasted.
//!
//! ```
//! use greetcard::compositor::position::{centered_origin, PlacementPosition};
//!
//! let origin = centered_origin(PlacementPosition::new(1140, 625), 5233, 5233);
//! assert_eq!(origin, PlacementPosition::new(1140 - 2616, 625 - 2616));
//! ```

/// A pixel position on the base image. May be negative: layers larger than
/// the base image start off-canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementPosition {
    pub x: i32,
    pub y: i32,
}

impl PlacementPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in layer pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Top-left corner that puts the center of a `width` x `height` layer on
/// `anchor`. Half sizes use integer floor division.
pub fn centered_origin(anchor: PlacementPosition, width: u32, height: u32) -> PlacementPosition {
    let half_w = (width / 2) as i64;
    let half_h = (height / 2) as i64;
    PlacementPosition::new(
        saturate(anchor.x as i64 - half_w),
        saturate(anchor.y as i64 - half_h),
    )
}

fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
