//! Layer rotation.
//!
//! Rotates a text layer about its own center. Positive angles turn the
//! content counter-clockwise as seen on screen. The output canvas is expanded
//! to the bounding box of the rotated corners so nothing is clipped, and its
//! center corresponds to the center of the input layer.
//!
//! Sampling is bilinear on premultiplied alpha, so the colored edges of
//! anti-aliased glyphs do not darken against the transparent background.
//! Only the destination region that can receive ink is resampled.

use image::{Rgba, RgbaImage};

use super::position::PixelRect;
use super::text_renderer::TextLayer;

/// Tolerance for trigonometric noise when sizing the output canvas, so that
/// multiples of 90 degrees keep exact integer dimensions.
const SIZE_EPSILON: f64 = 1e-6;

/// Size of the canvas that holds a `width` x `height` image rotated by `degrees`.
pub fn rotated_dimensions(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let (sin, cos) = (degrees as f64).to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin - SIZE_EPSILON).ceil().max(1.0);
    let new_h = (w * sin + h * cos - SIZE_EPSILON).ceil().max(1.0);

    (new_w as u32, new_h as u32)
}

/// Rotate `layer` about its center by `degrees` (counter-clockwise), expanding
/// the canvas as needed.
pub fn rotate_layer(layer: &TextLayer, degrees: f32) -> TextLayer {
    let (src_w, src_h) = layer.image.dimensions();
    let (dst_w, dst_h) = rotated_dimensions(src_w, src_h, degrees);
    let mut rotated = RgbaImage::new(dst_w, dst_h);

    let Some(ink) = layer.ink else {
        return TextLayer {
            image: rotated,
            ink: None,
        };
    };

    let (sin, cos) = (degrees as f64).to_radians().sin_cos();
    let src_cx = src_w as f64 / 2.0;
    let src_cy = src_h as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    // Forward-map the ink corners to find which destination pixels can be hit
    let corners = [
        (ink.x, ink.y),
        (ink.right(), ink.y),
        (ink.x, ink.bottom()),
        (ink.right(), ink.bottom()),
    ];
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (x, y) in corners {
        let rx = x as f64 - src_cx;
        let ry = y as f64 - src_cy;
        let tx = rx * cos + ry * sin + dst_cx;
        let ty = -rx * sin + ry * cos + dst_cy;
        min_x = min_x.min(tx);
        min_y = min_y.min(ty);
        max_x = max_x.max(tx);
        max_y = max_y.max(ty);
    }

    // Two pixels of slack cover the bilinear footprint
    let x0 = (min_x.floor() - 2.0).clamp(0.0, dst_w as f64) as u32;
    let y0 = (min_y.floor() - 2.0).clamp(0.0, dst_h as f64) as u32;
    let x1 = (max_x.ceil() + 2.0).clamp(0.0, dst_w as f64) as u32;
    let y1 = (max_y.ceil() + 2.0).clamp(0.0, dst_h as f64) as u32;

    // A non-finite angle leaves the bounds inverted: nothing to sample
    let (x1, y1) = (x1.max(x0), y1.max(y0));

    for dy in y0..y1 {
        for dx in x0..x1 {
            // Inverse rotation of the destination pixel center
            let rx = dx as f64 + 0.5 - dst_cx;
            let ry = dy as f64 + 0.5 - dst_cy;
            let sx = rx * cos - ry * sin + src_cx - 0.5;
            let sy = rx * sin + ry * cos + src_cy - 0.5;

            let pixel = sample_bilinear(&layer.image, sx, sy);
            if pixel[3] > 0 {
                rotated.put_pixel(dx, dy, pixel);
            }
        }
    }

    let region = PixelRect::new(x0, y0, x1 - x0, y1 - y0);
    TextLayer {
        image: rotated,
        ink: Some(region).filter(|r| !r.is_empty()),
    }
}

/// Bilinear sample at pixel-center coordinates `(x, y)`. Neighbors outside
/// the image count as transparent.
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let (width, height) = (image.width() as i64, image.height() as i64);
    let (fx0, fy0) = (x.floor(), y.floor());
    let (fx, fy) = (x - fx0, y - fy0);
    let (x0, y0) = (fx0 as i64, fy0 as i64);

    let taps = [
        (0, 0, (1.0 - fx) * (1.0 - fy)),
        (1, 0, fx * (1.0 - fy)),
        (0, 1, (1.0 - fx) * fy),
        (1, 1, fx * fy),
    ];

    // Premultiplied accumulators: r*a, g*a, b*a, a
    let mut acc = [0.0f64; 4];
    for (ox, oy, weight) in taps {
        if weight <= 0.0 {
            continue;
        }
        let (px, py) = (x0 + ox, y0 + oy);
        if px < 0 || py < 0 || px >= width || py >= height {
            continue;
        }

        let p = image.get_pixel(px as u32, py as u32);
        let alpha = p[3] as f64 * weight;
        if alpha == 0.0 {
            continue;
        }
        acc[0] += p[0] as f64 * alpha;
        acc[1] += p[1] as f64 * alpha;
        acc[2] += p[2] as f64 * alpha;
        acc[3] += alpha;
    }

    if acc[3] < 0.5 {
        return Rgba([0, 0, 0, 0]);
    }

    let unpremultiply = |c: f64| (c / acc[3]).round().clamp(0.0, 255.0) as u8;
    Rgba([
        unpremultiply(acc[0]),
        unpremultiply(acc[1]),
        unpremultiply(acc[2]),
        acc[3].round().min(255.0) as u8,
    ])
}
