//! Alpha compositing of a layer onto the base image.
//!
//! The layer's own alpha channel is the blend mask: transparent layer pixels
//! leave the base untouched, opaque ones replace it, everything in between is
//! blended with the Porter-Duff "over" operator. Parts of the layer that fall
//! outside the base image are clipped.

use image::{Rgba, RgbaImage};

use super::position::PlacementPosition;
use super::text_renderer::TextLayer;

/// Composite `layer` onto `target` with the layer's top-left corner at `origin`.
pub fn paste_over(target: &mut RgbaImage, layer: &TextLayer, origin: PlacementPosition) {
    let Some(ink) = layer.ink else {
        return;
    };

    let target_width = target.width() as i64;
    let target_height = target.height() as i64;

    // Ink region in target coordinates, clamped to target bounds
    let left = origin.x as i64 + ink.x as i64;
    let top = origin.y as i64 + ink.y as i64;
    let x_start = left.max(0);
    let y_start = top.max(0);
    let x_end = (left + ink.width as i64).min(target_width);
    let y_end = (top + ink.height as i64).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let lx = (tx - origin.x as i64) as u32;
            let ly = (ty - origin.y as i64) as u32;

            let fg = layer.image.get_pixel(lx, ly);
            match fg[3] {
                0 => {}
                255 => target.put_pixel(tx as u32, ty as u32, *fg),
                _ => {
                    let bg = target.get_pixel(tx as u32, ty as u32);
                    let blended = blend_pixels(*bg, *fg);
                    target.put_pixel(tx as u32, ty as u32, blended);
                }
            }
        }
    }
}

/// Porter-Duff "over": result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);
    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
