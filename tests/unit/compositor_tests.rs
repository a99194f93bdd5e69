// Compositor tests against real fonts and images on disk

use std::path::{Path, PathBuf};

use greetcard::compositor::{
    compose, BoxSize, CardRenderer, CompositionError, Compositor, PlacementPosition, StyleConfig,
};
use image::{Rgba, RgbaImage};
use rstest::rstest;

const BACKGROUND: [u8; 4] = [250, 250, 250, 255];

fn asset(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn write_base(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join("base.png");
    RgbaImage::from_pixel(width, height, Rgba(BACKGROUND))
        .save(&path)
        .unwrap();
    path
}

fn test_style(base: PathBuf, anchor: PlacementPosition, angle: f32) -> StyleConfig {
    StyleConfig {
        base_image: base,
        font: asset("assets/fonts/DejaVuSans.ttf"),
        font_size: 40.0,
        angle_degrees: angle,
        anchor,
        min_box: BoxSize {
            width: 60,
            height: 20,
        },
        padding: 4,
        ..StyleConfig::default()
    }
}

fn decode(png: &[u8]) -> RgbaImage {
    image::load_from_memory(png).unwrap().to_rgba8()
}

/// Bounding box (min_x, min_y, max_x, max_y) of pixels that differ between two images
fn changed_bounds(before: &RgbaImage, after: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in after.enumerate_pixels() {
        if pixel != before.get_pixel(x, y) {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}

fn center_of(bounds: (u32, u32, u32, u32)) -> (f32, f32) {
    let (x0, y0, x1, y1) = bounds;
    ((x0 + x1) as f32 / 2.0, (y0 + y1) as f32 / 2.0)
}

#[test]
fn test_output_has_base_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_base(dir.path(), 321, 123);
    let style = test_style(base, PlacementPosition::new(160, 60), 4.0);

    for text in ["A", "Anna", "Happy Birthday!", "Zoë ∞"] {
        let card = decode(&compose(text, &style).unwrap());
        assert_eq!(card.dimensions(), (321, 123), "text {:?}", text);
    }
}

#[test]
fn test_same_input_gives_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_base(dir.path(), 300, 200);
    let style = test_style(base, PlacementPosition::new(150, 100), 4.0);

    let first = compose("Anna", &style).unwrap();
    let second = compose("Anna", &style).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_font_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_base(dir.path(), 100, 100);
    let mut style = test_style(base, PlacementPosition::new(50, 50), 0.0);
    style.font = dir.path().join("missing.ttf");

    let err = compose("Anna", &style).unwrap_err();
    assert_eq!(err.kind(), "missing_font");
}

#[test]
fn test_missing_base_image_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let style = test_style(
        dir.path().join("missing.png"),
        PlacementPosition::new(50, 50),
        0.0,
    );

    let err = compose("Anna", &style).unwrap_err();
    assert!(matches!(err, CompositionError::MissingBaseImage { .. }));
}

#[rstest]
#[case(0.0)]
#[case(4.0)]
#[case(-30.0)]
#[case(45.0)]
#[case(90.0)]
#[case(180.0)]
fn test_text_stays_centered_on_anchor(#[case] angle: f32) {
    let dir = tempfile::tempdir().unwrap();
    let base_path = write_base(dir.path(), 400, 300);
    let style = test_style(base_path, PlacementPosition::new(200, 150), angle);

    let base = RgbaImage::from_pixel(400, 300, Rgba(BACKGROUND));
    let card = decode(&compose("HHHH", &style).unwrap());
    let bounds = changed_bounds(&base, &card).expect("text should change some pixels");

    let (cx, cy) = center_of(bounds);
    assert!((cx - 200.0).abs() <= 4.0, "angle {}: center x {}", angle, cx);
    assert!((cy - 150.0).abs() <= 4.0, "angle {}: center y {}", angle, cy);
}

#[test]
fn test_positive_angle_tilts_text_upward_to_the_right() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = write_base(dir.path(), 600, 300);
    let style = test_style(base_path, PlacementPosition::new(300, 150), 10.0);

    let base = RgbaImage::from_pixel(600, 300, Rgba(BACKGROUND));
    let card = decode(&compose("HHHHHHHHHH", &style).unwrap());

    let mean_y = |left: bool| {
        let (sum, count) = card
            .enumerate_pixels()
            .filter(|(x, y, p)| (*x < 300) == left && *p != base.get_pixel(*x, *y))
            .fold((0u64, 0u64), |(s, n), (_, y, _)| (s + y as u64, n + 1));
        sum as f64 / count.max(1) as f64
    };

    assert!(
        mean_y(false) < mean_y(true),
        "right half should sit higher than left half"
    );
}

#[test]
fn test_text_clipped_at_image_edge() {
    let dir = tempfile::tempdir().unwrap();
    let base_path = write_base(dir.path(), 120, 80);
    let style = test_style(base_path, PlacementPosition::new(0, 0), 4.0);

    let base = RgbaImage::from_pixel(120, 80, Rgba(BACKGROUND));
    let card = decode(&compose("Edge", &style).unwrap());
    assert_eq!(card.dimensions(), (120, 80));

    // Only the lower right quarter of the text lands on the card
    let (x0, y0, x1, y1) = changed_bounds(&base, &card).expect("part of the text is visible");
    assert_eq!(y0, 0);
    assert!(x0 < 10, "left edge {}", x0);
    assert!(x1 < 60 && y1 < 40, "bounds {:?}", (x1, y1));
}

#[test]
fn test_compositor_as_trait_object() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_base(dir.path(), 200, 100);
    let style = test_style(base, PlacementPosition::new(100, 50), 4.0);
    let renderer: Box<dyn CardRenderer> =
        Box::new(Compositor::new(std::sync::Arc::new(style.clone())));

    assert_eq!(renderer.render("Hi").unwrap(), compose("Hi", &style).unwrap());
}

#[test]
fn test_default_card_with_name() {
    let style = StyleConfig::new(
        asset("assets/card.png"),
        asset("assets/fonts/DejaVuSans-Bold.ttf"),
    );
    let base = image::open(&style.base_image).unwrap().to_rgba8();

    let card = decode(&compose("Anna", &style).unwrap());
    assert_eq!(card.dimensions(), base.dimensions());
    assert!(card.pixels().any(|p| p.0 == [0xff, 0x57, 0x57, 0xff]));

    let bounds = changed_bounds(&base, &card).expect("name should be drawn");
    let (cx, cy) = center_of(bounds);
    assert!((cx - 1140.0).abs() <= 16.0, "center x {}", cx);
    assert!((cy - 625.0).abs() <= 16.0, "center y {}", cy);

    let (w, h) = base.dimensions();
    assert_eq!(card.get_pixel(0, 0), base.get_pixel(0, 0));
    assert_eq!(card.get_pixel(w - 1, h - 1), base.get_pixel(w - 1, h - 1));
}
