//! Assertion helpers for tests.

use accent_color::{PixelSource, Rgb, RgbImage};
use pretty_assertions::assert_eq;

/// Assert every pixel outside the `padding` border equals `color`.
pub fn assert_border_color(canvas: &RgbImage, padding: u32, color: Rgb) {
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let in_border = x < padding
                || y < padding
                || x >= canvas.width() - padding
                || y >= canvas.height() - padding;
            if in_border {
                assert_eq!(
                    canvas.pixel(x, y),
                    color,
                    "Expected border color at ({x}, {y})"
                );
            }
        }
    }
}

/// Assert `canvas` contains `image` at offset (`padding`, `padding`).
pub fn assert_contains_image(canvas: &RgbImage, image: &RgbImage, padding: u32) {
    for y in 0..image.height() {
        for x in 0..image.width() {
            assert_eq!(
                canvas.pixel(x + padding, y + padding),
                image.pixel(x, y),
                "Image pixel ({x}, {y}) not preserved"
            );
        }
    }
}

/// Assert bytes start with the PNG signature
pub fn assert_png_bytes(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG data, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}
