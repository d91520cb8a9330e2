//! Preview rendering: the picked color as a canvas around the image.

mod common;

use std::sync::Arc;

use accent_color::PixelSource;
use backdrop::compose;
use backdrop::models::PickerConfig;
use backdrop::rendering::{decode_png_file, encode_rgb_png, write_png_file};
use backdrop::services::PickerService;
use common::{colors, fixtures};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_render_writes_image_on_accent_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let input = fixtures::write_fixture(dir.path(), "in.png", &fixtures::framed_image());
    let output = dir.path().join("out.png");

    let image = Arc::new(decode_png_file(&input).unwrap());
    let color = PickerService::new(&PickerConfig::default())
        .unwrap()
        .pick(Arc::clone(&image))
        .await
        .unwrap();
    let canvas = compose(&image, color, 8);
    write_png_file(&output, &canvas).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    common::assert_png_bytes(&bytes);

    let written = decode_png_file(&output).unwrap();
    assert_eq!((written.width(), written.height()), (64, 52));
    common::assert_border_color(&written, 8, colors::NAVY);
    common::assert_contains_image(&written, &image, 8);
}

#[test]
fn test_render_without_padding_keeps_image() {
    let image = fixtures::half_and_half();
    let canvas = compose(&image, colors::NAVY, 0);
    assert_eq!(canvas, image);
    common::assert_png_bytes(&encode_rgb_png(&canvas).unwrap());
}
