//! Test fixtures and constants.

use accent_color::{Rgb, RgbImage};
use backdrop::rendering::write_png_file;
use std::path::{Path, PathBuf};

/// Colors used by the fixture images
pub mod colors {
    use accent_color::Rgb;

    pub const NAVY: Rgb = Rgb::from_u8(20, 30, 110);
    pub const SAND: Rgb = Rgb::from_u8(230, 210, 170);
    pub const RED: Rgb = Rgb::from_u8(255, 0, 0);
    pub const BLUE: Rgb = Rgb::from_u8(0, 0, 255);
}

/// 48x36 sand picture with a 6 pixel navy frame. Under the default weighting
/// the frame wins.
pub fn framed_image() -> RgbImage {
    RgbImage::from_fn(48, 36, |x, y| {
        if x < 6 || y < 6 || x >= 42 || y >= 30 {
            colors::NAVY
        } else {
            colors::SAND
        }
    })
}

/// 10x10, left half red, right half blue.
pub fn half_and_half() -> RgbImage {
    RgbImage::from_fn(10, 10, |x, _| {
        if x < 5 {
            colors::RED
        } else {
            colors::BLUE
        }
    })
}

/// Write `image` as `name` inside `dir` and return its path.
pub fn write_fixture(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    write_png_file(&path, image).expect("write fixture PNG");
    path
}

/// Write a YAML config file inside `dir` and return its path.
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("backdrop.yaml");
    std::fs::write(&path, yaml).expect("write config");
    path
}
