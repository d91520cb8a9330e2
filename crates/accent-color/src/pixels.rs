//! Pixel access boundary
//!
//! The engine never sees a concrete bitmap type. Anything that can report
//! its dimensions and return an [`Rgb`] for a coordinate implements
//! [`PixelSource`]; [`RgbImage`] is the in-memory adapter used by the
//! application and by tests.

use thiserror::Error;

use crate::color::Rgb;

/// Read-only, random-access pixel data.
///
/// Implementations are shared by every worker of a request, so `pixel` must
/// be free of side effects and safe to call concurrently.
pub trait PixelSource: Send + Sync {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Color at column `x`, row `y`. Callers stay within
    /// `0..width` × `0..height`.
    fn pixel(&self, x: u32, y: u32) -> Rgb;
}

impl<P: PixelSource + ?Sized> PixelSource for &P {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb {
        (**self).pixel(x, y)
    }
}

/// Buffer length does not match the declared dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pixel buffer has {actual} {unit}, expected {expected} for {width}x{height}")]
pub struct PixelBufferError {
    pub width: u32,
    pub height: u32,
    pub expected: usize,
    pub actual: usize,
    pub unit: &'static str,
}

/// An owned, row-major RGB bitmap.
///
/// # Example
///
/// ```
/// use accent_color::{PixelSource, Rgb, RgbImage};
///
/// let image = RgbImage::from_fn(4, 2, |x, _| {
///     if x < 2 { Rgb::from_u8(255, 0, 0) } else { Rgb::from_u8(0, 0, 255) }
/// });
/// assert_eq!(image.pixel(3, 1), Rgb::from_u8(0, 0, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Wrap a row-major pixel vector.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, PixelBufferError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(PixelBufferError {
                width,
                height,
                expected,
                actual: pixels.len(),
                unit: "pixels",
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image of a single color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Interpret `bytes` as packed 8-bit RGB triples.
    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, PixelBufferError> {
        Self::from_interleaved(width, height, bytes, 3)
    }

    /// Interpret `bytes` as packed 8-bit RGBA quadruples. Alpha is ignored.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, PixelBufferError> {
        Self::from_interleaved(width, height, bytes, 4)
    }

    fn from_interleaved(
        width: u32,
        height: u32,
        bytes: &[u8],
        channels: usize,
    ) -> Result<Self, PixelBufferError> {
        let expected = width as usize * height as usize * channels;
        if bytes.len() != expected {
            return Err(PixelBufferError {
                width,
                height,
                expected,
                actual: bytes.len(),
                unit: "bytes",
            });
        }
        let pixels = bytes
            .chunks_exact(channels)
            .map(|c| Rgb::from_u8(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Row-major RGB bytes, 3 per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    /// Overwrite one pixel. Out-of-bounds coordinates are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.width && y < self.height {
            let index = y as usize * self.width as usize + x as usize;
            self.pixels[index] = color;
        }
    }
}

impl PixelSource for RgbImage {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        let err = RgbImage::new(2, 2, vec![Rgb::BLACK; 3]).unwrap_err();
        assert_eq!(err.expected, 4);
        assert_eq!(err.actual, 3);
        assert_eq!(
            err.to_string(),
            "pixel buffer has 3 pixels, expected 4 for 2x2"
        );
        assert!(RgbImage::new(2, 2, vec![Rgb::BLACK; 4]).is_ok());
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb::from_u8(x as u8, y as u8, 0));
        assert_eq!(image.pixels()[4], Rgb::from_u8(1, 1, 0));
        assert_eq!(image.pixel(2, 1), Rgb::from_u8(2, 1, 0));
    }

    #[test]
    fn test_from_rgb8_and_back() {
        let bytes = [1, 2, 3, 4, 5, 6];
        let image = RgbImage::from_rgb8(2, 1, &bytes).unwrap();
        assert_eq!(image.pixel(1, 0), Rgb::from_u8(4, 5, 6));
        assert_eq!(image.to_rgb8(), bytes.to_vec());
    }

    #[test]
    fn test_from_rgba8_drops_alpha() {
        let bytes = [1, 2, 3, 0, 4, 5, 6, 255];
        let image = RgbImage::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(image.pixel(0, 0), Rgb::from_u8(1, 2, 3));
        assert_eq!(image.pixel(1, 0), Rgb::from_u8(4, 5, 6));

        let err = RgbImage::from_rgba8(2, 1, &bytes[..7]).unwrap_err();
        assert_eq!(err.unit, "bytes");
    }

    #[test]
    fn test_put_pixel_ignores_out_of_bounds() {
        let mut image = RgbImage::filled(2, 2, Rgb::BLACK);
        image.put_pixel(1, 1, Rgb::WHITE);
        image.put_pixel(2, 0, Rgb::WHITE);
        assert_eq!(image.pixel(1, 1), Rgb::WHITE);
        assert_eq!(image.pixels().iter().filter(|&&p| p == Rgb::WHITE).count(), 1);
    }

    #[test]
    fn test_reference_is_a_pixel_source() {
        fn dims(source: impl PixelSource) -> (u32, u32) {
            (source.width(), source.height())
        }
        let image = RgbImage::filled(5, 7, Rgb::WHITE);
        assert_eq!(dims(&image), (5, 7));
    }
}
