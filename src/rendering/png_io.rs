use accent_color::{PixelSource, Rgb, RgbImage};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use crate::error::AppError;

/// Decode a PNG into an RGB image.
///
/// Palette and low bit depth images are expanded and 16-bit channels are
/// stripped to 8 bits. Alpha is dropped; the color channels are kept as
/// stored.
pub fn decode_png<R: Read>(input: R) -> Result<RgbImage, AppError> {
    let mut decoder = png::Decoder::new(input);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];
    let (width, height) = (info.width, info.height);

    let image = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => RgbImage::from_rgb8(width, height, bytes)?,
        (png::ColorType::Rgba, png::BitDepth::Eight) => {
            RgbImage::from_rgba8(width, height, bytes)?
        }
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            let pixels = bytes.iter().map(|&v| Rgb::from_u8(v, v, v)).collect();
            RgbImage::new(width, height, pixels)?
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => {
            let pixels = bytes
                .chunks_exact(2)
                .map(|c| Rgb::from_u8(c[0], c[0], c[0]))
                .collect();
            RgbImage::new(width, height, pixels)?
        }
        (color_type, bit_depth) => {
            return Err(AppError::UnsupportedPixelFormat {
                color_type,
                bit_depth,
            })
        }
    };

    tracing::debug!(
        width,
        height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );
    Ok(image)
}

/// Decode the PNG file at `path`.
pub fn decode_png_file(path: &Path) -> Result<RgbImage, AppError> {
    let file = File::open(path)?;
    decode_png(BufReader::new(file))
}

/// Encode an RGB image as an 8-bit RGB PNG.
pub fn encode_rgb_png(image: &RgbImage) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&image.to_rgb8())
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode `image` and write it to `path`.
pub fn write_png_file(path: &Path, image: &RgbImage) -> Result<(), AppError> {
    let png_data = encode_rgb_png(image)?;
    std::fs::write(path, &png_data)?;
    tracing::info!(path = %path.display(), bytes = png_data.len(), "Wrote PNG");
    Ok(())
}
