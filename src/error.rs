use accent_color::{PickError, PixelBufferError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported pixel format: {color_type:?} at {bit_depth:?}")]
    UnsupportedPixelFormat {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Color extraction error: {0}")]
    Pick(#[from] PickError),

    #[error("Pixel buffer error: {0}")]
    Pixels(#[from] PixelBufferError),

    #[error("Picker stopped without delivering a result")]
    NoResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use accent_color::ConfigError;

    #[test]
    fn test_app_error_png_encode() {
        let error = AppError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_app_error_unsupported_format() {
        let error = AppError::UnsupportedPixelFormat {
            color_type: png::ColorType::Indexed,
            bit_depth: png::BitDepth::Four,
        };
        assert_eq!(
            error.to_string(),
            "Unsupported pixel format: Indexed at Four"
        );
    }

    #[test]
    fn test_app_error_from_pick_error() {
        let error: AppError = PickError::from(ConfigError::AccuracyNotPositive).into();
        match &error {
            AppError::Pick(PickError::InvalidConfiguration(_)) => {}
            _ => panic!("Expected Pick variant"),
        }
        assert_eq!(
            error.to_string(),
            "Color extraction error: invalid configuration: accuracy must be > 0"
        );
    }

    #[test]
    fn test_app_error_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png");
        let error: AppError = io.into();
        assert_eq!(error.to_string(), "IO error: missing.png");
    }

    #[test]
    fn test_app_error_from_yaml_error() {
        let yaml = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        let error: AppError = yaml.into();
        assert!(error.to_string().starts_with("Config error: "));
    }
}
