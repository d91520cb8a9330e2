use super::weights::BorderSize;
use crate::api::{BorderAxis, ConfigError};

/// Default sampling stride in pixels.
pub const DEFAULT_ACCURACY: u32 = 3;
/// Default divisor for both border bands (a band is 1/16 of the image side).
pub const DEFAULT_BORDER_DIVISOR: u32 = 16;
/// Default CIEDE2000 distance under which two colors are grouped.
pub const DEFAULT_MERGE_DISTANCE: f64 = 20.0;

/// Tunable parameters of one extraction.
///
/// A [`Request`](super::Request) copies the settings when it is created, so
/// later changes never affect work already in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Sampling stride: every `accuracy`-th pixel is read in both axes.
    pub accuracy: u32,
    /// Left/right border band width is `image width / vertical_divisor`.
    pub vertical_divisor: u32,
    /// Top/bottom border band height is `image height / horizontal_divisor`.
    pub horizontal_divisor: u32,
    /// Colors within this CIEDE2000 distance of a group's founder join it.
    pub merge_distance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ACCURACY,
            vertical_divisor: DEFAULT_BORDER_DIVISOR,
            horizontal_divisor: DEFAULT_BORDER_DIVISOR,
            merge_distance: DEFAULT_MERGE_DISTANCE,
        }
    }
}

impl Settings {
    /// Check every value that does not depend on the image.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_accuracy(self.accuracy)?;
        check_divisor(BorderAxis::Vertical, self.vertical_divisor)?;
        check_divisor(BorderAxis::Horizontal, self.horizontal_divisor)?;
        check_merge_distance(self.merge_distance)
    }

    /// [`validate`](Self::validate), plus `accuracy <= min(width, height)`.
    pub fn validate_for(&self, width: u32, height: u32) -> Result<(), ConfigError> {
        self.validate()?;
        if self.accuracy > width || self.accuracy > height {
            return Err(ConfigError::AccuracyExceedsImage {
                accuracy: self.accuracy,
                width,
                height,
            });
        }
        Ok(())
    }

    /// Border band sizes for an image of the given dimensions.
    pub fn border_size(&self, width: u32, height: u32) -> BorderSize {
        BorderSize {
            width: width / self.vertical_divisor,
            height: height / self.horizontal_divisor,
        }
    }
}

pub(crate) fn check_accuracy(accuracy: u32) -> Result<(), ConfigError> {
    if accuracy == 0 {
        return Err(ConfigError::AccuracyNotPositive);
    }
    Ok(())
}

pub(crate) fn check_divisor(axis: BorderAxis, value: u32) -> Result<(), ConfigError> {
    if value <= 1 {
        return Err(ConfigError::DivisorTooSmall { axis, value });
    }
    Ok(())
}

pub(crate) fn check_merge_distance(distance: f64) -> Result<(), ConfigError> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(ConfigError::InvalidMergeDistance(distance));
    }
    Ok(())
}
