use std::sync::Arc;

use super::error::{BorderAxis, PickError};
use crate::color::Rgb;
use crate::engine::settings::{check_accuracy, check_divisor, check_merge_distance};
use crate::engine::{ElasticPool, Executor, Request, Settings};
use crate::pixels::PixelSource;

/// Extracts the accent color of an image.
///
/// Setters validate their input and leave the picker unchanged on error.
/// They take effect for calls made afterwards; a call already running keeps
/// the settings it started with.
///
/// # Example
///
/// ```
/// use accent_color::{AccentPicker, Rgb, RgbImage};
///
/// let image = RgbImage::from_fn(40, 40, |x, y| {
///     if (2..38).contains(&x) && (2..38).contains(&y) {
///         Rgb::from_u8(200, 30, 30)
///     } else {
///         Rgb::from_u8(20, 20, 20)
///     }
/// });
///
/// let mut picker = AccentPicker::new();
/// picker.set_accuracy(2)?.set_border_divisor(4)?;
/// assert_eq!(picker.generate(&image)?, Rgb::from_u8(200, 30, 30));
/// # Ok::<(), accent_color::PickError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccentPicker {
    settings: Settings,
}

impl AccentPicker {
    /// A picker with [`Settings::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A picker with the given settings, validated.
    pub fn with_settings(settings: Settings) -> Result<Self, PickError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Sample every `accuracy`-th pixel in both directions. Must be > 0.
    pub fn set_accuracy(&mut self, accuracy: u32) -> Result<&mut Self, PickError> {
        check_accuracy(accuracy)?;
        self.settings.accuracy = accuracy;
        Ok(self)
    }

    /// CIEDE2000 distance under which colors are grouped. Must be finite
    /// and >= 0.
    pub fn set_merge_distance(&mut self, distance: f64) -> Result<&mut Self, PickError> {
        check_merge_distance(distance)?;
        self.settings.merge_distance = distance;
        Ok(self)
    }

    /// Divisor of the image width giving the left/right band width.
    /// Must be > 1.
    pub fn set_vertical_divisor(&mut self, divisor: u32) -> Result<&mut Self, PickError> {
        check_divisor(BorderAxis::Vertical, divisor)?;
        self.settings.vertical_divisor = divisor;
        Ok(self)
    }

    /// Divisor of the image height giving the top/bottom band height.
    /// Must be > 1.
    pub fn set_horizontal_divisor(&mut self, divisor: u32) -> Result<&mut Self, PickError> {
        check_divisor(BorderAxis::Horizontal, divisor)?;
        self.settings.horizontal_divisor = divisor;
        Ok(self)
    }

    /// Set both border divisors at once.
    pub fn set_border_divisor(&mut self, divisor: u32) -> Result<&mut Self, PickError> {
        check_divisor(BorderAxis::Vertical, divisor)?;
        check_divisor(BorderAxis::Horizontal, divisor)?;
        self.settings.vertical_divisor = divisor;
        self.settings.horizontal_divisor = divisor;
        Ok(self)
    }

    fn request(&self) -> Request {
        Request::new(self.settings)
    }

    /// Extract the accent color on the calling thread.
    pub fn generate<S>(&self, source: &S) -> Result<Rgb, PickError>
    where
        S: PixelSource + ?Sized,
    {
        self.request().run_inline(source)
    }

    /// Extract the accent color on the shared [`ElasticPool`].
    ///
    /// Configuration errors are returned immediately. Otherwise `callback`
    /// runs exactly once on a pool thread.
    pub fn generate_async<S, F>(&self, source: Arc<S>, callback: F) -> Result<(), PickError>
    where
        S: PixelSource + ?Sized + 'static,
        F: FnOnce(Result<Rgb, PickError>) + Send + 'static,
    {
        self.generate_on_executor(source, callback, ElasticPool::shared(), 0)
    }

    /// Extract the accent color with jobs dispatched to `executor`.
    ///
    /// `forced_workers` fixes the number of row bands; 0 derives it from
    /// the executor's parallelism.
    pub fn generate_on_executor<S, F, E>(
        &self,
        source: Arc<S>,
        callback: F,
        executor: &E,
        forced_workers: usize,
    ) -> Result<(), PickError>
    where
        S: PixelSource + ?Sized + 'static,
        F: FnOnce(Result<Rgb, PickError>) + Send + 'static,
        E: Executor + ?Sized,
    {
        self.request()
            .execute(source, callback, executor, forced_workers)
    }
}
