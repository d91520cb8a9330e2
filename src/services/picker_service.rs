use accent_color::{AccentPicker, ElasticPool, PickError, PoolConfig, Rgb, RgbImage};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot;

use super::tokio_executor::TokioExecutor;
use crate::error::AppError;
use crate::models::{Mode, PickerConfig};

type Delivery = Box<dyn FnOnce(Result<Rgb, PickError>) + Send + 'static>;

/// Picks accent colors in the configured [`Mode`].
pub struct PickerService {
    picker: AccentPicker,
    mode: Mode,
    workers: usize,
    pool: Option<ElasticPool>,
}

impl PickerService {
    /// Validate `config` and prepare the executor its mode needs.
    pub fn new(config: &PickerConfig) -> Result<Self, AppError> {
        let picker = config.picker()?;
        let pool = (config.mode == Mode::Pool).then(|| {
            ElasticPool::new(PoolConfig {
                name: "backdrop-pool".to_string(),
                ..PoolConfig::default()
            })
        });
        tracing::debug!(mode = %config.mode, workers = config.workers, "Picker service ready");
        Ok(Self {
            picker,
            mode: config.mode,
            workers: config.workers,
            pool,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn picker(&self) -> &AccentPicker {
        &self.picker
    }

    /// Extract the accent color of `image`.
    pub async fn pick(&self, image: Arc<RgbImage>) -> Result<Rgb, AppError> {
        let started = Instant::now();
        let color = match self.mode {
            Mode::Sync => {
                // Inline extraction is CPU bound; keep it off the async workers.
                let picker = self.picker.clone();
                tokio::task::spawn_blocking(move || picker.generate(&*image))
                    .await
                    .map_err(|_| AppError::NoResult)??
            }
            Mode::Async => deliver(|done| self.picker.generate_async(image, done)).await?,
            Mode::Pool => {
                let pool = self.pool.as_ref().unwrap_or_else(|| ElasticPool::shared());
                deliver(|done| {
                    self.picker
                        .generate_on_executor(image, done, pool, self.workers)
                })
                .await?
            }
            Mode::Tokio => {
                let executor = TokioExecutor::current();
                deliver(|done| {
                    self.picker
                        .generate_on_executor(image, done, &executor, self.workers)
                })
                .await?
            }
        };

        tracing::info!(
            mode = %self.mode,
            %color,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Picked accent color"
        );
        Ok(color)
    }
}

/// Start a callback-based pick and await its single delivery.
async fn deliver<F>(start: F) -> Result<Rgb, AppError>
where
    F: FnOnce(Delivery) -> Result<(), PickError>,
{
    let (tx, rx) = oneshot::channel();
    start(Box::new(move |result| {
        // The receiver is gone only if the caller stopped waiting
        let _ = tx.send(result);
    }))?;
    let result = rx.await.map_err(|_| AppError::NoResult)?;
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEAL: Rgb = Rgb::from_u8(0, 128, 128);

    fn framed() -> Arc<RgbImage> {
        Arc::new(RgbImage::from_fn(40, 30, |x, y| {
            if x < 4 || y < 4 || x >= 36 || y >= 26 {
                TEAL
            } else {
                Rgb::from_u8(250, 240, 230)
            }
        }))
    }

    fn config(mode: Mode, workers: usize) -> PickerConfig {
        PickerConfig {
            accuracy: 1,
            vertical_divisor: 8,
            horizontal_divisor: 8,
            mode,
            workers,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_all_modes_agree() {
        let image = framed();
        let expected = PickerService::new(&config(Mode::Sync, 0))
            .unwrap()
            .pick(Arc::clone(&image))
            .await
            .unwrap();
        assert_eq!(expected, TEAL);

        for mode in [Mode::Async, Mode::Pool, Mode::Tokio] {
            let service = PickerService::new(&config(mode, 1)).unwrap();
            let color = service.pick(Arc::clone(&image)).await.unwrap();
            assert_eq!(color, expected, "mode {mode}");
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_tokio_mode_with_derived_workers() {
        let service = PickerService::new(&config(Mode::Tokio, 0)).unwrap();
        assert_eq!(service.pick(framed()).await.unwrap(), TEAL);
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_picking() {
        let bad = PickerConfig {
            merge_distance: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            PickerService::new(&bad),
            Err(AppError::Pick(PickError::InvalidConfiguration(_)))
        ));
    }

    #[tokio::test]
    async fn test_accuracy_too_large_for_image_is_reported() {
        let service = PickerService::new(&PickerConfig {
            accuracy: 50,
            mode: Mode::Async,
            ..Default::default()
        })
        .unwrap();
        let err = service.pick(framed()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Pick(PickError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn test_sync_mode_runs_off_the_runtime_and_reports_errors() {
        let service = PickerService::new(&PickerConfig {
            accuracy: 50,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(service.mode(), Mode::Sync);
        let err = service.pick(framed()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Pick(PickError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn test_pool_mode_owns_a_pool() {
        let service = PickerService::new(&config(Mode::Pool, 2)).unwrap();
        assert!(service.pool.is_some());
        assert_eq!(service.mode(), Mode::Pool);
        let sync = PickerService::new(&config(Mode::Sync, 0)).unwrap();
        assert!(sync.pool.is_none());
    }
}
