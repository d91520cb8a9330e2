use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use super::executor::{Executor, Job};
use super::settings::Settings;
use super::weights::{BorderSize, Multipliers};
use crate::api::PickError;
use crate::color::Rgb;
use crate::pixels::PixelSource;
use crate::registry::{ColorGroup, ColorRegistry, REGISTRY_CAPACITY};

/// Receives the outcome of an asynchronous extraction, exactly once.
pub type Callback = Box<dyn FnOnce(Result<Rgb, PickError>) + Send + 'static>;

/// Number of row bands to split an image of `height` rows into.
///
/// A non-zero `forced` count wins; otherwise the executor's parallelism
/// `hint` is used, and without one `height / accuracy`. The count is at
/// least one, collapses to one when it exceeds twice the height, and never
/// exceeds the height so that every band has at least one row.
pub fn worker_count(height: u32, accuracy: u32, forced: usize, hint: Option<usize>) -> usize {
    let derived = if forced > 0 {
        forced
    } else {
        hint.unwrap_or_else(|| (height / accuracy.max(1)) as usize)
    };
    let mut workers = derived.max(1);
    if 2 * (height as usize) < workers {
        workers = 1;
    }
    workers.min(height as usize).max(1)
}

/// A single extraction over one image.
///
/// A request is created from a snapshot of the picker settings and is
/// consumed by running it, so it can never be started twice.
#[derive(Debug, Clone)]
pub struct Request {
    settings: Settings,
}

impl Request {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the whole extraction on the calling thread as a single band.
    pub fn run_inline<S>(self, source: &S) -> Result<Rgb, PickError>
    where
        S: PixelSource + ?Sized,
    {
        let execution = Execution::plan(self.settings, source, 1, None)?;
        execution.run_worker(0, source);
        execution.outcome()
    }

    /// Split the image into row bands and hand one job per band to
    /// `executor`. `forced_workers` overrides the band count when non-zero.
    ///
    /// Invalid settings are returned immediately and `callback` is dropped
    /// unused. Otherwise `callback` is invoked exactly once, by whichever
    /// worker finishes last, with the winning color or the first worker
    /// failure.
    pub fn execute<S, F, E>(
        self,
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
        let workers = worker_count(
            source.height(),
            self.settings.accuracy,
            forced_workers,
            executor.max_parallelism(),
        );
        let execution = Arc::new(Execution::plan(
            self.settings,
            &*source,
            workers,
            Some(Box::new(callback)),
        )?);

        for worker in 0..workers {
            let job_execution = Arc::clone(&execution);
            let job_source = Arc::clone(&source);
            let job: Job = Box::new(move || job_execution.run_worker(worker, &*job_source));

            if let Err(e) = executor.execute(job) {
                tracing::warn!(worker, workers, error = %e, "Failed to dispatch worker");
                execution.record_failure(PickError::ExecutionFailure {
                    worker,
                    reason: e.to_string(),
                });
                // The rejected job and everything after it will never report.
                for _ in worker..workers {
                    execution.finish_one();
                }
                break;
            }
        }
        Ok(())
    }
}

/// State shared by the workers of one running request.
struct Execution {
    settings: Settings,
    multipliers: Multipliers,
    border: BorderSize,
    width: u32,
    height: u32,
    band_rows: u32,
    workers: usize,
    started: Instant,
    finished: AtomicUsize,
    results: Mutex<Vec<(usize, ColorGroup)>>,
    failure: Mutex<Option<PickError>>,
    callback: Mutex<Option<Callback>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .unwrap_or_else(|| "worker panicked".to_string()),
    }
}

impl Execution {
    fn plan<S>(
        settings: Settings,
        source: &S,
        workers: usize,
        callback: Option<Callback>,
    ) -> Result<Self, PickError>
    where
        S: PixelSource + ?Sized,
    {
        let (width, height) = (source.width(), source.height());
        settings.validate_for(width, height)?;

        let border = settings.border_size(width, height);
        let multipliers = Multipliers::compute(border.width, border.height, width, height);
        let band_rows = height / workers as u32;

        tracing::debug!(
            width,
            height,
            workers,
            band_rows,
            accuracy = settings.accuracy,
            border = ?(border.width, border.height),
            ?multipliers,
            "Starting extraction"
        );

        Ok(Self {
            settings,
            multipliers,
            border,
            width,
            height,
            band_rows,
            workers,
            started: Instant::now(),
            finished: AtomicUsize::new(0),
            results: Mutex::new(Vec::with_capacity(workers)),
            failure: Mutex::new(None),
            callback: Mutex::new(callback),
        })
    }

    fn run_worker<S>(&self, worker: usize, source: &S)
    where
        S: PixelSource + ?Sized,
    {
        match panic::catch_unwind(AssertUnwindSafe(|| self.scan_band(worker, source))) {
            Ok(Some(group)) => lock(&self.results).push((worker, group)),
            Ok(None) => {}
            Err(payload) => {
                let reason = panic_reason(payload);
                tracing::warn!(worker, %reason, "Worker panicked");
                self.record_failure(PickError::ExecutionFailure { worker, reason });
            }
        }
        self.finish_one();
    }

    /// Sample one band and return its heaviest group.
    fn scan_band<S>(&self, worker: usize, source: &S) -> Option<ColorGroup>
    where
        S: PixelSource + ?Sized,
    {
        let started = Instant::now();
        let first_row = worker as u32 * self.band_rows;
        let end_row = first_row + self.band_rows;
        let stride = self.settings.accuracy as usize;
        let BorderSize {
            width: border_width,
            height: border_height,
        } = self.border;

        let mut registry = ColorRegistry::new(REGISTRY_CAPACITY, self.settings.merge_distance);
        let mut samples = 0usize;
        for y in (first_row..end_row).step_by(stride) {
            for x in (0..self.width).step_by(stride) {
                let weight = self.multipliers.zone_weight(
                    x,
                    y,
                    self.width,
                    self.height,
                    border_width,
                    border_height,
                );
                registry.insert(source.pixel(x, y), weight);
                samples += 1;
            }
        }

        tracing::debug!(
            worker,
            rows = ?(first_row..end_row),
            samples,
            groups = registry.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Band scanned"
        );
        registry.into_best()
    }

    /// Keep the failure of the lowest-numbered worker.
    fn record_failure(&self, error: PickError) {
        let mut failure = lock(&self.failure);
        let replace = match (&*failure, &error) {
            (None, _) => true,
            (
                Some(PickError::ExecutionFailure { worker: kept, .. }),
                PickError::ExecutionFailure { worker, .. },
            ) => worker < kept,
            _ => false,
        };
        if replace {
            *failure = Some(error);
        }
    }

    fn finish_one(&self) {
        let finished = self.finished.fetch_add(1, Ordering::AcqRel) + 1;
        if finished == self.workers {
            self.complete();
        }
    }

    fn complete(&self) {
        let callback = lock(&self.callback).take();
        if let Some(callback) = callback {
            callback(self.outcome());
        }
    }

    /// The heaviest per-band winner; ties go to the lowest band.
    fn outcome(&self) -> Result<Rgb, PickError> {
        if let Some(error) = lock(&self.failure).take() {
            return Err(error);
        }

        let mut results = std::mem::take(&mut *lock(&self.results));
        results.sort_by_key(|(worker, _)| *worker);
        let best = results.iter().fold(None, |best: Option<&ColorGroup>, (_, group)| {
            match best {
                Some(b) if b.total_weight() >= group.total_weight() => Some(b),
                _ => Some(group),
            }
        });

        let color = best.map(ColorGroup::top_color).ok_or(PickError::NoSamples)?;
        tracing::debug!(
            %color,
            workers = self.workers,
            bands = results.len(),
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Extraction finished"
        );
        Ok(color)
    }
}
