use accent_color::{Executor, ExecutorError, Job};
use tokio::runtime::Handle;

/// Runs picker jobs on tokio's blocking thread pool.
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Executor for the runtime this is called from.
    ///
    /// # Panics
    ///
    /// Outside of a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Executor for TokioExecutor {
    fn execute(&self, job: Job) -> Result<(), ExecutorError> {
        // Completion is reported through the picker callback, not the handle
        drop(self.handle.spawn_blocking(job));
        Ok(())
    }

    fn max_parallelism(&self) -> Option<usize> {
        Some(self.handle.metrics().num_workers())
    }
}
