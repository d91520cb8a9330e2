//! Where worker jobs run
//!
//! The engine only needs something that accepts boxed jobs and, optionally,
//! reports how many of them can run at once. [`CurrentThread`] runs jobs
//! inline; [`ElasticPool`] is a bounded, lazily grown thread pool shared by
//! the asynchronous picker entry point. With the `rayon` feature a
//! `rayon::ThreadPool` can be used directly.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use thiserror::Error;

/// A unit of work handed to an [`Executor`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// The executor refused to accept a job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("executor rejected job: {reason}")]
pub struct ExecutorError {
    pub reason: String,
}

impl ExecutorError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Runs jobs, possibly concurrently.
pub trait Executor: Send + Sync {
    /// Run `job` now or later. An `Err` means the job was dropped unrun.
    fn execute(&self, job: Job) -> Result<(), ExecutorError>;

    /// How many jobs this executor can usefully run at once, if known.
    fn max_parallelism(&self) -> Option<usize> {
        None
    }
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, job: Job) -> Result<(), ExecutorError> {
        (**self).execute(job)
    }

    fn max_parallelism(&self) -> Option<usize> {
        (**self).max_parallelism()
    }
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn execute(&self, job: Job) -> Result<(), ExecutorError> {
        (**self).execute(job)
    }

    fn max_parallelism(&self) -> Option<usize> {
        (**self).max_parallelism()
    }
}

/// Runs every job on the calling thread before `execute` returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentThread;

impl Executor for CurrentThread {
    fn execute(&self, job: Job) -> Result<(), ExecutorError> {
        job();
        Ok(())
    }

    fn max_parallelism(&self) -> Option<usize> {
        Some(1)
    }
}

#[cfg(feature = "rayon")]
impl Executor for rayon::ThreadPool {
    fn execute(&self, job: Job) -> Result<(), ExecutorError> {
        self.spawn(job);
        Ok(())
    }

    fn max_parallelism(&self) -> Option<usize> {
        Some(self.current_num_threads())
    }
}

/// Sizing of an [`ElasticPool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Threads that stay alive while idle.
    pub core_threads: usize,
    /// Upper bound on live threads.
    pub max_threads: usize,
    /// How long a thread above the core count waits for work before exiting.
    pub idle_timeout: Duration,
    /// Thread name prefix; threads are named `{name}-{n}`.
    pub name: String,
}

impl PoolConfig {
    /// Sizing for a machine with `cpus` logical processors:
    /// `max(2, min(cpus - 1, 4))` core threads and `2 * cpus + 1` at most.
    pub fn for_cpus(cpus: usize) -> Self {
        let core_threads = cpus.saturating_sub(1).clamp(2, 4);
        Self {
            core_threads,
            max_threads: (cpus * 2 + 1).max(core_threads),
            idle_timeout: Duration::from_secs(30),
            name: "accent-pool".to_string(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::for_cpus(num_cpus::get())
    }
}

struct PoolState {
    config: PoolConfig,
    live: AtomicUsize,
    idle: AtomicUsize,
    spawned: AtomicUsize,
}

/// A thread pool that starts empty, grows on demand up to `max_threads` and
/// shrinks back to `core_threads` when idle.
///
/// Jobs wait in an unbounded queue. A job that panics is logged and the
/// thread keeps serving. Dropping the pool lets its threads drain the queue
/// and exit.
pub struct ElasticPool {
    sender: Sender<Job>,
    receiver: Receiver<Job>,
    state: Arc<PoolState>,
}

impl ElasticPool {
    pub fn new(config: PoolConfig) -> Self {
        let core_threads = config.core_threads.max(1);
        let config = PoolConfig {
            core_threads,
            max_threads: config.max_threads.max(core_threads),
            ..config
        };
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            sender,
            receiver,
            state: Arc::new(PoolState {
                config,
                live: AtomicUsize::new(0),
                idle: AtomicUsize::new(0),
                spawned: AtomicUsize::new(0),
            }),
        }
    }

    /// The process-wide pool, created on first use with
    /// [`PoolConfig::default`].
    pub fn shared() -> &'static ElasticPool {
        static POOL: OnceLock<ElasticPool> = OnceLock::new();
        POOL.get_or_init(|| ElasticPool::new(PoolConfig::default()))
    }

    pub fn config(&self) -> &PoolConfig {
        &self.state.config
    }

    /// Threads currently alive.
    pub fn live_threads(&self) -> usize {
        self.state.live.load(Ordering::SeqCst)
    }

    /// Threads currently waiting for a job.
    pub fn idle_threads(&self) -> usize {
        self.state.idle.load(Ordering::SeqCst)
    }

    /// Reserve a slot below `max_threads` and start a thread in it.
    /// Returns `Ok(false)` when the pool is already full.
    fn spawn_worker(&self) -> std::io::Result<bool> {
        let max = self.state.config.max_threads;
        let reserved = self
            .state
            .live
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |live| {
                (live < max).then_some(live + 1)
            });
        if reserved.is_err() {
            return Ok(false);
        }

        let id = self.state.spawned.fetch_add(1, Ordering::Relaxed);
        let state = Arc::clone(&self.state);
        let receiver = self.receiver.clone();
        let spawned = thread::Builder::new()
            .name(format!("{}-{}", self.state.config.name, id))
            .spawn(move || worker_loop(state, receiver));

        match spawned {
            Ok(_) => {
                tracing::debug!(thread = id, live = self.live_threads(), "Pool thread started");
                Ok(true)
            }
            Err(e) => {
                self.state.live.fetch_sub(1, Ordering::SeqCst);
                Err(e)
            }
        }
    }
}

impl Executor for ElasticPool {
    fn execute(&self, job: Job) -> Result<(), ExecutorError> {
        if self.idle_threads() == 0 {
            if let Err(e) = self.spawn_worker() {
                if self.live_threads() == 0 {
                    return Err(ExecutorError::new(format!("cannot start pool thread: {e}")));
                }
                tracing::warn!(error = %e, "Pool could not grow, queueing job");
            }
        }
        self.sender
            .send(job)
            .map_err(|_| ExecutorError::new("pool queue closed"))
    }

    fn max_parallelism(&self) -> Option<usize> {
        Some(self.state.config.max_threads)
    }
}

impl std::fmt::Debug for ElasticPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticPool")
            .field("config", &self.state.config)
            .field("live", &self.live_threads())
            .field("idle", &self.idle_threads())
            .field("queued", &self.sender.len())
            .finish()
    }
}

/// Give up a thread slot if the pool is above its core size.
fn retire(state: &PoolState) -> bool {
    let core = state.config.core_threads;
    state
        .live
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |live| {
            (live > core).then(|| live - 1)
        })
        .is_ok()
}

fn run_job(job: Job) {
    if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
        tracing::warn!(
            thread = thread::current().name().unwrap_or("?"),
            "Pool job panicked"
        );
    }
}

fn worker_loop(state: Arc<PoolState>, receiver: Receiver<Job>) {
    loop {
        state.idle.fetch_add(1, Ordering::SeqCst);
        let received = receiver.recv_timeout(state.config.idle_timeout);
        state.idle.fetch_sub(1, Ordering::SeqCst);

        match received {
            Ok(job) => run_job(job),
            Err(RecvTimeoutError::Timeout) => {
                if !retire(&state) {
                    continue;
                }
                // A job may have been queued between the timeout and retiring.
                match receiver.try_recv() {
                    Ok(job) => {
                        state.live.fetch_add(1, Ordering::SeqCst);
                        run_job(job);
                    }
                    Err(_) => {
                        tracing::debug!(live = state.live.load(Ordering::SeqCst), "Pool thread retired");
                        return;
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                state.live.fetch_sub(1, Ordering::SeqCst);
                return;
            }
        }
    }
}
