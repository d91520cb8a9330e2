//! Extraction engine
//!
//! A [`Request`] takes an immutable [`Settings`] snapshot, derives the
//! positional [`Multipliers`] for an image, splits the rows into contiguous
//! bands and hands one band to each worker through an [`Executor`]. Each
//! worker folds its samples into its own registry; the worker that finishes
//! last aggregates the per-band winners and delivers the color.

mod executor;
mod request;
pub(crate) mod settings;
mod weights;

pub use executor::{CurrentThread, ElasticPool, Executor, ExecutorError, Job, PoolConfig};
pub use request::{worker_count, Callback, Request};
pub use settings::{
    Settings, DEFAULT_ACCURACY, DEFAULT_BORDER_DIVISOR, DEFAULT_MERGE_DISTANCE,
};
pub use weights::{BorderSize, Multipliers, Zone};
