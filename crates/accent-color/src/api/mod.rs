//! Public picker API
//!
//! [`AccentPicker`] holds the extraction settings and starts a fresh
//! [`Request`](crate::Request) for every call, so one picker can serve many
//! images concurrently.

mod error;
mod picker;

pub use error::{BorderAxis, ConfigError, PickError};
pub use picker::AccentPicker;
