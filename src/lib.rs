//! Backdrop - accent color backgrounds for images
//!
//! Command-line shell around the `accent-color` engine: PNG decoding, YAML
//! configuration, the choice of invocation mode and preview rendering.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

pub use rendering::compose;
