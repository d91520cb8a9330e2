#![allow(clippy::excessive_precision, clippy::module_inception)]

//! accent-color: dominant accent color extraction
//!
//! Samples an image on a regular grid, groups the samples by perceptual
//! similarity and returns the most representative color of the heaviest
//! group. Pixels near the edges and in the corners count for more than
//! pixels in the middle.
//!
//! # Quick Start
//!
//! ```
//! use accent_color::{AccentPicker, Rgb, RgbImage};
//!
//! let image = RgbImage::filled(32, 32, Rgb::from_u8(30, 90, 200));
//! let color = AccentPicker::new().generate(&image)?;
//! assert_eq!(color, Rgb::from_u8(30, 90, 200));
//! # Ok::<(), accent_color::PickError>(())
//! ```
//!
//! # Concurrent Extraction
//!
//! [`AccentPicker::generate_async`] splits the rows into bands and scans
//! them on the shared [`ElasticPool`]; the callback receives the result once
//! every band is done. [`AccentPicker::generate_on_executor`] does the same
//! on any [`Executor`], with an optional fixed band count.
//!
//! ```
//! use std::sync::{mpsc, Arc};
//! use accent_color::{AccentPicker, CurrentThread, Rgb, RgbImage};
//!
//! let image = Arc::new(RgbImage::filled(32, 32, Rgb::WHITE));
//! let (tx, rx) = mpsc::channel();
//! AccentPicker::new().generate_on_executor(
//!     image,
//!     move |result| tx.send(result).unwrap(),
//!     &CurrentThread,
//!     4,
//! )?;
//! assert_eq!(rx.recv().unwrap()?, Rgb::WHITE);
//! # Ok::<(), accent_color::PickError>(())
//! ```
//!
//! # Algorithm
//!
//! ```text
//! image
//!   |
//!   +-- split into N row bands (one per worker)
//!   |
//!   v
//! every `accuracy`-th pixel of the band
//!   |
//!   +-- weight by zone (interior / border / corner)
//!   +-- sRGB -> CIELAB
//!   |
//!   v
//! first group within `merge_distance` (CIEDE2000) absorbs it,
//! otherwise it founds a new group (at most 32, newer half evicted)
//!   |
//!   v
//! heaviest group per band -> heaviest band group -> its heaviest member
//! ```
//!
//! ## Positional Weighting
//!
//! With border bands of `width / vertical_divisor` and
//! `height / horizontal_divisor` pixels, each zone's multiplier is chosen so
//! that a uniformly colored zone weighs as much as the zone it surrounds,
//! plus one. A color that fills the frame of an image therefore beats one
//! that fills only its middle. Per pixel, a corner always weighs more than a
//! border and a border more than the interior. See [`Multipliers::compute`].
//!
//! ## Grouping
//!
//! A group is compared by the LAB value of the color that founded it, never
//! by an average, so groups do not drift as samples arrive. Within a group
//! up to four exact colors are tracked; the heaviest becomes the result.

pub mod api;
pub mod color;
pub mod engine;
pub mod pixels;
pub mod registry;


pub use api::{AccentPicker, BorderAxis, ConfigError, PickError};
pub use color::{ciede2000, rgb_to_lab, Lab, ParseColorError, Rgb};
pub use engine::{
    worker_count, BorderSize, Callback, CurrentThread, ElasticPool, Executor, ExecutorError,
    Job, Multipliers, PoolConfig, Request, Settings, Zone,
};
pub use pixels::{PixelBufferError, PixelSource, RgbImage};
pub use registry::{BoundedList, ColorGroup, ColorRegistry, GroupMember, REGISTRY_CAPACITY};
