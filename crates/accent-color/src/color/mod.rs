//! Color types and conversion utilities
//!
//! This module provides the two color representations the extraction engine
//! works with:
//!
//! - **Rgb**: packed 24-bit sRGB as read from a bitmap. Used for I/O and as
//!   the identity of a color inside a group.
//! - **Lab**: CIELAB (D65) coordinates. Used only for perceptual comparison
//!   via the CIEDE2000 formula.
//!
//! # Example
//!
//! ```
//! use accent_color::{ciede2000, Lab, Rgb};
//!
//! let red = Lab::from(Rgb::from_u8(255, 0, 0));
//! let orange = Lab::from(Rgb::from_u8(255, 128, 0));
//!
//! assert_eq!(ciede2000(red, red), 0.0);
//! assert!(ciede2000(red, orange) > 20.0);
//! ```

mod error;
mod lab;
mod lut;
mod rgb;

pub use error::ParseColorError;
pub use lab::{ciede2000, rgb_to_lab, Lab};
pub use rgb::Rgb;
