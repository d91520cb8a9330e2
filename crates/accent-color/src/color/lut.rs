//! Gamma lookup table for 8-bit sRGB channels
//!
//! The table is generated at compile time by build.rs from the exact
//! IEC 61966-2-1 formula, so a lookup is bit-identical to evaluating it.

include!(concat!(env!("OUT_DIR"), "/srgb8_lut.rs"));

/// Convert an 8-bit sRGB channel value to linear light (0.0..=1.0).
#[inline]
pub fn srgb8_to_linear(channel: u8) -> f64 {
    SRGB8_TO_LINEAR[channel as usize]
}
