//! CIELAB color space and the CIEDE2000 color difference
//!
//! Grouping decisions compare colors in CIELAB using CIEDE2000, which
//! accounts for the non-uniform sensitivity of human vision across hue,
//! lightness and chroma far better than Euclidean RGB distance.
//!
//! # References
//!
//! G. Sharma, W. Wu, E. N. Dalal, "The CIEDE2000 Color-Difference Formula:
//! Implementation Notes, Supplementary Test Data, and Mathematical
//! Observations", Color Research & Application, 2005.

use std::f64::consts::PI;

use super::lut::srgb8_to_linear;
use super::rgb::Rgb;

/// D65 reference white (X, Y, Z).
const D65: [f64; 3] = [0.950470, 1.0, 1.088830];

/// 25^7, the chroma normalisation constant of CIEDE2000.
const POW25_7: f64 = 6_103_515_625.0;

/// A color in CIELAB (D65).
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIEDE2000 difference to `other`. See [`ciede2000`].
    #[inline]
    pub fn distance(self, other: Lab) -> f64 {
        ciede2000(self, other)
    }
}

impl From<Rgb> for Lab {
    fn from(rgb: Rgb) -> Self {
        rgb_to_lab(rgb)
    }
}

/// CIE XYZ to CIELAB companding function.
#[inline]
fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787037 * t + 4.0 / 29.0
    }
}

/// Convert an 8-bit sRGB color to CIELAB.
///
/// sRGB is linearized (IEC 61966-2-1), mapped to CIE XYZ and normalized by
/// the D65 reference white, then mapped to L*a*b*.
///
/// # Example
///
/// ```
/// use accent_color::{rgb_to_lab, Rgb};
///
/// let white = rgb_to_lab(Rgb::WHITE);
/// assert!((white.l - 100.0).abs() < 1e-3);
/// assert!(white.a.abs() < 1e-2 && white.b.abs() < 1e-2);
/// ```
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    let r = srgb8_to_linear(rgb.red());
    let g = srgb8_to_linear(rgb.green());
    let b = srgb8_to_linear(rgb.blue());

    let x = (0.4124564 * r + 0.3575761 * g + 0.1804375 * b) / D65[0];
    let y = (0.2126729 * r + 0.7151522 * g + 0.0721750 * b) / D65[1];
    let z = (0.0193339 * r + 0.1191920 * g + 0.9503041 * b) / D65[2];

    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Hue angle of (a', b) in radians, normalized to [0, 2π).
#[inline]
fn hue_angle(a: f64, b: f64) -> f64 {
    let h = b.atan2(a);
    if h < 0.0 {
        h + 2.0 * PI
    } else {
        h
    }
}

/// CIEDE2000 color difference with kL = kC = kH = 1.
///
/// Symmetric in its arguments and zero for identical inputs. When either
/// color has zero chroma the hue difference is zero and the mean hue is the
/// sum of the two hue angles.
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    let Lab { l: l1, a: a1, b: b1 } = lab1;
    let Lab { l: l2, a: a2, b: b2 } = lab2;

    let c_ab = 0.5 * (a1.hypot(b1) + a2.hypot(b2));
    let c_ab7 = c_ab.powi(7);
    let g = 0.5 * (1.0 - (c_ab7 / (c_ab7 + POW25_7)).sqrt());

    let ap1 = (1.0 + g) * a1;
    let ap2 = (1.0 + g) * a2;
    let cp1 = ap1.hypot(b1);
    let cp2 = ap2.hypot(b2);
    let cp_prod = cp1 * cp2;

    let hp1 = hue_angle(ap1, b1);
    let hp2 = hue_angle(ap2, b2);

    let dl = l2 - l1;
    let dc = cp2 - cp1;
    let mut dhp = hp2 - hp1;
    if dhp > PI {
        dhp -= 2.0 * PI;
    }
    if dhp < -PI {
        dhp += 2.0 * PI;
    }
    if cp_prod == 0.0 {
        dhp = 0.0;
    }
    // Signed hue difference
    let dh = 2.0 * cp_prod.sqrt() * (dhp / 2.0).sin();

    let lp = 0.5 * (l1 + l2);
    let cp = 0.5 * (cp1 + cp2);

    let mut hp = 0.5 * (hp1 + hp2);
    if (hp1 - hp2).abs() > PI {
        hp -= PI;
    }
    if hp < 0.0 {
        hp += 2.0 * PI;
    }
    if cp_prod == 0.0 {
        hp = hp1 + hp2;
    }

    let lpm50_sq = (lp - 50.0) * (lp - 50.0);
    let sl = 1.0 + (0.015 * lpm50_sq) / (20.0 + lpm50_sq).sqrt();
    let sc = 1.0 + 0.045 * cp;
    let t = 1.0 - 0.17 * (hp - PI / 6.0).cos()
        + 0.24 * (2.0 * hp).cos()
        + 0.32 * (3.0 * hp + PI / 30.0).cos()
        - 0.20 * (4.0 * hp - 63.0 * PI / 180.0).cos();
    let sh = 1.0 + 0.015 * cp * t;

    let ex = (hp.to_degrees() - 275.0) / 25.0;
    let delta_theta = (30.0 * PI / 180.0) * (-(ex * ex)).exp();
    let cp7 = cp.powi(7);
    let rc = 2.0 * (cp7 / (cp7 + POW25_7)).sqrt();
    let rt = -(2.0 * delta_theta).sin() * rc;

    let dl = dl / sl;
    let dc = dc / sc;
    let dh = dh / sh;

    (dl * dl + dc * dc + dh * dh + rt * dc * dh).sqrt()
}
