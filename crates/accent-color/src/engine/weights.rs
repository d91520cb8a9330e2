//! Positional weighting
//!
//! The image is split into an interior, four border bands and four corner
//! squares. Each zone gets a multiplier so that a uniformly colored zone
//! weighs as much as the zone it surrounds, plus one. Border bands and
//! corners are much smaller than the interior, so a single pixel there
//! counts for more than an interior pixel.
//!
//! Small or thin geometries can push that ratio below one (a band wider
//! than the area it surrounds, or no interior at all). The multipliers are
//! then raised so that a border pixel always outweighs an interior pixel
//! and a corner pixel always outweighs a border pixel.

/// Width of the left/right bands and height of the top/bottom bands, in
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderSize {
    pub width: u32,
    pub height: u32,
}

/// Which weighting zone a pixel falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Interior,
    Border,
    Corner,
}

/// Per-zone weight multipliers for one image geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub base: f64,
    pub border: f64,
    pub corner: f64,
}

/// Zone areas of zero are counted as one unit so the ratios stay finite.
#[inline]
fn unit_area(area: f64) -> f64 {
    if area == 0.0 {
        1.0
    } else {
        area
    }
}

impl Multipliers {
    /// Derive the multipliers for a `width` × `height` image with the given
    /// border band sizes.
    ///
    /// ```text
    /// inner_w = width  - 2 * border_width
    /// inner_h = height - 2 * border_height
    /// base    = 1
    /// border  = (base * inner_h * inner_w + 1) / (2 * (inner_h * border_height + inner_w * border_width))
    /// corner  = (border * (inner_w * border_height + inner_h * border_width) + 1) / (2 * border_height * border_width)
    /// ```
    ///
    /// The result always satisfies `base < border < corner`: `border` is at
    /// least `base + 1` and `corner` at least `border + 1`.
    pub fn compute(border_width: u32, border_height: u32, width: u32, height: u32) -> Self {
        let bw = f64::from(border_width);
        let bh = f64::from(border_height);
        let inner_w = f64::from(width) - 2.0 * bw;
        let inner_h = f64::from(height) - 2.0 * bh;

        let base = 1.0;
        let border = ((base * inner_h * inner_w + 1.0)
            / unit_area(2.0 * (inner_h * bh + inner_w * bw)))
        .max(base + 1.0);
        let corner = ((border * (inner_w * bh + inner_h * bw) + 1.0) / unit_area(2.0 * bh * bw))
            .max(border + 1.0);

        Self {
            base,
            border,
            corner,
        }
    }

    /// Weight of the pixel at (`x`, `y`).
    #[inline]
    pub fn zone_weight(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        border_width: u32,
        border_height: u32,
    ) -> f64 {
        match Zone::of(x, y, width, height, border_width, border_height) {
            Zone::Interior => self.base,
            Zone::Border => self.border,
            Zone::Corner => self.corner,
        }
    }
}

impl Zone {
    /// Classify a pixel. All comparisons are strict, so the rows and columns
    /// exactly on a band boundary count as border.
    pub fn of(x: u32, y: u32, width: u32, height: u32, border_width: u32, border_height: u32) -> Zone {
        let (x, y) = (i64::from(x), i64::from(y));
        let (w, h) = (i64::from(width), i64::from(height));
        let (bw, bh) = (i64::from(border_width), i64::from(border_height));

        let left = x < bw;
        let right = x > w - bw;
        let top = y < bh;
        let bottom = y > h - bh;

        // The bottom-left corner takes the same `x < bw` test as the other
        // three; `x > bw` there would tag nearly the whole bottom band.
        if (left || right) && (top || bottom) {
            Zone::Corner
        } else if x > bw && y > bh && x < w - bw && y < h - bh {
            Zone::Interior
        } else {
            Zone::Border
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_multipliers_100x100_divisor_16() {
        // 100 / 16 = 6, inner 88x88
        let m = Multipliers::compute(6, 6, 100, 100);
        assert_eq!(m.base, 1.0);
        assert_close(m.border, (88.0 * 88.0 + 1.0) / (2.0 * (88.0 * 6.0 + 88.0 * 6.0)));
        assert_close(m.corner, (m.border * (88.0 * 6.0 + 88.0 * 6.0) + 1.0) / (2.0 * 36.0));
        assert!(m.border > m.base);
        assert!(m.corner > m.border);
    }

    #[test]
    fn test_multipliers_zero_border_stay_finite() {
        let m = Multipliers::compute(0, 0, 10, 3);
        assert_eq!(m.base, 1.0);
        // border area 0 -> denominator 1
        assert_close(m.border, 31.0);
        // corner area 0 gives 1, raised above the border
        assert_close(m.corner, 32.0);
        assert!(m.border.is_finite() && m.corner.is_finite());
    }

    #[test]
    fn test_multipliers_no_interior() {
        // 10x10 with bands of 5: interior area is zero, the formula alone
        // would give border 1 and corner 0.02
        let m = Multipliers::compute(5, 5, 10, 10);
        assert_close(m.border, 2.0);
        assert_close(m.corner, 3.0);
    }

    #[test]
    fn test_multipliers_wide_bands_keep_ordering() {
        // 40 / 4 = 10 pixel bands around a 20x20 interior: the raw border
        // ratio is about 0.5
        let m = Multipliers::compute(10, 10, 40, 40);
        assert_close(m.border, 2.0);
        assert_close(m.corner, (2.0 * 400.0 + 1.0) / 200.0);
    }

    /// If this breaks, it means: some geometry lets a border pixel weigh less
    /// than an interior pixel, or a corner less than a border.
    #[test]
    fn test_multipliers_ordering_for_all_small_geometries() {
        for width in 1..=24u32 {
            for height in 1..=24u32 {
                for divisor in 2..=8u32 {
                    let m = Multipliers::compute(width / divisor, height / divisor, width, height);
                    assert!(
                        m.base < m.border && m.border < m.corner,
                        "{width}x{height}/{divisor}: {m:?}"
                    );
                    assert!(m.corner.is_finite());
                }
            }
        }
    }

    #[test]
    fn test_zone_classification() {
        let (w, h, bw, bh) = (100, 100, 6, 6);
        assert_eq!(Zone::of(50, 50, w, h, bw, bh), Zone::Interior);
        assert_eq!(Zone::of(0, 0, w, h, bw, bh), Zone::Corner);
        assert_eq!(Zone::of(99, 0, w, h, bw, bh), Zone::Corner);
        assert_eq!(Zone::of(0, 99, w, h, bw, bh), Zone::Corner);
        assert_eq!(Zone::of(99, 99, w, h, bw, bh), Zone::Corner);
        assert_eq!(Zone::of(2, 50, w, h, bw, bh), Zone::Border);
        assert_eq!(Zone::of(50, 97, w, h, bw, bh), Zone::Border);
        // boundary lines are border, not interior
        assert_eq!(Zone::of(6, 50, w, h, bw, bh), Zone::Border);
        assert_eq!(Zone::of(50, 94, w, h, bw, bh), Zone::Border);
        assert_eq!(Zone::of(6, 6, w, h, bw, bh), Zone::Border);
        assert_eq!(Zone::of(7, 7, w, h, bw, bh), Zone::Interior);
    }

    #[test]
    fn test_bottom_left_corner_is_left_side_only() {
        let (w, h, bw, bh) = (100, 100, 6, 6);
        assert_eq!(Zone::of(3, 98, w, h, bw, bh), Zone::Corner);
        assert_eq!(Zone::of(50, 98, w, h, bw, bh), Zone::Border);
    }

    #[test]
    fn test_zone_weight_uses_multipliers() {
        let m = Multipliers::compute(6, 6, 100, 100);
        assert_eq!(m.zone_weight(50, 50, 100, 100, 6, 6), m.base);
        assert_eq!(m.zone_weight(50, 1, 100, 100, 6, 6), m.border);
        assert_eq!(m.zone_weight(1, 1, 100, 100, 6, 6), m.corner);
    }

    #[test]
    fn test_zero_border_has_no_corners() {
        let (w, h) = (10, 3);
        for y in 0..h {
            for x in 0..w {
                assert_ne!(Zone::of(x, y, w, h, 0, 0), Zone::Corner);
            }
        }
        assert_eq!(Zone::of(0, 1, w, h, 0, 0), Zone::Border);
        assert_eq!(Zone::of(5, 1, w, h, 0, 0), Zone::Interior);
    }
}
