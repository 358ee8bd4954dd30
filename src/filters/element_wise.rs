//! Element-wise pixel transformations: Contrast Expansion, Thresholding,
//! Digital Negative.
//!
//! Every transformation is a pure map from one 8-bit level to another.
//! Each one comes in two forms:
//! - a checked scalar function taking raw integers (`pixel_expansion`, ...),
//!   which reports the offending parameter by name
//! - a validated value type implementing [`PixelMap`], which checks its
//!   parameters once on construction and then maps infallibly
//!
//! Array versions live in [`crate::filters::apply`].

use crate::error::{Error, Result};

/// Lowest legal intensity level.
pub const MIN_LEVEL: i64 = 0;
/// Highest legal intensity level.
pub const MAX_LEVEL: i64 = 255;

/// Check that `value` is a legal intensity level.
///
/// # Arguments
/// * `name` - Parameter name reported in the error
/// * `value` - Raw value
pub fn level(name: &'static str, value: i64) -> Result<u8> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&value) {
        Ok(value as u8)
    } else {
        Err(Error::OutOfRange { name, value })
    }
}

/// A scalar map from one 8-bit level to another.
pub trait PixelMap: Sync {
    fn map(&self, pixel: u8) -> u8;

    /// Lookup table holding `map(v)` at index `v`.
    fn lut(&self) -> [u8; 256] {
        std::array::from_fn(|v| self.map(v as u8))
    }
}

// ============================================================================
// Contrast Expansion
// ============================================================================

/// Linear stretch of the open interval (`low_limit`, `high_limit`) onto 0-255.
///
/// Levels at or outside the limits pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContrastExpansion {
    low_limit: u8,
    high_limit: u8,
}

impl ContrastExpansion {
    pub fn new(low_limit: u8, high_limit: u8) -> Result<Self> {
        if low_limit >= high_limit {
            return Err(Error::LimitOrder { low_limit, high_limit });
        }
        Ok(Self { low_limit, high_limit })
    }

    pub fn low_limit(&self) -> u8 {
        self.low_limit
    }

    pub fn high_limit(&self) -> u8 {
        self.high_limit
    }
}

impl PixelMap for ContrastExpansion {
    fn map(&self, pixel: u8) -> u8 {
        if self.low_limit < pixel && pixel < self.high_limit {
            let scale = 255.0 / f64::from(self.high_limit - self.low_limit);
            // truncation toward zero, 101 in (100, 110) gives 25
            (scale * f64::from(pixel - self.low_limit)).clamp(0.0, 255.0) as u8
        } else {
            pixel
        }
    }
}

/// Contrast expansion of a single pixel.
///
/// # Arguments
/// * `pixel` - Input level (0-255)
/// * `low_limit` - Lower limit of the stretched interval (0-255)
/// * `high_limit` - Upper limit of the stretched interval (0-255), strictly
///   greater than `low_limit`
///
/// # Returns
/// `255 / (high_limit - low_limit) * (pixel - low_limit)` truncated, when
/// `low_limit < pixel < high_limit`; otherwise `pixel`.
pub fn pixel_expansion(pixel: i64, low_limit: i64, high_limit: i64) -> Result<u8> {
    let pixel = level("pixel", pixel)?;
    let low_limit = level("low_limit", low_limit)?;
    let high_limit = level("high_limit", high_limit)?;
    Ok(ContrastExpansion::new(low_limit, high_limit)?.map(pixel))
}

// ============================================================================
// Thresholding
// ============================================================================

/// Binary threshold: levels strictly above `threshold` become `level`,
/// everything else becomes 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold {
    threshold: u8,
    level: u8,
}

impl Threshold {
    pub fn new(threshold: u8, level: u8) -> Self {
        Self { threshold, level }
    }
}

impl PixelMap for Threshold {
    fn map(&self, pixel: u8) -> u8 {
        if pixel > self.threshold {
            self.level
        } else {
            0
        }
    }
}

/// Threshold a single pixel.
///
/// # Arguments
/// * `pixel` - Input level (0-255)
/// * `t` - Threshold (0-255); `pixel == t` maps to 0
/// * `a` - Output level for pixels above the threshold (0-255)
pub fn pixel_thresholding(pixel: i64, t: i64, a: i64) -> Result<u8> {
    let pixel = level("pixel", pixel)?;
    let t = level("T", t)?;
    let a = level("A", a)?;
    Ok(Threshold::new(t, a).map(pixel))
}

// ============================================================================
// Digital Negative
// ============================================================================

/// Intensity inversion, `255 - pixel`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitalNegative;

impl PixelMap for DigitalNegative {
    fn map(&self, pixel: u8) -> u8 {
        u8::MAX - pixel
    }
}

/// Digital negative of a single pixel.
pub fn pixel_digital_negative(pixel: i64) -> Result<u8> {
    Ok(DigitalNegative.map(level("pixel", pixel)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // ========================================================================
    // Contrast Expansion
    // ========================================================================

    #[rstest]
    #[case(99, 100, 110, 99)]
    #[case(100, 100, 110, 100)]
    #[case(101, 100, 110, 25)]
    #[case(109, 100, 110, 229)]
    #[case(110, 100, 110, 110)]
    #[case(111, 100, 110, 111)]
    #[case(0, 0, 255, 0)]
    #[case(255, 0, 255, 255)]
    fn test_pixel_expansion(
        #[case] pixel: i64,
        #[case] low: i64,
        #[case] high: i64,
        #[case] expected: u8,
    ) {
        assert_eq!(pixel_expansion(pixel, low, high).unwrap(), expected);
    }

    #[rstest]
    #[case(-1, 100, 110, "pixel", -1)]
    #[case(256, 100, 110, "pixel", 256)]
    #[case(101, -1, 110, "low_limit", -1)]
    #[case(101, 256, 110, "low_limit", 256)]
    #[case(101, 100, -1, "high_limit", -1)]
    #[case(101, 100, 256, "high_limit", 256)]
    fn test_pixel_expansion_out_of_range(
        #[case] pixel: i64,
        #[case] low: i64,
        #[case] high: i64,
        #[case] name: &str,
        #[case] value: i64,
    ) {
        let err = pixel_expansion(pixel, low, high).unwrap_err();
        assert!(
            matches!(err, Error::OutOfRange { name: n, value: v } if n == name && v == value),
            "{err}"
        );
        assert!(err.to_string().contains("range 0 to 255"));
    }

    #[rstest]
    #[case(110, 110)]
    #[case(111, 110)]
    fn test_pixel_expansion_limit_order(#[case] low: i64, #[case] high: i64) {
        let err = pixel_expansion(101, low, high).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, Error::LimitOrder { .. }));
        assert!(msg.contains("must be strictly less"));
        assert!(msg.contains(&format!("low_limit={low}, high_limit={high}")));
    }

    #[test]
    fn test_pixel_expansion_range_checked_before_order() {
        // both problems present, the range error is reported
        let err = pixel_expansion(300, 110, 100).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { name: "pixel", .. }));
    }

    #[test]
    fn test_expansion_matches_linear_map() {
        for low in (0u8..255).step_by(7) {
            for high in ((low + 1)..=255).step_by(11) {
                let map = ContrastExpansion::new(low, high).unwrap();
                for pixel in 0..=255u8 {
                    let got = map.map(pixel);
                    if low < pixel && pixel < high {
                        let expected = (255.0 / f64::from(high - low) * f64::from(pixel - low))
                            .clamp(0.0, 255.0) as u8;
                        assert_eq!(got, expected, "pixel={pixel} low={low} high={high}");
                    } else {
                        assert_eq!(got, pixel);
                    }
                }
            }
        }
    }

    #[test]
    fn test_expansion_keeps_limits() {
        let map = ContrastExpansion::new(40, 200).unwrap();
        assert_eq!(map.low_limit(), 40);
        assert_eq!(map.high_limit(), 200);
        assert!(matches!(
            ContrastExpansion::new(200, 40),
            Err(Error::LimitOrder { low_limit: 200, high_limit: 40 })
        ));
    }

    #[test]
    fn test_expansion_lut_matches_map() {
        let map = ContrastExpansion::new(40, 200).unwrap();
        let lut = map.lut();
        for v in 0..=255u8 {
            assert_eq!(lut[v as usize], map.map(v));
        }
    }

    // ========================================================================
    // Thresholding
    // ========================================================================

    #[rstest]
    #[case(0, 0, 255, 0)]
    #[case(0, 1, 255, 0)]
    #[case(255, 127, 255, 255)]
    #[case(255, 255, 100, 0)]
    #[case(254, 255, 200, 0)]
    #[case(128, 127, 255, 255)]
    #[case(127, 127, 255, 0)]
    #[case(126, 127, 200, 0)]
    #[case(200, 100, 123, 123)]
    fn test_pixel_thresholding(
        #[case] pixel: i64,
        #[case] t: i64,
        #[case] a: i64,
        #[case] expected: u8,
    ) {
        assert_eq!(pixel_thresholding(pixel, t, a).unwrap(), expected);
    }

    #[rstest]
    #[case(-1, 127, 255, "pixel")]
    #[case(256, 127, 255, "pixel")]
    #[case(128, -5, 255, "T")]
    #[case(128, 300, 255, "T")]
    #[case(128, 127, -10, "A")]
    #[case(128, 127, 999, "A")]
    fn test_pixel_thresholding_out_of_range(
        #[case] pixel: i64,
        #[case] t: i64,
        #[case] a: i64,
        #[case] name: &str,
    ) {
        let err = pixel_thresholding(pixel, t, a).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { name: n, .. } if n == name));
        assert!(err.to_string().contains("in the range 0 to 255"));
    }

    #[test]
    fn test_thresholding_binary_and_monotonic() {
        for t in (0..=255u8).step_by(15) {
            for a in [0u8, 1, 128, 255] {
                let map = Threshold::new(t, a);
                let mut previous = 0u8;
                for pixel in 0..=255u8 {
                    let out = map.map(pixel);
                    assert!(out == 0 || out == a);
                    assert!(out >= previous);
                    previous = out;
                }
            }
        }
    }

    // ========================================================================
    // Digital Negative
    // ========================================================================

    #[rstest]
    #[case(0, 255)]
    #[case(255, 0)]
    #[case(100, 155)]
    #[case(128, 127)]
    fn test_pixel_digital_negative(#[case] pixel: i64, #[case] expected: u8) {
        assert_eq!(pixel_digital_negative(pixel).unwrap(), expected);
    }

    #[rstest]
    #[case(-1)]
    #[case(256)]
    fn test_pixel_digital_negative_out_of_range(#[case] pixel: i64) {
        let err = pixel_digital_negative(pixel).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { name: "pixel", value } if value == pixel));
    }

    #[test]
    fn test_digital_negative_involution() {
        for pixel in 0..=255u8 {
            assert_eq!(DigitalNegative.map(DigitalNegative.map(pixel)), pixel);
        }
    }
}
