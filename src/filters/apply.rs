//! Lifting scalar pixel maps onto whole images.
//!
//! The map is evaluated once per level into a lookup table, then applied to
//! every sample in parallel. Results are identical to calling
//! [`PixelMap::map`] per sample.

use log::trace;
use ndarray::{Array, CowArray, Dimension};
use rayon::prelude::*;

use crate::array::{Layout, ValidImage};
use crate::error::Result;
use crate::filters::element_wise::{level, ContrastExpansion, DigitalNegative, PixelMap, Threshold};

/// Apply `map` to every sample, producing a new owned image of the same kind
/// and shape. The input is never modified.
pub fn apply_map<M: PixelMap + ?Sized>(image: &ValidImage<'_>, map: &M) -> ValidImage<'static> {
    let lut = map.lut();
    trace!("applying pixel map to {:?} image", image.shape());
    match &image.0 {
        Layout::Gray(a) => ValidImage::gray(CowArray::from(map_samples(a.to_owned(), &lut))),
        Layout::Color(a) => ValidImage::color(CowArray::from(map_samples(a.to_owned(), &lut))),
    }
}

fn map_samples<D: Dimension>(mut output: Array<u8, D>, lut: &[u8; 256]) -> Array<u8, D> {
    // freshly owned arrays are contiguous; fall back to serial just in case
    match output.as_slice_memory_order_mut() {
        Some(samples) => samples.par_iter_mut().for_each(|v| *v = lut[*v as usize]),
        None => output.mapv_inplace(|v| lut[v as usize]),
    }
    output
}

/// Contrast expansion of every sample.
///
/// # Arguments
/// * `image` - Validated grayscale or color image
/// * `low_limit` - Lower limit (0-255)
/// * `high_limit` - Upper limit (0-255), strictly greater than `low_limit`
pub fn contrast_expansion(image: &ValidImage<'_>, low_limit: i64, high_limit: i64) -> Result<ValidImage<'static>> {
    let map = ContrastExpansion::new(level("low_limit", low_limit)?, level("high_limit", high_limit)?)?;
    Ok(apply_map(image, &map))
}

/// Threshold every sample: above `t` becomes `a`, the rest 0.
pub fn thresholding(image: &ValidImage<'_>, t: i64, a: i64) -> Result<ValidImage<'static>> {
    let map = Threshold::new(level("T", t)?, level("A", a)?);
    Ok(apply_map(image, &map))
}

/// Digital negative of every sample.
pub fn digital_negative(image: &ValidImage<'_>) -> ValidImage<'static> {
    apply_map(image, &DigitalNegative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Mode;
    use crate::error::Error;
    use crate::filters::element_wise::{pixel_expansion, pixel_thresholding};
    use crate::validate::validate;
    use ndarray::{s, Array2, Array3};

    fn ramp() -> Array2<u8> {
        Array2::from_shape_fn((16, 16), |(y, x)| (y * 16 + x) as u8)
    }

    #[test]
    fn test_contrast_expansion_matches_scalar() {
        let img = ramp();
        let image = validate(img.view(), Mode::Gray, false).unwrap();

        let out = contrast_expansion(&image, 100, 110).unwrap();

        assert!(out.is_gray());
        assert_eq!(out.shape(), &[16, 16]);
        for (&src, &dst) in img.iter().zip(out.view().iter()) {
            assert_eq!(dst, pixel_expansion(i64::from(src), 100, 110).unwrap());
        }
        // original untouched
        assert_eq!(img[[6, 5]], 101);
    }

    #[test]
    fn test_thresholding_color_matches_scalar() {
        let img = Array3::from_shape_fn((4, 5, 3), |(y, x, c)| (y * 60 + x * 10 + c) as u8);
        let image = validate(img.view(), Mode::Color, false).unwrap();

        let out = thresholding(&image, 127, 200).unwrap();

        assert!(out.is_color());
        for (&src, &dst) in img.iter().zip(out.view().iter()) {
            assert_eq!(dst, pixel_thresholding(i64::from(src), 127, 200).unwrap());
        }
    }

    #[test]
    fn test_digital_negative_twice_restores() {
        let img = ramp();
        let image = validate(img.view(), Mode::Any, false).unwrap();

        let once = digital_negative(&image);
        let twice = digital_negative(&once);

        assert_eq!(once.view()[[0, 0]], 255);
        assert_eq!(twice.view(), img.view().into_dyn());
    }

    #[test]
    fn test_apply_map_non_contiguous_input() {
        let img = ramp();
        let strided = img.slice(s![.., ..;2]);
        let image = validate(strided.view(), Mode::Gray, false).unwrap();

        let out = digital_negative(&image);

        assert_eq!(out.shape(), &[16, 8]);
        for (&src, &dst) in strided.iter().zip(out.view().iter()) {
            assert_eq!(dst, 255 - src);
        }
    }

    #[test]
    fn test_array_params_validated() {
        let img = ramp();
        let image = validate(img.view(), Mode::Gray, false).unwrap();

        assert!(matches!(
            contrast_expansion(&image, 120, 110),
            Err(Error::LimitOrder { low_limit: 120, high_limit: 110 })
        ));
        assert!(matches!(
            thresholding(&image, 300, 1),
            Err(Error::OutOfRange { name: "T", value: 300 })
        ));
    }
}
