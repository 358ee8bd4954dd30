//! Image array validation.
//!
//! Decides whether a raw array is a legal 8-bit image under a [`Mode`]:
//! - dtype is checked first, only `uint8` passes
//! - grayscale is (H, W), color is (H, W, 3)
//! - a grayscale array may be promoted to color by replicating its channel,
//!   but only when the caller asks for it

use log::debug;
use ndarray::{Array3, ArrayView2, CowArray, Dimension, Ix2, Ix3, IxDyn};

use crate::array::{Mode, PixelArray, ValidImage, COLOR_CHANNELS, COLOR_NDIM, GRAY_NDIM};
use crate::error::{Error, Result};

/// Validate an array as an image under `mode`.
///
/// # Arguments
/// * `array` - Raw array, borrowed or owned, of any supported encoding
/// * `mode` - Accepted layouts
/// * `auto_convert` - Allow promoting a grayscale array when `mode` is color
///
/// # Returns
/// The same data wrapped as a [`ValidImage`], or a newly allocated
/// (H, W, 3) image when a grayscale array was promoted.
pub fn validate<'a>(
    array: impl Into<PixelArray<'a>>,
    mode: Mode,
    auto_convert: bool,
) -> Result<ValidImage<'a>> {
    let array = match array.into() {
        PixelArray::U8(a) => a,
        other => return Err(Error::Dtype(other.dtype().name().to_string())),
    };

    let shape = array.shape().to_vec();
    match shape.len() {
        GRAY_NDIM => {
            let gray = fix_dim::<Ix2>(array, mode)?;
            if mode.accepts_gray() {
                Ok(ValidImage::gray(gray))
            } else if auto_convert {
                debug!("promoting {shape:?} grayscale array to {COLOR_CHANNELS} channels");
                Ok(ValidImage::color(CowArray::from(gray_to_color(gray.view()))))
            } else {
                Err(shape_error(
                    shape,
                    mode,
                    "grayscale array requires auto_convert to be used as color",
                ))
            }
        }
        COLOR_NDIM if shape[2] == COLOR_CHANNELS => {
            if mode.accepts_color() {
                Ok(ValidImage::color(fix_dim::<Ix3>(array, mode)?))
            } else {
                Err(shape_error(shape, mode, "color arrays are never converted to grayscale"))
            }
        }
        COLOR_NDIM => Err(shape_error(shape, mode, "color images must have exactly 3 channels")),
        _ => Err(shape_error(
            shape,
            mode,
            "images must have 2 (grayscale) or 3 (color) dimensions",
        )),
    }
}

/// Replicate a single channel into three identical channels.
pub fn gray_to_color(gray: ArrayView2<u8>) -> Array3<u8> {
    let (height, width) = gray.dim();
    Array3::from_shape_fn((height, width, COLOR_CHANNELS), |(y, x, _)| gray[[y, x]])
}

fn fix_dim<D: Dimension>(array: CowArray<'_, u8, IxDyn>, mode: Mode) -> Result<CowArray<'_, u8, D>> {
    let shape = array.shape().to_vec();
    array
        .into_dimensionality::<D>()
        .map_err(|_| shape_error(shape, mode, "unexpected dimensionality"))
}

fn shape_error(shape: Vec<usize>, mode: Mode, reason: &'static str) -> Error {
    Error::Shape { shape, mode, reason }
}
