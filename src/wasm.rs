//! WebAssembly exports for pixkit transformations.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images travel
//! as flat `Uint8Array` buffers in row-major order with 1 (grayscale) or 3
//! (color) channels; every export validates the buffer the same way the Rust
//! API does and throws a JS `Error` on failure.

use ndarray::{Array2, Array3};
use wasm_bindgen::prelude::*;

use crate::array::{Mode, ValidImage, COLOR_CHANNELS};
use crate::error::{Error, Result};
use crate::filters::{apply, element_wise, histogram};
use crate::validate::validate;

fn to_image(data: &[u8], width: usize, height: usize, channels: usize) -> Result<ValidImage<'static>> {
    if channels != 1 && channels != COLOR_CHANNELS {
        return Err(Error::Parameter(format!("channels must be 1 or 3, got {channels}")));
    }
    let expected = height
        .checked_mul(width)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| Error::Parameter(format!("image size {width}x{height}x{channels} overflows")))?;
    if data.len() != expected {
        return Err(Error::Parameter(format!(
            "buffer of {} bytes does not match {width}x{height}x{channels} ({expected} bytes)",
            data.len()
        )));
    }

    let data = data.to_vec();
    let shape_err = |e: ndarray::ShapeError| Error::Parameter(e.to_string());
    if channels == 1 {
        validate(Array2::from_shape_vec((height, width), data).map_err(shape_err)?, Mode::Gray, false)
    } else {
        validate(
            Array3::from_shape_vec((height, width, COLOR_CHANNELS), data).map_err(shape_err)?,
            Mode::Color,
            false,
        )
    }
}

fn to_buffer(image: ValidImage<'_>) -> Vec<u8> {
    image.into_array().into_raw_vec_and_offset().0
}

// ============================================================================
// Scalar Functions
// ============================================================================

#[wasm_bindgen]
pub fn pixel_expansion_wasm(pixel: i32, low_limit: i32, high_limit: i32) -> std::result::Result<u8, JsError> {
    Ok(element_wise::pixel_expansion(pixel.into(), low_limit.into(), high_limit.into())?)
}

#[wasm_bindgen]
pub fn pixel_thresholding_wasm(pixel: i32, t: i32, a: i32) -> std::result::Result<u8, JsError> {
    Ok(element_wise::pixel_thresholding(pixel.into(), t.into(), a.into())?)
}

#[wasm_bindgen]
pub fn pixel_digital_negative_wasm(pixel: i32) -> std::result::Result<u8, JsError> {
    Ok(element_wise::pixel_digital_negative(pixel.into())?)
}

// ============================================================================
// Image Transformations
// ============================================================================

/// Contrast expansion over a flat image buffer.
///
/// # Arguments
/// * `data` - Flat array of bytes (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1 for grayscale, 3 for color
/// * `low_limit` - Lower limit (0-255)
/// * `high_limit` - Upper limit (0-255)
///
/// # Returns
/// Flat array of transformed bytes with the same layout
#[wasm_bindgen]
pub fn contrast_expansion_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    low_limit: i32,
    high_limit: i32,
) -> std::result::Result<Vec<u8>, JsError> {
    let image = to_image(data, width, height, channels)?;
    let out = apply::contrast_expansion(&image, low_limit.into(), high_limit.into())?;
    Ok(to_buffer(out))
}

/// Binary threshold over a flat image buffer.
#[wasm_bindgen]
pub fn thresholding_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    t: i32,
    a: i32,
) -> std::result::Result<Vec<u8>, JsError> {
    let image = to_image(data, width, height, channels)?;
    let out = apply::thresholding(&image, t.into(), a.into())?;
    Ok(to_buffer(out))
}

/// Digital negative over a flat image buffer.
#[wasm_bindgen]
pub fn digital_negative_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
) -> std::result::Result<Vec<u8>, JsError> {
    let image = to_image(data, width, height, channels)?;
    Ok(to_buffer(apply::digital_negative(&image)))
}

// ============================================================================
// Histogram
// ============================================================================

/// Histogram of a flat intensity buffer, one count per bin.
#[wasm_bindgen]
pub fn histogram_wasm(data: &[u8], bins: usize) -> std::result::Result<Vec<u32>, JsError> {
    let counts = histogram::histogram(data.iter().copied(), bins)?;
    Ok(counts.iter().map(|&c| c as u32).collect())
}
