//! Image loading: decode from a path or take a caller's array, then validate.
//!
//! Decoding itself is delegated to a [`Decoder`]. With the `image-io` feature
//! (on by default) [`ImageCrateDecoder`] reads PNG and JPEG files through the
//! `image` crate.

use std::io;
use std::path::Path;

use log::{debug, warn};

use crate::array::{Mode, PixelArray, ValidImage};
use crate::error::{Error, Result};
use crate::validate::validate;

/// Produces a raw array from a file.
///
/// `mode` is a layout hint so the decoder can return grayscale or color data
/// directly. Any error is reported to the caller as [`Error::NotFound`].
pub trait Decoder {
    fn decode(&self, path: &Path, mode: Mode) -> io::Result<PixelArray<'static>>;
}

/// Load a validated image from exactly one of `path` or `array`.
///
/// # Arguments
/// * `path` - File to decode with `decoder`
/// * `array` - Array supplied by the caller
/// * `mode` - Accepted layouts, see [`validate`]
/// * `auto_convert` - Allow grayscale to color promotion
/// * `decoder` - Decode collaborator, only used with `path`
pub fn load<'a, D>(
    path: Option<&Path>,
    array: Option<PixelArray<'a>>,
    mode: Mode,
    auto_convert: bool,
    decoder: &D,
) -> Result<ValidImage<'a>>
where
    D: Decoder + ?Sized,
{
    let array = match (path, array) {
        (Some(_), Some(_)) => {
            return Err(Error::Parameter("provide either a path or an array, not both".into()));
        }
        (None, None) => {
            return Err(Error::Parameter("provide either a path or an array".into()));
        }
        (None, Some(array)) => array,
        (Some(path), None) => {
            debug!("decoding {} as {mode}", path.display());
            decoder
                .decode(path, mode)
                .map_err(|e| {
                    warn!("failed to decode {}: {e}", path.display());
                    Error::NotFound { path: path.to_path_buf() }
                })?
                .into_owned()
        }
    };
    validate(array, mode, auto_convert)
}

// ============================================================================
// image crate decoder
// ============================================================================

#[cfg(feature = "image-io")]
pub use self::image_io::ImageCrateDecoder;

#[cfg(feature = "image-io")]
mod image_io {
    use std::io;
    use std::path::Path;

    use ndarray::{Array2, Array3};

    use super::Decoder;
    use crate::array::{Mode, PixelArray, COLOR_CHANNELS};

    /// Decodes files with the `image` crate into 8-bit arrays.
    ///
    /// `gray` yields (H, W) luma, `color` yields (H, W, 3) RGB, and `any`
    /// picks luma for files without color information.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ImageCrateDecoder;

    impl Decoder for ImageCrateDecoder {
        fn decode(&self, path: &Path, mode: Mode) -> io::Result<PixelArray<'static>> {
            let img = image::open(path).map_err(io::Error::other)?;
            let color = match mode {
                Mode::Gray => false,
                Mode::Color => true,
                Mode::Any => img.color().has_color(),
            };

            if color {
                let rgb = img.into_rgb8();
                let (width, height) = rgb.dimensions();
                let array = Array3::from_shape_vec(
                    (height as usize, width as usize, COLOR_CHANNELS),
                    rgb.into_raw(),
                )
                .map_err(io::Error::other)?;
                Ok(array.into())
            } else {
                let luma = img.into_luma8();
                let (width, height) = luma.dimensions();
                let array = Array2::from_shape_vec((height as usize, width as usize), luma.into_raw())
                    .map_err(io::Error::other)?;
                Ok(array.into())
            }
        }
    }
}
