//! pixkit
//!
//! Image array validation and element-wise pixel transformations for
//! teaching image processing, with Python bindings via PyO3 and WASM
//! bindings for JavaScript.
//!
//! ## Image Format
//! Two layouts of 8-bit samples (0-255) are legal:
//! - **Grayscale**: (height, width)
//! - **Color**: (height, width, 3)
//!
//! Any other dimensionality, channel count or element encoding is rejected
//! by [`validate()`]. A grayscale array can be promoted to color on request
//! by replicating its channel; color is never converted to grayscale.
//!
//! ## Architecture
//! - [`validate()`] turns a raw [`PixelArray`] into a [`ValidImage`]
//! - [`load()`] gets the raw array from a [`Decoder`] or from the caller
//! - [`filters::element_wise`] holds the scalar maps, [`filters::apply`]
//!   lifts them onto images and [`filters::histogram`] counts levels
//! - [`ImageProcessor`] keeps an original and its latest transformation
//!
//! ## Features
//! - `image-io` (default): [`ImageCrateDecoder`] backed by the `image` crate
//! - `python`: the `pixkit` Python extension module
//! - `wasm`: wasm-bindgen exports

pub mod array;
pub mod error;
pub mod filters;
pub mod loader;
pub mod processor;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use array::{DType, Mode, PixelArray, ValidImage};
pub use error::{Error, Result};
pub use filters::element_wise::{pixel_digital_negative, pixel_expansion, pixel_thresholding, PixelMap};
pub use filters::histogram::histogram;
#[cfg(feature = "image-io")]
pub use loader::ImageCrateDecoder;
pub use loader::{load, Decoder};
pub use processor::{HistogramSource, ImageProcessor};
pub use validate::validate;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use std::path::PathBuf;

    use numpy::prelude::*;
    use numpy::{PyArray1, PyArrayDyn, PyUntypedArray};
    use pyo3::create_exception;
    use pyo3::exceptions::{PyFileNotFoundError, PyTypeError, PyValueError};
    use pyo3::prelude::*;

    use crate::array::{Mode, ValidImage};
    use crate::error::Error;
    use crate::filters::{apply, element_wise, histogram};
    use crate::loader::{load, ImageCrateDecoder};
    use crate::validate::validate;

    create_exception!(
        pixkit,
        ParameterError,
        PyTypeError,
        "An argument has the wrong type, arity or value set."
    );

    impl From<Error> for PyErr {
        fn from(err: Error) -> PyErr {
            match err {
                Error::Parameter(_) => ParameterError::new_err(err.to_string()),
                Error::Dtype(_) => PyTypeError::new_err(err.to_string()),
                Error::NotFound { .. } => PyFileNotFoundError::new_err(err.to_string()),
                _ => PyValueError::new_err(err.to_string()),
            }
        }
    }

    // ========================================================================
    // Array Conversion
    // ========================================================================

    /// Borrow `obj` as a uint8 ndarray, rejecting non-arrays and other dtypes.
    fn u8_array<'py>(obj: &Bound<'py, PyAny>) -> PyResult<Bound<'py, PyArrayDyn<u8>>> {
        let untyped = obj.downcast::<PyUntypedArray>().map_err(|_| {
            Error::Parameter(format!("img_arr must be a numpy.ndarray, got {}", obj.get_type()))
        })?;
        match obj.downcast::<PyArrayDyn<u8>>() {
            Ok(array) => Ok(array.clone()),
            Err(_) => Err(Error::Dtype(untyped.dtype().to_string()).into()),
        }
    }

    /// Hand `image` back to Python: the caller's own object when nothing was
    /// converted, a new ndarray otherwise.
    fn to_python<'py>(py: Python<'py>, original: Option<&Bound<'py, PyAny>>, image: ValidImage<'_>) -> Bound<'py, PyAny> {
        match original {
            Some(obj) if image.is_borrowed() => obj.clone(),
            _ => image.into_array().into_pyarray(py).into_any(),
        }
    }

    // ========================================================================
    // Validation and Loading
    // ========================================================================

    /// Validate a numpy array as an image under `mode` ("gray", "color", "any").
    #[pyfunction]
    #[pyo3(signature = (img_arr, mode="any", auto_convert=false))]
    pub fn validate_imgarray<'py>(
        py: Python<'py>,
        img_arr: &Bound<'py, PyAny>,
        mode: &str,
        auto_convert: bool,
    ) -> PyResult<Bound<'py, PyAny>> {
        let mode: Mode = mode.parse()?;
        let array = u8_array(img_arr)?;
        let readonly = array.readonly();
        let image = validate(readonly.as_array(), mode, auto_convert)?;
        Ok(to_python(py, Some(img_arr), image))
    }

    /// Load an image from exactly one of `path` or `img_arr`.
    #[pyfunction]
    #[pyo3(signature = (path=None, img_arr=None, mode="any", auto_convert=false))]
    pub fn load_image<'py>(
        py: Python<'py>,
        path: Option<PathBuf>,
        img_arr: Option<&Bound<'py, PyAny>>,
        mode: &str,
        auto_convert: bool,
    ) -> PyResult<Bound<'py, PyAny>> {
        let mode: Mode = mode.parse()?;
        match img_arr {
            Some(obj) => {
                let array = u8_array(obj)?;
                let readonly = array.readonly();
                let image = load(
                    path.as_deref(),
                    Some(readonly.as_array().into()),
                    mode,
                    auto_convert,
                    &ImageCrateDecoder,
                )?;
                Ok(to_python(py, Some(obj), image))
            }
            None => {
                let image = load(path.as_deref(), None, mode, auto_convert, &ImageCrateDecoder)?;
                Ok(to_python(py, None, image))
            }
        }
    }

    // ========================================================================
    // Element-wise Functions
    // ========================================================================

    #[pyfunction]
    pub fn pixel_expansion(pixel: i64, low_limit: i64, high_limit: i64) -> PyResult<u8> {
        Ok(element_wise::pixel_expansion(pixel, low_limit, high_limit)?)
    }

    #[pyfunction]
    #[pyo3(signature = (pixel, T, A))]
    #[allow(non_snake_case)]
    pub fn pixel_thresholding(pixel: i64, T: i64, A: i64) -> PyResult<u8> {
        Ok(element_wise::pixel_thresholding(pixel, T, A)?)
    }

    #[pyfunction]
    pub fn pixel_digital_negative(pixel: i64) -> PyResult<u8> {
        Ok(element_wise::pixel_digital_negative(pixel)?)
    }

    // ========================================================================
    // Image Transformations
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (img_arr, low_limit, high_limit, mode="any"))]
    pub fn contrast_expansion<'py>(
        py: Python<'py>,
        img_arr: &Bound<'py, PyAny>,
        low_limit: i64,
        high_limit: i64,
        mode: &str,
    ) -> PyResult<Bound<'py, PyAny>> {
        let array = u8_array(img_arr)?;
        let readonly = array.readonly();
        let image = validate(readonly.as_array(), mode.parse()?, false)?;
        let out = apply::contrast_expansion(&image, low_limit, high_limit)?;
        Ok(to_python(py, None, out))
    }

    #[pyfunction]
    #[pyo3(signature = (img_arr, t, a, mode="any"))]
    pub fn thresholding<'py>(
        py: Python<'py>,
        img_arr: &Bound<'py, PyAny>,
        t: i64,
        a: i64,
        mode: &str,
    ) -> PyResult<Bound<'py, PyAny>> {
        let array = u8_array(img_arr)?;
        let readonly = array.readonly();
        let image = validate(readonly.as_array(), mode.parse()?, false)?;
        let out = apply::thresholding(&image, t, a)?;
        Ok(to_python(py, None, out))
    }

    #[pyfunction]
    #[pyo3(signature = (img_arr, mode="any"))]
    pub fn digital_negative<'py>(
        py: Python<'py>,
        img_arr: &Bound<'py, PyAny>,
        mode: &str,
    ) -> PyResult<Bound<'py, PyAny>> {
        let array = u8_array(img_arr)?;
        let readonly = array.readonly();
        let image = validate(readonly.as_array(), mode.parse()?, false)?;
        Ok(to_python(py, None, apply::digital_negative(&image)))
    }

    // ========================================================================
    // Histogram
    // ========================================================================

    /// Count intensity levels of any integer array or sequence into `bins` bins.
    #[pyfunction]
    #[pyo3(signature = (img, bins=histogram::DEFAULT_BINS))]
    pub fn calculate_histogram<'py>(
        py: Python<'py>,
        img: &Bound<'py, PyAny>,
        bins: usize,
    ) -> PyResult<Bound<'py, PyArray1<u64>>> {
        let counts = match img.downcast::<PyArrayDyn<u8>>() {
            Ok(array) => {
                let readonly = array.readonly();
                histogram::histogram(readonly.as_array().iter().copied(), bins)?
            }
            Err(_) => {
                let values: Vec<i64> = py
                    .import("numpy")?
                    .call_method1("ravel", (img,))?
                    .call_method0("tolist")?
                    .extract()?;
                histogram::histogram_levels(values, bins)?
            }
        };
        Ok(counts.into_pyarray(py))
    }

    // ========================================================================
    // Module Registration
    // ========================================================================

    #[pymodule]
    pub fn pixkit(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add("__version__", crate::VERSION)?;
        m.add("ParameterError", m.py().get_type::<ParameterError>())?;

        // Validation and loading
        m.add_function(wrap_pyfunction!(validate_imgarray, m)?)?;
        m.add_function(wrap_pyfunction!(load_image, m)?)?;

        // Element-wise functions
        m.add_function(wrap_pyfunction!(pixel_expansion, m)?)?;
        m.add_function(wrap_pyfunction!(pixel_thresholding, m)?)?;
        m.add_function(wrap_pyfunction!(pixel_digital_negative, m)?)?;

        // Image transformations
        m.add_function(wrap_pyfunction!(contrast_expansion, m)?)?;
        m.add_function(wrap_pyfunction!(thresholding, m)?)?;
        m.add_function(wrap_pyfunction!(digital_negative, m)?)?;

        // Histogram
        m.add_function(wrap_pyfunction!(calculate_histogram, m)?)?;

        Ok(())
    }

}

#[cfg(feature = "python")]
pub use python::pixkit;
