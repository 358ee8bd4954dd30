//! Array data model: raw arrays before validation, validation modes and
//! validated images.
//!
//! ## Image Format
//!
//! | Kind | Shape | Type |
//! |------|-------|------|
//! | Grayscale | (H, W) | u8 |
//! | Color | (H, W, 3) | u8 |
//!
//! A [`PixelArray`] can carry any of the common numeric encodings so that
//! the validator can reject the wrong ones with a precise message. Only a
//! [`ValidImage`] is accepted by the transformations, and the only way to get
//! one is through [`crate::validate::validate`].

use std::fmt;
use std::str::FromStr;

use ndarray::{Array, ArrayView, ArrayView2, ArrayView3, ArrayViewD, CowArray, Dimension, Ix2, Ix3, IxDyn};

use crate::error::{Error, Result};

/// Number of channels of a color image.
pub const COLOR_CHANNELS: usize = 3;
/// Dimensionality of a grayscale image.
pub const GRAY_NDIM: usize = 2;
/// Dimensionality of a color image.
pub const COLOR_NDIM: usize = 3;

// ============================================================================
// Raw Arrays
// ============================================================================

macro_rules! pixel_arrays {
    ($($variant:ident($ty:ty) => $name:literal),* $(,)?) => {
        /// Element encoding of a raw array.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum DType {
            $($variant),*
        }

        impl DType {
            /// numpy-style name of the encoding (`"uint8"`, `"float32"`, ...).
            pub fn name(self) -> &'static str {
                match self {
                    $(DType::$variant => $name),*
                }
            }
        }

        /// A numeric array of any supported encoding, borrowed or owned.
        #[derive(Debug)]
        pub enum PixelArray<'a> {
            $($variant(CowArray<'a, $ty, IxDyn>)),*
        }

        impl<'a> PixelArray<'a> {
            pub fn dtype(&self) -> DType {
                match self {
                    $(PixelArray::$variant(_) => DType::$variant),*
                }
            }

            pub fn shape(&self) -> &[usize] {
                match self {
                    $(PixelArray::$variant(a) => a.shape()),*
                }
            }

            pub fn ndim(&self) -> usize {
                self.shape().len()
            }

            /// Detach from any borrowed storage. Already owned data is moved,
            /// not copied.
            pub fn into_owned<'b>(self) -> PixelArray<'b> {
                match self {
                    $(PixelArray::$variant(a) => PixelArray::$variant(CowArray::from(a.into_owned()))),*
                }
            }
        }

        $(
            impl<'a, D: Dimension> From<ArrayView<'a, $ty, D>> for PixelArray<'a> {
                fn from(view: ArrayView<'a, $ty, D>) -> Self {
                    PixelArray::$variant(CowArray::from(view.into_dyn()))
                }
            }

            impl<D: Dimension> From<Array<$ty, D>> for PixelArray<'static> {
                fn from(array: Array<$ty, D>) -> Self {
                    PixelArray::$variant(CowArray::from(array.into_dyn()))
                }
            }
        )*
    };
}

pixel_arrays! {
    U8(u8) => "uint8",
    I8(i8) => "int8",
    U16(u16) => "uint16",
    I16(i16) => "int16",
    U32(u32) => "uint32",
    I32(i32) => "int32",
    F32(f32) => "float32",
    F64(f64) => "float64",
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Validation Mode
// ============================================================================

/// Which image layouts a caller accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Two-dimensional (H, W) only.
    Gray,
    /// Three-dimensional (H, W, 3) only.
    Color,
    /// Either layout.
    #[default]
    Any,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Gray => "gray",
            Mode::Color => "color",
            Mode::Any => "any",
        }
    }

    pub fn accepts_gray(self) -> bool {
        matches!(self, Mode::Gray | Mode::Any)
    }

    pub fn accepts_color(self) -> bool {
        matches!(self, Mode::Color | Mode::Any)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gray" => Ok(Mode::Gray),
            "color" => Ok(Mode::Color),
            "any" => Ok(Mode::Any),
            other => Err(Error::Parameter(format!(
                "mode must be one of 'gray', 'color' or 'any', got '{other}'"
            ))),
        }
    }
}

// ============================================================================
// Validated Images
// ============================================================================

/// An 8-bit image whose layout has been checked.
///
/// Only [`crate::validate::validate`] and the transformations construct
/// one. Borrowed data stays borrowed through validation; images produced by
/// a conversion or a transformation own their data.
#[derive(Debug)]
pub struct ValidImage<'a>(pub(crate) Layout<'a>);

#[derive(Debug)]
pub(crate) enum Layout<'a> {
    Gray(CowArray<'a, u8, Ix2>),
    Color(CowArray<'a, u8, Ix3>),
}

impl<'a> ValidImage<'a> {
    pub(crate) fn gray(samples: CowArray<'a, u8, Ix2>) -> Self {
        ValidImage(Layout::Gray(samples))
    }

    pub(crate) fn color(samples: CowArray<'a, u8, Ix3>) -> Self {
        debug_assert_eq!(samples.shape()[2], COLOR_CHANNELS);
        ValidImage(Layout::Color(samples))
    }

    pub fn is_gray(&self) -> bool {
        matches!(self.0, Layout::Gray(_))
    }

    pub fn is_color(&self) -> bool {
        matches!(self.0, Layout::Color(_))
    }

    /// (H, W) view of a grayscale image.
    pub fn as_gray(&self) -> Option<ArrayView2<'_, u8>> {
        match &self.0 {
            Layout::Gray(a) => Some(a.view()),
            Layout::Color(_) => None,
        }
    }

    /// (H, W, 3) view of a color image.
    pub fn as_color(&self) -> Option<ArrayView3<'_, u8>> {
        match &self.0 {
            Layout::Gray(_) => None,
            Layout::Color(a) => Some(a.view()),
        }
    }

    pub fn shape(&self) -> &[usize] {
        match &self.0 {
            Layout::Gray(a) => a.shape(),
            Layout::Color(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of samples (pixels times channels).
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the image still borrows the caller's array.
    pub fn is_borrowed(&self) -> bool {
        match &self.0 {
            Layout::Gray(a) => a.is_view(),
            Layout::Color(a) => a.is_view(),
        }
    }

    /// Dimension-erased view of the samples.
    pub fn view(&self) -> ArrayViewD<'_, u8> {
        match &self.0 {
            Layout::Gray(a) => a.view().into_dyn(),
            Layout::Color(a) => a.view().into_dyn(),
        }
    }

    pub fn into_owned(self) -> ValidImage<'static> {
        match self.0 {
            Layout::Gray(a) => ValidImage::gray(CowArray::from(a.into_owned())),
            Layout::Color(a) => ValidImage::color(CowArray::from(a.into_owned())),
        }
    }

    /// Consume into an owned dimension-erased array.
    pub fn into_array(self) -> Array<u8, IxDyn> {
        match self.0 {
            Layout::Gray(a) => a.into_owned().into_dyn(),
            Layout::Color(a) => a.into_owned().into_dyn(),
        }
    }
}
