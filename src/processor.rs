//! An original image paired with its latest transformation.
//!
//! Each transformation is computed from the original, never chained onto a
//! previous result, and replaces the stored transformed image.

use std::path::Path;

use log::debug;
use ndarray::Array1;

use crate::array::{Mode, ValidImage};
use crate::error::{Error, Result};
use crate::filters::{apply, histogram};
use crate::loader::{load, Decoder};

/// Which image a histogram is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramSource {
    Original,
    Transformed,
}

#[derive(Debug)]
pub struct ImageProcessor {
    original: ValidImage<'static>,
    transformed: Option<ValidImage<'static>>,
}

impl ImageProcessor {
    pub fn new(original: ValidImage<'static>) -> Self {
        Self { original, transformed: None }
    }

    /// Decode `path` with `decoder` and validate it under `mode`.
    pub fn open<D: Decoder + ?Sized>(path: &Path, mode: Mode, auto_convert: bool, decoder: &D) -> Result<Self> {
        let original = load(Some(path), None, mode, auto_convert, decoder)?;
        debug!("opened {} with shape {:?}", path.display(), original.shape());
        Ok(Self::new(original))
    }

    pub fn original(&self) -> &ValidImage<'static> {
        &self.original
    }

    pub fn transformed(&self) -> Option<&ValidImage<'static>> {
        self.transformed.as_ref()
    }

    /// Stretch (`low_limit`, `high_limit`) of the original onto 0-255.
    pub fn contrast_expansion(&mut self, low_limit: i64, high_limit: i64) -> Result<&ValidImage<'static>> {
        let out = apply::contrast_expansion(&self.original, low_limit, high_limit)?;
        Ok(&*self.transformed.insert(out))
    }

    /// Binary threshold of the original.
    pub fn thresholding(&mut self, t: i64, a: i64) -> Result<&ValidImage<'static>> {
        let out = apply::thresholding(&self.original, t, a)?;
        Ok(&*self.transformed.insert(out))
    }

    /// Digital negative of the original.
    pub fn digital_negative(&mut self) -> &ValidImage<'static> {
        let out = apply::digital_negative(&self.original);
        self.transformed.insert(out)
    }

    /// Histogram of the original or of the latest transformation.
    pub fn histogram(&self, source: HistogramSource, bins: usize) -> Result<Array1<u64>> {
        let image = match source {
            HistogramSource::Original => &self.original,
            HistogramSource::Transformed => self
                .transformed
                .as_ref()
                .ok_or_else(|| Error::Parameter("no transformation has been applied yet".into()))?,
        };
        histogram::histogram_image(image, bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;
    use ndarray::Array2;

    fn processor() -> ImageProcessor {
        let img = Array2::from_shape_fn((4, 4), |(y, x)| (100 + y * 4 + x) as u8);
        ImageProcessor::new(validate(img, Mode::Gray, false).unwrap())
    }

    #[test]
    fn test_transformations_start_from_original() {
        let mut p = processor();

        p.digital_negative();
        let expanded = p.contrast_expansion(100, 110).unwrap();

        // 101 -> 25, not computed from the negative
        assert_eq!(expanded.view()[[0, 1]], 25);
        assert_eq!(p.original().view()[[0, 1]], 101);
    }

    #[test]
    fn test_failed_transformation_keeps_previous() {
        let mut p = processor();
        p.thresholding(105, 255).unwrap();

        assert!(p.contrast_expansion(110, 100).is_err());

        let kept = p.transformed().unwrap();
        assert_eq!(kept.view()[[0, 0]], 0);
        assert_eq!(kept.view()[[3, 3]], 255);
    }

    #[test]
    fn test_histogram_sources() {
        let mut p = processor();
        assert!(matches!(
            p.histogram(HistogramSource::Transformed, 256),
            Err(Error::Parameter(_))
        ));

        let original = p.histogram(HistogramSource::Original, 256).unwrap();
        assert_eq!(original.sum(), 16);
        assert_eq!(original[100], 1);

        p.thresholding(107, 200).unwrap();
        let transformed = p.histogram(HistogramSource::Transformed, 256).unwrap();
        assert_eq!(transformed[0], 8);
        assert_eq!(transformed[200], 8);
    }
}
