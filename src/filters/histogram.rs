//! Intensity histograms with a configurable number of equal-width bins.
//!
//! Bins partition 0-255 into left-closed intervals of width `256 / bins`;
//! level `v` lands in bin `v * bins / 256`. With the default 256 bins that
//! is one bin per level. Counts are raw totals, never normalized.

use ndarray::Array1;

use crate::array::ValidImage;
use crate::error::{Error, Result};
use crate::filters::element_wise::level;

/// One bin per 8-bit level.
pub const DEFAULT_BINS: usize = 256;

/// Largest accepted bin count.
pub const MAX_BINS: usize = 1 << 16;

const LEVELS: usize = 256;

#[inline]
fn bin_index(value: u8, bins: usize) -> usize {
    usize::from(value) * bins / LEVELS
}

fn empty_counts(bins: usize) -> Result<Array1<u64>> {
    if bins == 0 || bins > MAX_BINS {
        return Err(Error::Parameter(format!(
            "bins must be between 1 and {MAX_BINS}, got {bins}"
        )));
    }
    Ok(Array1::zeros(bins))
}

/// Count intensity levels into `bins` equal-width bins.
///
/// # Arguments
/// * `values` - Intensity levels, possibly empty
/// * `bins` - Number of bins, 1 to [`MAX_BINS`]
///
/// # Returns
/// Array of length `bins` whose sum is the number of values
pub fn histogram<I>(values: I, bins: usize) -> Result<Array1<u64>>
where
    I: IntoIterator<Item = u8>,
{
    let mut counts = empty_counts(bins)?;
    for v in values {
        counts[bin_index(v, bins)] += 1;
    }
    Ok(counts)
}

/// Like [`histogram`] for raw integers; every value is range-checked.
pub fn histogram_levels<I>(values: I, bins: usize) -> Result<Array1<u64>>
where
    I: IntoIterator<Item = i64>,
{
    let mut counts = empty_counts(bins)?;
    for v in values {
        counts[bin_index(level("value", v)?, bins)] += 1;
    }
    Ok(counts)
}

/// Histogram over every sample of an image, all channels pooled.
pub fn histogram_image(image: &ValidImage<'_>, bins: usize) -> Result<Array1<u64>> {
    histogram(image.view().iter().copied(), bins)
}
