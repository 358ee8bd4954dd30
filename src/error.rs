//! Error type shared by validation, loading and the pixel transformations.

use std::path::PathBuf;

use thiserror::Error;

use crate::array::Mode;

/// Errors raised by pixkit operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument has the wrong type, arity or value set.
    #[error("invalid parameter: {0}")]
    Parameter(String),

    /// A pixel value or scalar parameter lies outside 0..=255.
    #[error("Expected {name} to be in the range 0 to 255, but received {value}")]
    OutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// Received value.
        value: i64,
    },

    /// Expansion limits are not strictly increasing.
    #[error(
        "Lower limit must be strictly less than upper limit, \
         but received low_limit={low_limit}, high_limit={high_limit}"
    )]
    LimitOrder {
        /// Received lower limit.
        low_limit: u8,
        /// Received upper limit.
        high_limit: u8,
    },

    /// The array element encoding is not `uint8`.
    #[error("unsupported dtype {0}, expected uint8")]
    Dtype(String),

    /// The array shape is not a legal image under the requested mode.
    #[error("invalid image shape {shape:?} for mode '{mode}': {reason}")]
    Shape {
        shape: Vec<usize>,
        mode: Mode,
        reason: &'static str,
    },

    /// The decoder could not produce an array from the path.
    #[error("could not read image from {}", path.display())]
    NotFound { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message_names_parameter() {
        let err = Error::OutOfRange { name: "pixel", value: -1 };
        assert_eq!(
            err.to_string(),
            "Expected pixel to be in the range 0 to 255, but received -1"
        );
    }

    #[test]
    fn test_limit_order_message_names_both_limits() {
        let err = Error::LimitOrder { low_limit: 111, high_limit: 110 };
        let msg = err.to_string();
        assert!(msg.starts_with("Lower limit must be strictly less"));
        assert!(msg.contains("low_limit=111, high_limit=110"));
    }
}
