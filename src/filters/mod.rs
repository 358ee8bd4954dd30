//! Pixel transformations and histograms.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W) | u8 | Single intensity channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Three channels, 0-255 |
//!
//! ## Filter Categories
//!
//! - **Element-wise**: contrast expansion, thresholding, digital negative
//!   (scalar functions and [`element_wise::PixelMap`] value types)
//! - **Array lifting**: the same maps applied to every sample of a
//!   [`crate::ValidImage`], in parallel with rayon
//! - **Histogram**: equal-width bin counts over intensity levels

pub mod apply;
pub mod element_wise;
pub mod histogram;
