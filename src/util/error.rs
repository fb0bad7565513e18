//! Error types for houghstereo.

use thiserror::Error;

/// Result alias for houghstereo operations.
pub type HoughStereoResult<T> = std::result::Result<T, HoughStereoError>;

/// Errors that can occur when building accumulators or matching blocks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HoughStereoError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer cannot hold the requested view.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Requested region does not fit inside the image.
    #[error(
        "roi {width}x{height} at ({x}, {y}) out of bounds for {img_width}x{img_height} image"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Two inputs that must share a shape do not.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// A configuration value makes the parameter space empty or undefined.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: &'static str },
    /// Circle radius must be at least one pixel.
    #[error("invalid radius: {radius}")]
    InvalidRadius { radius: usize },
    /// A line vote landed outside the rho axis under `RhoPolicy::Reject`.
    #[error(
        "rho index {rho_idx} out of range [0, {bins}) for edge ({row}, {col}) at theta index {theta_idx}"
    )]
    RhoOutOfRange {
        row: usize,
        col: usize,
        theta_idx: usize,
        rho_idx: i64,
        bins: usize,
    },
    /// Image decoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
