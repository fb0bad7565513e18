//! Block-matching stereo.
//!
//! The left image is cut into non-overlapping blocks; each block is compared
//! against the block-aligned positions of the right image strip at the same
//! height, and the horizontal shift of the cheapest position is recorded.
//! Output has one disparity per block, not per pixel.

pub(crate) mod disparity;
pub(crate) mod patch;
