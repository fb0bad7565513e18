//! houghstereo: Hough voting and block-matching stereo on raster images.
//!
//! The crate covers two voting/search problems over discretized parameter
//! spaces:
//!
//! - Hough transforms on a boolean edge map: [`hough_lines_acc`] and
//!   [`hough_circles_acc`] build vote accumulators, [`hough_peaks`] pulls
//!   peaks out with non-maximum suppression, and [`find_circles`] runs the
//!   circle pipeline over several radii.
//! - Stereo disparity between a rectified grayscale pair:
//!   [`match_patch`] finds the best block-aligned SSD match of a patch in a
//!   strip and [`disparity_blocks`] assembles one disparity per block.
//!
//! Edge detection, image decoding and drawing happen outside the crate;
//! optional `image-io` loaders are provided for convenience. The `rayon`
//! feature parallelizes circle radii and disparity strips, `simd` enables a
//! `wide`-based SSD kernel, and `tracing` emits spans for each pass.

mod candidate;
pub mod hough;
pub mod image;
pub mod kernel;
pub mod lowlevel;
mod search;
mod stereo;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use image::io;
pub use image::{EdgeMap, ImageView, OwnedImage};
pub use util::{HoughStereoError, HoughStereoResult};

pub use candidate::nms::merge_circles;
pub use candidate::peaks::{hough_peaks, Neighborhood, Peak, PeakConfig, Threshold};
pub use hough::{
    hough_circles_acc, hough_lines_acc, Accumulator, LineAccumulatorConfig, LineHough, RhoPolicy,
    ThetaGrid,
};
pub use search::circles::{find_circles, CircleDetections, CircleSearchConfig};
pub use stereo::disparity::{disparity_blocks, DisparityConfig, DisparityMap};
pub use stereo::patch::{match_patch, BlockMatch};
