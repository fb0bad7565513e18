//! Block cost kernels for stereo matching.
//!
//! A kernel scores one placement of a patch inside a strip of the same
//! height. The scalar kernel is the reference; the SIMD kernel (feature
//! `simd`) must return bit-identical costs.

use crate::ImageView;

/// Sum-of-squared-differences cost between a patch and a strip placement.
pub trait Kernel {
    /// Returns the SSD between `patch` and the block of `strip` whose left
    /// edge is column `x`.
    ///
    /// Returns `u64::MAX` when the heights differ or the block does not fit.
    fn ssd_at(patch: ImageView<'_, u8>, strip: ImageView<'_, u8>, x: usize) -> u64;
}

#[inline]
pub(crate) fn placement_fits(patch: ImageView<'_, u8>, strip: ImageView<'_, u8>, x: usize) -> bool {
    patch.height() == strip.height()
        && x.checked_add(patch.width())
            .is_some_and(|end| end <= strip.width())
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;
