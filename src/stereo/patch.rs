//! Block-aligned SSD search of one patch within one strip.

use crate::kernel::Kernel;
use crate::util::{HoughStereoError, HoughStereoResult};
use crate::ImageView;

#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::SsdScalar as SsdDefault;
#[cfg(feature = "simd")]
use crate::kernel::simd::SsdSimd as SsdDefault;

/// Best block found for a patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockMatch {
    /// Left-edge column of the matching block within the strip.
    pub offset: usize,
    /// Sum of squared differences at that block.
    pub ssd: u64,
}

/// Finds the strip block most similar to `patch`.
///
/// Candidates start at columns `0, w, 2w, ...` for patch width `w`; columns
/// left over after the last full block are ignored. Ties resolve to the
/// leftmost block.
pub fn match_patch(
    patch: ImageView<'_, u8>,
    strip: ImageView<'_, u8>,
) -> HoughStereoResult<BlockMatch> {
    match_patch_with::<SsdDefault>(patch, strip)
}

/// [`match_patch`] with an explicit cost kernel.
pub fn match_patch_with<K: Kernel>(
    patch: ImageView<'_, u8>,
    strip: ImageView<'_, u8>,
) -> HoughStereoResult<BlockMatch> {
    if patch.height() != strip.height() {
        return Err(HoughStereoError::DimensionMismatch {
            expected: (patch.width(), patch.height()),
            got: strip.dims(),
        });
    }
    let block_width = patch.width();
    let blocks = strip.width() / block_width;
    if blocks == 0 {
        return Err(HoughStereoError::InvalidConfig {
            reason: "strip narrower than patch",
        });
    }

    let mut best = BlockMatch {
        offset: 0,
        ssd: u64::MAX,
    };
    for block in 0..blocks {
        let offset = block * block_width;
        let ssd = K::ssd_at(patch, strip, offset);
        if ssd < best.ssd {
            best = BlockMatch { offset, ssd };
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::{match_patch, match_patch_with, BlockMatch};
    use crate::kernel::scalar::SsdScalar;
    use crate::{HoughStereoError, ImageView};

    #[test]
    fn ignores_unaligned_positions() {
        // Patch [7, 7] sits at column 1, which is not block aligned.
        let strip = [0u8, 7, 7, 0, 6, 6];
        let patch = [7u8, 7];
        let strip = ImageView::from_slice(&strip, 6, 1).unwrap();
        let patch = ImageView::from_slice(&patch, 2, 1).unwrap();
        assert_eq!(
            match_patch_with::<SsdScalar>(patch, strip).unwrap(),
            BlockMatch { offset: 4, ssd: 2 }
        );
    }

    #[test]
    fn remainder_columns_are_not_candidates() {
        let strip = [9u8, 9, 9, 9, 0];
        let patch = [0u8, 0];
        let strip = ImageView::from_slice(&strip, 5, 1).unwrap();
        let patch = ImageView::from_slice(&patch, 2, 1).unwrap();
        let best = match_patch(patch, strip).unwrap();
        assert_eq!(best.offset, 0);
        assert_eq!(best.ssd, 162);
    }

    #[test]
    fn rejects_mismatched_heights_and_narrow_strips() {
        let data = [0u8; 12];
        let patch = ImageView::from_slice(&data, 2, 2).unwrap();
        let strip = ImageView::from_slice(&data, 4, 3).unwrap();
        assert_eq!(
            match_patch(patch, strip).unwrap_err(),
            HoughStereoError::DimensionMismatch {
                expected: (2, 2),
                got: (4, 3)
            }
        );

        let wide_patch = ImageView::from_slice(&data, 6, 2).unwrap();
        let narrow = ImageView::from_slice(&data, 4, 2).unwrap();
        assert!(matches!(
            match_patch(wide_patch, narrow),
            Err(HoughStereoError::InvalidConfig { .. })
        ));
    }
}
