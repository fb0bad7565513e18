//! Strip-by-strip disparity estimation.

use crate::stereo::patch::match_patch;
use crate::trace::{trace_event, trace_span};
use crate::util::{HoughStereoError, HoughStereoResult};
use crate::ImageView;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Configuration for [`disparity_blocks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisparityConfig {
    /// Block width in pixels.
    pub block_width: usize,
    /// Block (and strip) height in pixels.
    pub block_height: usize,
    /// Process strips in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for DisparityConfig {
    fn default() -> Self {
        Self {
            block_width: 16,
            block_height: 16,
            parallel: false,
        }
    }
}

/// Per-block disparities, one row per horizontal strip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisparityMap {
    data: Vec<i32>,
    rows: usize,
    cols: usize,
}

impl DisparityMap {
    /// Number of strips.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of blocks per strip.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Disparities of strip `row`, left to right.
    pub fn row(&self, row: usize) -> Option<&[i32]> {
        if row >= self.rows {
            return None;
        }
        self.data.get(row * self.cols..(row + 1) * self.cols)
    }

    /// Disparity of block `col` in strip `row`.
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        self.row(row)?.get(col).copied()
    }

    /// Iterates strips top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        (0..self.rows).filter_map(move |row| self.row(row))
    }

    /// Row-major disparities.
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Copies the map into one `Vec` per strip.
    pub fn to_nested(&self) -> Vec<Vec<i32>> {
        self.iter_rows().map(<[i32]>::to_vec).collect()
    }
}

/// Computes one disparity per block of the left image.
///
/// The value for a block is its left-edge column minus the left-edge column
/// of the best SSD block in the right image strip at the same rows. Rows
/// below the last full strip and columns right of the last full block are
/// not matched.
pub fn disparity_blocks(
    left: ImageView<'_, u8>,
    right: ImageView<'_, u8>,
    cfg: &DisparityConfig,
) -> HoughStereoResult<DisparityMap> {
    if left.dims() != right.dims() {
        return Err(HoughStereoError::DimensionMismatch {
            expected: left.dims(),
            got: right.dims(),
        });
    }
    if cfg.block_width == 0 || cfg.block_height == 0 {
        return Err(HoughStereoError::InvalidConfig {
            reason: "block dimensions must be >= 1",
        });
    }

    let (width, height) = left.dims();
    let strips = height / cfg.block_height;
    let blocks = width / cfg.block_width;
    let _span = trace_span!(
        "disparity_blocks",
        strips = strips,
        blocks = blocks,
        parallel = cfg.parallel
    )
    .entered();

    if strips == 0 || blocks == 0 {
        trace_event!("disparity_empty", width = width, height = height);
        return Ok(DisparityMap::default());
    }

    let rows = if cfg.parallel {
        match_strips_par(left, right, cfg, strips)?
    } else {
        (0..strips)
            .map(|strip| match_strip(left, right, cfg, strip))
            .collect::<HoughStereoResult<Vec<_>>>()?
    };

    let mut data = Vec::with_capacity(strips * blocks);
    for row in rows {
        data.extend(row);
    }

    trace_event!("disparity_done", strips = strips, blocks = blocks);
    Ok(DisparityMap {
        data,
        rows: strips,
        cols: blocks,
    })
}

fn match_strip(
    left: ImageView<'_, u8>,
    right: ImageView<'_, u8>,
    cfg: &DisparityConfig,
    strip: usize,
) -> HoughStereoResult<Vec<i32>> {
    let y = strip * cfg.block_height;
    let right_strip = right.roi(0, y, right.width(), cfg.block_height)?;
    let blocks = left.width() / cfg.block_width;

    let mut out = Vec::with_capacity(blocks);
    for block in 0..blocks {
        let x = block * cfg.block_width;
        let patch = left.roi(x, y, cfg.block_width, cfg.block_height)?;
        let best = match_patch(patch, right_strip)?;
        out.push(x as i32 - best.offset as i32);
    }
    Ok(out)
}

#[cfg(feature = "rayon")]
fn match_strips_par(
    left: ImageView<'_, u8>,
    right: ImageView<'_, u8>,
    cfg: &DisparityConfig,
    strips: usize,
) -> HoughStereoResult<Vec<Vec<i32>>> {
    (0..strips)
        .into_par_iter()
        .map(|strip| match_strip(left, right, cfg, strip))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn match_strips_par(
    left: ImageView<'_, u8>,
    right: ImageView<'_, u8>,
    cfg: &DisparityConfig,
    strips: usize,
) -> HoughStereoResult<Vec<Vec<i32>>> {
    (0..strips)
        .map(|strip| match_strip(left, right, cfg, strip))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{disparity_blocks, DisparityConfig};
    use crate::{HoughStereoError, ImageView};

    #[test]
    fn partial_strips_and_blocks_are_dropped() {
        let data: Vec<u8> = (0..10 * 7).map(|i| (i * 13 % 251) as u8).collect();
        let view = ImageView::from_slice(&data, 10, 7).unwrap();
        let cfg = DisparityConfig {
            block_width: 4,
            block_height: 3,
            parallel: false,
        };
        let map = disparity_blocks(view, view, &cfg).unwrap();
        assert_eq!(map.rows(), 2);
        assert_eq!(map.cols(), 2);
        assert_eq!(map.to_nested(), vec![vec![0, 0], vec![0, 0]]);
        assert!(map.row(2).is_none());
    }

    #[test]
    fn shifted_block_reports_positive_disparity() {
        // Right image holds the left image's second block in its first block slot.
        let width = 8;
        let left: Vec<u8> = vec![10, 10, 200, 200, 10, 10, 10, 10];
        let right: Vec<u8> = vec![200, 200, 10, 10, 10, 10, 10, 10];
        let left = ImageView::from_slice(&left, width, 1).unwrap();
        let right = ImageView::from_slice(&right, width, 1).unwrap();
        let cfg = DisparityConfig {
            block_width: 2,
            block_height: 1,
            parallel: false,
        };
        let map = disparity_blocks(left, right, &cfg).unwrap();
        assert_eq!(map.row(0).unwrap(), &[-2, 2, 2, 4]);
    }

    #[test]
    fn image_smaller_than_block_gives_empty_map() {
        let data = [0u8; 12];
        let view = ImageView::from_slice(&data, 4, 3).unwrap();
        let map = disparity_blocks(view, view, &DisparityConfig::default()).unwrap();
        assert_eq!(map.rows(), 0);
        assert!(map.data().is_empty());
    }

    #[test]
    fn rejects_mismatched_inputs_and_zero_blocks() {
        let data = [0u8; 24];
        let a = ImageView::from_slice(&data, 4, 3).unwrap();
        let b = ImageView::from_slice(&data, 6, 4).unwrap();
        assert_eq!(
            disparity_blocks(a, b, &DisparityConfig::default()).unwrap_err(),
            HoughStereoError::DimensionMismatch {
                expected: (4, 3),
                got: (6, 4)
            }
        );
        let cfg = DisparityConfig {
            block_width: 0,
            ..DisparityConfig::default()
        };
        assert!(disparity_blocks(a, a, &cfg).is_err());
    }
}
