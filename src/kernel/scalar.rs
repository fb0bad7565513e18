//! Scalar reference kernel.

use crate::kernel::{placement_fits, Kernel};
use crate::ImageView;

/// Exact integer SSD, one pixel at a time.
pub struct SsdScalar;

impl Kernel for SsdScalar {
    fn ssd_at(patch: ImageView<'_, u8>, strip: ImageView<'_, u8>, x: usize) -> u64 {
        if !placement_fits(patch, strip, x) {
            return u64::MAX;
        }
        let width = patch.width();
        let mut ssd = 0u64;
        for (patch_row, strip_row) in patch.rows().zip(strip.rows()) {
            for (&a, &b) in patch_row.iter().zip(&strip_row[x..x + width]) {
                let diff = i32::from(a) - i32::from(b);
                ssd += (diff * diff) as u64;
            }
        }
        ssd
    }
}
