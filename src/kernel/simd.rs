//! SIMD SSD kernel using the `wide` crate.
//!
//! Eight pixels are differenced and squared per step in `f32x8`. Each lane
//! holds at most `255^2`, which `f32` represents exactly, and lanes are
//! summed in `u64`, so costs equal the scalar kernel's.

use crate::kernel::{placement_fits, Kernel};
use crate::ImageView;
use wide::f32x8;

const LANES: usize = 8;

/// Load 8 u8 values and convert to f32x8.
#[inline]
fn load_u8x8_as_f32x8(slice: &[u8]) -> f32x8 {
    f32x8::from([
        slice[0] as f32,
        slice[1] as f32,
        slice[2] as f32,
        slice[3] as f32,
        slice[4] as f32,
        slice[5] as f32,
        slice[6] as f32,
        slice[7] as f32,
    ])
}

#[inline]
fn hsum_exact(v: f32x8) -> u64 {
    v.to_array().iter().map(|&lane| lane as u64).sum()
}

/// SIMD SSD kernel.
pub struct SsdSimd;

impl Kernel for SsdSimd {
    fn ssd_at(patch: ImageView<'_, u8>, strip: ImageView<'_, u8>, x: usize) -> u64 {
        if !placement_fits(patch, strip, x) {
            return u64::MAX;
        }
        let width = patch.width();
        let simd_end = width / LANES * LANES;

        let mut ssd = 0u64;
        for (patch_row, strip_row) in patch.rows().zip(strip.rows()) {
            let strip_row = &strip_row[x..x + width];

            let mut tx = 0;
            while tx < simd_end {
                let diff = load_u8x8_as_f32x8(&patch_row[tx..])
                    - load_u8x8_as_f32x8(&strip_row[tx..]);
                ssd += hsum_exact(diff * diff);
                tx += LANES;
            }

            while tx < width {
                let diff = i32::from(patch_row[tx]) - i32::from(strip_row[tx]);
                ssd += (diff * diff) as u64;
                tx += 1;
            }
        }
        ssd
    }
}
