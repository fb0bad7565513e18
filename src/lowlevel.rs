//! Low-level building blocks for custom pipelines.
//!
//! Exposes the cost kernels and the kernel-generic patch search. Most users
//! should prefer [`match_patch`](crate::match_patch) and
//! [`disparity_blocks`](crate::disparity_blocks).

pub use crate::kernel::scalar::SsdScalar;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::SsdSimd;
pub use crate::kernel::Kernel;
pub use crate::stereo::patch::match_patch_with;
