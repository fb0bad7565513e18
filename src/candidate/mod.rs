//! Candidate selection over vote accumulators.
//!
//! `peaks` performs greedy non-maximum suppression inside one accumulator;
//! `nms` merges detections that come from separate accumulators.

pub(crate) mod nms;
pub(crate) mod peaks;
