//! Multi-pass searches built from accumulators and peak extraction.

pub(crate) mod circles;
