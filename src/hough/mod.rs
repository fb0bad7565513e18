//! Hough voting over discretized parameter spaces.
//!
//! Line voting fills a `rho x theta` accumulator; circle voting fills one
//! image-shaped accumulator per radius. Both produce an [`Accumulator`], a
//! dense grid of `u32` vote counts whose shape is fixed at construction and
//! whose cells only ever increase while voting.

mod angles;
pub(crate) mod circles;
pub(crate) mod lines;

pub use angles::ThetaGrid;
pub use circles::hough_circles_acc;
pub use lines::{hough_lines_acc, LineAccumulatorConfig, LineHough, RhoPolicy};

use crate::image::{ImageView, OwnedImage};
use crate::util::HoughStereoResult;

/// Dense vote-count grid indexed `(row, col)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Accumulator {
    votes: OwnedImage<u32>,
}

impl Accumulator {
    /// Creates an all-zero accumulator with `rows x cols` cells.
    pub fn zeros(rows: usize, cols: usize) -> HoughStereoResult<Self> {
        Ok(Self {
            votes: OwnedImage::filled(cols, rows, 0)?,
        })
    }

    /// Number of rows (first parameter axis).
    pub fn rows(&self) -> usize {
        self.votes.height()
    }

    /// Number of columns (second parameter axis).
    pub fn cols(&self) -> usize {
        self.votes.width()
    }

    /// Returns the vote count at `(row, col)` if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.votes.view().get(col, row).copied()
    }

    /// Row-major vote counts.
    pub fn data(&self) -> &[u32] {
        self.votes.data()
    }

    /// Largest vote count in the grid.
    pub fn max_votes(&self) -> u32 {
        self.data().iter().copied().max().unwrap_or(0)
    }

    /// Sum of all votes cast.
    pub fn total_votes(&self) -> u64 {
        self.data().iter().map(|&v| u64::from(v)).sum()
    }

    /// Borrowed view for peak extraction.
    pub fn view(&self) -> ImageView<'_, u32> {
        self.votes.view()
    }

    #[inline]
    pub(crate) fn vote(&mut self, row: usize, col: usize) {
        let cols = self.cols();
        debug_assert!(row < self.rows() && col < cols);
        self.votes.data_mut()[row * cols + col] += 1;
    }
}
