//! Peak extraction with hard non-maximum suppression.
//!
//! Peaks are taken greedily from a working copy of the accumulator: the
//! global maximum (first in row-major order on ties) is accepted and a
//! window around it is zeroed before the next search. The input
//! accumulator is left untouched.

use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::{HoughStereoError, HoughStereoResult};

/// Accepted accumulator cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Peak {
    /// Row index (rho bin for lines, center row for circles).
    pub row: usize,
    /// Column index (theta bin for lines, center column for circles).
    pub col: usize,
    /// Votes held by the cell when it was accepted.
    pub votes: u32,
}

/// Minimum vote count a cell needs to become a peak.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Threshold {
    /// Fixed vote count.
    Absolute(f64),
    /// Fraction of the accumulator's global maximum.
    RelativeToMax(f64),
}

impl Threshold {
    fn resolve(self, max_votes: u32) -> f64 {
        match self {
            Threshold::Absolute(value) => value,
            Threshold::RelativeToMax(ratio) => ratio * f64::from(max_votes),
        }
    }
}

/// Suppression window size in accumulator cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    /// Window height; odd.
    pub height: usize,
    /// Window width; odd.
    pub width: usize,
}

impl Neighborhood {
    /// Creates a window, rounding even sizes up to the next odd value.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height: height / 2 * 2 + 1,
            width: width / 2 * 2 + 1,
        }
    }

    /// Default window for an accumulator of `rows x cols`: one fiftieth of
    /// each dimension, made odd.
    pub fn for_shape(rows: usize, cols: usize) -> Self {
        Self::new(rows / 50, cols / 50)
    }
}

/// Configuration for [`hough_peaks`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeakConfig {
    /// Upper bound on the number of peaks returned.
    pub max_peaks: usize,
    /// Suppression window; `None` derives it from the accumulator shape.
    pub neighborhood: Option<Neighborhood>,
    /// Acceptance threshold.
    pub threshold: Threshold,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            max_peaks: 10,
            neighborhood: None,
            threshold: Threshold::RelativeToMax(0.5),
        }
    }
}

impl PeakConfig {
    /// Checks values that typically arrive from user configuration.
    pub fn validate(&self) -> HoughStereoResult<()> {
        if let Some(nhood) = self.neighborhood {
            if nhood.height == 0 || nhood.width == 0 {
                return Err(HoughStereoError::InvalidConfig {
                    reason: "neighborhood dimensions must be >= 1",
                });
            }
            if nhood.height % 2 == 0 || nhood.width % 2 == 0 {
                return Err(HoughStereoError::InvalidConfig {
                    reason: "neighborhood dimensions must be odd",
                });
            }
        }
        let value = match self.threshold {
            Threshold::Absolute(v) | Threshold::RelativeToMax(v) => v,
        };
        if !value.is_finite() {
            return Err(HoughStereoError::InvalidConfig {
                reason: "threshold must be finite",
            });
        }
        Ok(())
    }
}

/// Returns up to `cfg.max_peaks` peaks in descending vote order.
///
/// A cell with zero votes is never reported, so an empty accumulator yields
/// no peaks whatever the threshold.
pub fn hough_peaks(acc: ImageView<'_, u32>, cfg: &PeakConfig) -> Vec<Peak> {
    let (cols, rows) = acc.dims();
    let _span = trace_span!("hough_peaks", rows = rows, cols = cols).entered();

    let mut work: Vec<u32> = Vec::with_capacity(rows * cols);
    for line in acc.rows() {
        work.extend_from_slice(line);
    }

    let global_max = work.iter().copied().max().unwrap_or(0);
    let threshold = cfg.threshold.resolve(global_max);
    let nhood = cfg
        .neighborhood
        .map(|n| Neighborhood::new(n.height, n.width))
        .unwrap_or_else(|| Neighborhood::for_shape(rows, cols));
    let half_h = nhood.height / 2;
    let half_w = nhood.width / 2;

    let mut peaks = Vec::with_capacity(cfg.max_peaks.min(work.len()));
    while peaks.len() < cfg.max_peaks {
        let Some((idx, votes)) = argmax_first(&work) else {
            break;
        };
        if votes == 0 || f64::from(votes) < threshold {
            break;
        }
        let row = idx / cols;
        let col = idx % cols;
        peaks.push(Peak { row, col, votes });

        let r0 = row.saturating_sub(half_h);
        let r1 = (row + half_h).min(rows - 1);
        let c0 = col.saturating_sub(half_w);
        let c1 = (col + half_w).min(cols - 1);
        for r in r0..=r1 {
            work[r * cols + c0..=r * cols + c1].fill(0);
        }
    }

    trace_event!("peaks", count = peaks.len(), global_max = global_max);
    peaks
}

/// Row-major argmax keeping the first index among equal maxima.
fn argmax_first(values: &[u32]) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (idx, &value) in values.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((idx, value)),
        }
    }
    best
}
