//! Line voting in `(rho, theta)` space.
//!
//! Each edge pixel `(row, col)` votes once per theta for
//! `rho = col * cos(theta) + row * sin(theta)`. The rho axis covers
//! `0..=ceil(diagonal)` in steps of `rho_resolution`, so the rounded
//! `rho / rho_resolution` is used directly as the accumulator row and
//! `rhos[row]` gives the matching rho value back.
//!
//! Negative angles produce negative rho for pixels below the line through
//! the origin, and such votes have no bin. [`RhoPolicy`] decides what
//! happens to them.

use crate::candidate::peaks::Peak;
use crate::hough::{Accumulator, ThetaGrid};
use crate::image::EdgeMap;
use crate::trace::{trace_event, trace_span};
use crate::util::math::round_half_even;
use crate::util::{HoughStereoError, HoughStereoResult};

/// Handling of votes whose rho index falls outside the accumulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RhoPolicy {
    /// Drop the vote.
    #[default]
    Skip,
    /// Move the vote to the nearest valid rho bin.
    Clamp,
    /// Abort with [`HoughStereoError::RhoOutOfRange`].
    Reject,
}

/// Configuration for [`hough_lines_acc`].
#[derive(Clone, Debug)]
pub struct LineAccumulatorConfig {
    /// Candidate angles in degrees.
    pub thetas: ThetaGrid,
    /// Width of one rho bin in pixels; must be at least 1.
    pub rho_resolution: usize,
    /// What to do with out-of-range rho votes.
    pub rho_policy: RhoPolicy,
}

impl Default for LineAccumulatorConfig {
    fn default() -> Self {
        Self {
            thetas: ThetaGrid::default(),
            rho_resolution: 1,
            rho_policy: RhoPolicy::Skip,
        }
    }
}

/// Line accumulator together with the parameter values of its axes.
#[derive(Clone, Debug)]
pub struct LineHough {
    /// Votes indexed `(rho_idx, theta_idx)`.
    pub accumulator: Accumulator,
    /// Theta value (degrees) for each accumulator column.
    pub thetas_deg: Vec<f64>,
    /// Rho value (pixels) for each accumulator row.
    pub rhos: Vec<usize>,
}

impl LineHough {
    /// Returns `(rho, theta_deg)` for a peak found in this accumulator.
    pub fn line_at(&self, peak: &Peak) -> Option<(f64, f64)> {
        let rho = *self.rhos.get(peak.row)?;
        let theta = *self.thetas_deg.get(peak.col)?;
        Some((rho as f64, theta))
    }
}

/// Builds the `rho x theta` vote accumulator for a boolean edge map.
pub fn hough_lines_acc(
    edges: EdgeMap<'_>,
    cfg: &LineAccumulatorConfig,
) -> HoughStereoResult<LineHough> {
    if cfg.rho_resolution == 0 {
        return Err(HoughStereoError::InvalidConfig {
            reason: "rho_resolution must be >= 1",
        });
    }
    if cfg.thetas.is_empty() {
        return Err(HoughStereoError::InvalidConfig {
            reason: "theta grid must contain at least one angle",
        });
    }

    let (width, height) = edges.dims();
    let diagonal = ((height * height + width * width) as f64).sqrt().ceil() as usize;
    let num_rho_bins = diagonal / cfg.rho_resolution + 1;
    let num_thetas = cfg.thetas.len();

    let _span = trace_span!(
        "hough_lines_acc",
        width = width,
        height = height,
        rho_bins = num_rho_bins,
        thetas = num_thetas
    )
    .entered();

    let mut accumulator = Accumulator::zeros(num_rho_bins, num_thetas)?;
    let trig = cfg.thetas.trig_table();
    let resolution = cfg.rho_resolution as f64;
    let last_bin = (num_rho_bins - 1) as i64;

    let mut edge_count = 0usize;
    let mut out_of_range = 0usize;
    for (row, line) in edges.rows().enumerate() {
        for (col, _) in line.iter().enumerate().filter(|&(_, &is_edge)| is_edge) {
            edge_count += 1;
            for (theta_idx, &(cos, sin)) in trig.iter().enumerate() {
                let rho = col as f64 * cos + row as f64 * sin;
                let rho_idx = round_half_even(rho / resolution);
                let bin = if (0..=last_bin).contains(&rho_idx) {
                    rho_idx
                } else {
                    out_of_range += 1;
                    match cfg.rho_policy {
                        RhoPolicy::Skip => continue,
                        RhoPolicy::Clamp => rho_idx.clamp(0, last_bin),
                        RhoPolicy::Reject => {
                            return Err(HoughStereoError::RhoOutOfRange {
                                row,
                                col,
                                theta_idx,
                                rho_idx,
                                bins: num_rho_bins,
                            })
                        }
                    }
                };
                accumulator.vote(bin as usize, theta_idx);
            }
        }
    }

    trace_event!(
        "line_votes",
        edge_pixels = edge_count,
        out_of_range = out_of_range
    );

    Ok(LineHough {
        accumulator,
        thetas_deg: cfg.thetas.as_slice().to_vec(),
        rhos: (0..num_rho_bins).map(|i| i * cfg.rho_resolution).collect(),
    })
}
