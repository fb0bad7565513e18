//! Circle search over a list of candidate radii.
//!
//! Each radius is handled independently: build its accumulator, take its
//! strongest peaks, tag them with the radius. Results are concatenated in
//! the order the radii were given. The same physical circle is commonly
//! reported at several neighbouring radii; no merging happens here, see
//! [`merge_circles`](crate::merge_circles) for an opt-in pass.

use crate::candidate::peaks::{hough_peaks, Neighborhood, Peak, PeakConfig, Threshold};
use crate::hough::hough_circles_acc;
use crate::image::EdgeMap;
use crate::trace::{trace_event, trace_span};
use crate::util::{HoughStereoError, HoughStereoResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Configuration for [`find_circles`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleSearchConfig {
    /// Peaks kept per radius.
    pub max_circles_per_radius: usize,
    /// Suppression window `(height, width)` applied to each accumulator.
    pub neighborhood: (usize, usize),
    /// Acceptance threshold as a fraction of each accumulator's maximum.
    pub threshold_ratio: f64,
    /// Process radii in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for CircleSearchConfig {
    fn default() -> Self {
        Self {
            max_circles_per_radius: 5,
            neighborhood: (41, 41),
            threshold_ratio: 0.7,
            parallel: false,
        }
    }
}

impl CircleSearchConfig {
    fn peak_config(&self) -> PeakConfig {
        PeakConfig {
            max_peaks: self.max_circles_per_radius,
            neighborhood: Some(Neighborhood::new(self.neighborhood.0, self.neighborhood.1)),
            threshold: Threshold::RelativeToMax(self.threshold_ratio),
        }
    }
}

/// Parallel sequences of detected circles.
///
/// Entry `i` of each vector describes the same detection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CircleDetections {
    /// Centers as `(row, col)`.
    pub centers: Vec<(usize, usize)>,
    /// Radius of each detection in pixels.
    pub radii: Vec<usize>,
    /// Accumulator votes at each center.
    pub votes: Vec<u32>,
}

impl CircleDetections {
    /// Number of detections.
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Returns true when nothing was detected.
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Appends a detection.
    pub fn push(&mut self, center: (usize, usize), radius: usize, votes: u32) {
        self.centers.push(center);
        self.radii.push(radius);
        self.votes.push(votes);
    }

    /// Iterates `(center, radius, votes)` triples.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), usize, u32)> + '_ {
        self.centers
            .iter()
            .zip(&self.radii)
            .zip(&self.votes)
            .map(|((&center, &radius), &votes)| (center, radius, votes))
    }
}

/// Finds circles of the given radii in a boolean edge map.
pub fn find_circles(
    edges: EdgeMap<'_>,
    radii: &[usize],
    cfg: &CircleSearchConfig,
) -> HoughStereoResult<CircleDetections> {
    if let Some(&radius) = radii.iter().find(|&&r| r == 0) {
        return Err(HoughStereoError::InvalidRadius { radius });
    }
    let peak_cfg = cfg.peak_config();
    peak_cfg.validate()?;

    let _span = trace_span!(
        "find_circles",
        radii = radii.len(),
        parallel = cfg.parallel
    )
    .entered();

    let per_radius = if cfg.parallel {
        search_radii_par(edges, radii, &peak_cfg)?
    } else {
        search_radii(edges, radii, &peak_cfg)?
    };

    let mut out = CircleDetections::default();
    for (&radius, peaks) in radii.iter().zip(per_radius) {
        for peak in peaks {
            out.push((peak.row, peak.col), radius, peak.votes);
        }
    }

    trace_event!("circles", count = out.len());
    Ok(out)
}

type RadiusPeaks = Vec<Peak>;

fn search_radius(
    edges: EdgeMap<'_>,
    radius: usize,
    peak_cfg: &PeakConfig,
) -> HoughStereoResult<RadiusPeaks> {
    let acc = hough_circles_acc(edges, radius)?;
    Ok(hough_peaks(acc.view(), peak_cfg))
}

fn search_radii(
    edges: EdgeMap<'_>,
    radii: &[usize],
    peak_cfg: &PeakConfig,
) -> HoughStereoResult<Vec<RadiusPeaks>> {
    radii
        .iter()
        .map(|&radius| search_radius(edges, radius, peak_cfg))
        .collect()
}

#[cfg(feature = "rayon")]
fn search_radii_par(
    edges: EdgeMap<'_>,
    radii: &[usize],
    peak_cfg: &PeakConfig,
) -> HoughStereoResult<Vec<RadiusPeaks>> {
    radii
        .par_iter()
        .map(|&radius| search_radius(edges, radius, peak_cfg))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn search_radii_par(
    edges: EdgeMap<'_>,
    radii: &[usize],
    peak_cfg: &PeakConfig,
) -> HoughStereoResult<Vec<RadiusPeaks>> {
    search_radii(edges, radii, peak_cfg)
}
