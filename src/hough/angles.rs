//! Theta axis of the line accumulator.

use crate::util::math::{linspace, sin_cos_deg};
use crate::util::{HoughStereoError, HoughStereoResult};

/// Ordered list of candidate line-normal angles in degrees.
///
/// Never empty and never contains non-finite values.
#[derive(Clone, Debug, PartialEq)]
pub struct ThetaGrid {
    thetas_deg: Vec<f64>,
}

impl Default for ThetaGrid {
    /// 180 angles evenly spaced over `[-89, 90]`, i.e. one-degree steps.
    fn default() -> Self {
        Self {
            thetas_deg: linspace(-89.0, 90.0, 180),
        }
    }
}

impl ThetaGrid {
    /// Creates `count` angles evenly spaced over the closed range
    /// `[start_deg, stop_deg]`.
    pub fn linspace(start_deg: f64, stop_deg: f64, count: usize) -> HoughStereoResult<Self> {
        if !start_deg.is_finite() || !stop_deg.is_finite() {
            return Err(HoughStereoError::InvalidConfig {
                reason: "non-finite theta range",
            });
        }
        if count == 0 {
            return Err(HoughStereoError::InvalidConfig {
                reason: "theta grid must contain at least one angle",
            });
        }
        Ok(Self {
            thetas_deg: linspace(start_deg, stop_deg, count),
        })
    }

    /// Wraps an explicit angle list, kept in the given order.
    pub fn from_degrees(thetas_deg: Vec<f64>) -> HoughStereoResult<Self> {
        if thetas_deg.is_empty() {
            return Err(HoughStereoError::InvalidConfig {
                reason: "theta grid must contain at least one angle",
            });
        }
        if thetas_deg.iter().any(|t| !t.is_finite()) {
            return Err(HoughStereoError::InvalidConfig {
                reason: "non-finite theta value",
            });
        }
        Ok(Self { thetas_deg })
    }

    /// Returns the number of angles.
    pub fn len(&self) -> usize {
        self.thetas_deg.len()
    }

    /// Always false for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.thetas_deg.is_empty()
    }

    /// Returns the angle at `idx` in degrees.
    pub fn angle_at(&self, idx: usize) -> Option<f64> {
        self.thetas_deg.get(idx).copied()
    }

    /// Returns the angles in degrees.
    pub fn as_slice(&self) -> &[f64] {
        &self.thetas_deg
    }

    /// Returns the index whose angle is closest to `angle_deg`.
    pub fn nearest_index(&self, angle_deg: f64) -> usize {
        let mut best_idx = 0usize;
        let mut best_dist = f64::INFINITY;
        for (idx, &angle) in self.thetas_deg.iter().enumerate() {
            let dist = (angle - angle_deg).abs();
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }
        best_idx
    }

    /// `(cos, sin)` per angle, evaluated once per accumulator build.
    pub(crate) fn trig_table(&self) -> Vec<(f64, f64)> {
        self.thetas_deg
            .iter()
            .map(|&theta| {
                let (sin, cos) = sin_cos_deg(theta);
                (cos, sin)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ThetaGrid;
    use crate::HoughStereoError;

    #[test]
    fn default_grid_spans_minus_89_to_90() {
        let grid = ThetaGrid::default();
        assert_eq!(grid.len(), 180);
        assert_eq!(grid.angle_at(0), Some(-89.0));
        assert_eq!(grid.angle_at(179), Some(90.0));
        assert_eq!(grid.nearest_index(0.2), 89);
    }

    #[test]
    fn rejects_empty_and_non_finite_lists() {
        assert_eq!(
            ThetaGrid::from_degrees(Vec::new()).unwrap_err(),
            HoughStereoError::InvalidConfig {
                reason: "theta grid must contain at least one angle"
            }
        );
        assert!(ThetaGrid::from_degrees(vec![0.0, f64::NAN]).is_err());
        assert!(ThetaGrid::linspace(0.0, 90.0, 0).is_err());
    }
}
