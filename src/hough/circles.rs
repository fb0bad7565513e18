//! Circle voting for a single fixed radius.

use crate::hough::Accumulator;
use crate::image::EdgeMap;
use crate::trace::{trace_event, trace_span};
use crate::util::math::{linspace, round_half_even};
use crate::util::{HoughStereoError, HoughStereoResult};
use std::f64::consts::PI;

/// Rounded `(d_row, d_col)` center offsets sampled around a circle.
///
/// `ceil(2 * pi * radius) + 1` angles are taken over `[-pi, pi]`; both ends
/// are sampled, so the offset at angle pi appears twice.
pub(crate) fn circle_offsets(radius: usize) -> Vec<(i64, i64)> {
    let r = radius as f64;
    let count = (r * 2.0 * PI).ceil() as usize + 1;
    linspace(-PI, PI, count)
        .into_iter()
        .map(|theta| {
            let (sin, cos) = theta.sin_cos();
            (round_half_even(r * sin), round_half_even(r * cos))
        })
        .collect()
}

/// Builds an image-shaped accumulator of circle-center votes.
///
/// Every edge pixel votes for each sampled center at distance `radius`.
/// Centers falling outside the image are dropped.
pub fn hough_circles_acc(edges: EdgeMap<'_>, radius: usize) -> HoughStereoResult<Accumulator> {
    if radius == 0 {
        return Err(HoughStereoError::InvalidRadius { radius });
    }

    let (width, height) = edges.dims();
    let _span = trace_span!("hough_circles_acc", radius = radius).entered();

    let offsets = circle_offsets(radius);
    let mut accumulator = Accumulator::zeros(height, width)?;
    let (width_i, height_i) = (width as i64, height as i64);

    let mut dropped = 0usize;
    for (row, col) in edges.edge_points() {
        for &(d_row, d_col) in &offsets {
            let center_row = row as i64 + d_row;
            let center_col = col as i64 + d_col;
            if center_row < 0 || center_col < 0 || center_row >= height_i || center_col >= width_i
            {
                dropped += 1;
                continue;
            }
            accumulator.vote(center_row as usize, center_col as usize);
        }
    }

    trace_event!("circle_votes", radius = radius, dropped = dropped);
    Ok(accumulator)
}

#[cfg(test)]
mod tests {
    use super::{circle_offsets, hough_circles_acc};
    use crate::{HoughStereoError, ImageView};

    #[test]
    fn offsets_lie_on_the_radius() {
        let offsets = circle_offsets(5);
        assert_eq!(offsets.len(), 33);
        assert_eq!(offsets[0], (0, -5));
        assert_eq!(offsets[32], (0, -5));
        for (dr, dc) in offsets {
            let dist = ((dr * dr + dc * dc) as f64).sqrt();
            assert!((dist - 5.0).abs() <= 0.75, "offset ({dr}, {dc})");
        }
    }

    #[test]
    fn out_of_bounds_centers_are_dropped() {
        let mut edges = vec![false; 9 * 9];
        edges[0] = true;
        let view = ImageView::from_slice(&edges, 9, 9).unwrap();
        let acc = hough_circles_acc(view, 3).unwrap();
        assert_eq!(acc.rows(), 9);
        assert_eq!(acc.cols(), 9);
        // Only the quarter arc with non-negative offsets lands in the image.
        assert!(acc.total_votes() > 0);
        assert!(acc.total_votes() < circle_offsets(3).len() as u64);
        assert_eq!(acc.get(3, 0).map(|v| v > 0), Some(true));
    }

    #[test]
    fn zero_radius_is_rejected() {
        let edges = vec![true; 4];
        let view = ImageView::from_slice(&edges, 2, 2).unwrap();
        assert_eq!(
            hough_circles_acc(view, 0).unwrap_err(),
            HoughStereoError::InvalidRadius { radius: 0 }
        );
    }
}
