//! Opt-in merging of circle detections across radii.

use crate::search::circles::CircleDetections;

/// Greedy suppression of near-duplicate circles.
///
/// Detections are visited by descending votes (ties keep their original
/// order). A detection is dropped when an already kept one lies within
/// `center_radius` in Chebyshev distance and within `radius_tolerance` in
/// radius. The result is ordered by descending votes.
pub fn merge_circles(
    detections: &CircleDetections,
    center_radius: usize,
    radius_tolerance: usize,
) -> CircleDetections {
    let mut order: Vec<usize> = (0..detections.len()).collect();
    order.sort_by(|&a, &b| detections.votes[b].cmp(&detections.votes[a]));

    let mut kept: Vec<usize> = Vec::new();
    'outer: for idx in order {
        let (row, col) = detections.centers[idx];
        let radius = detections.radii[idx];
        for &k in kept.iter() {
            let (k_row, k_col) = detections.centers[k];
            let d_row = row.max(k_row) - row.min(k_row);
            let d_col = col.max(k_col) - col.min(k_col);
            let d_radius = radius.max(detections.radii[k]) - radius.min(detections.radii[k]);
            if d_row.max(d_col) <= center_radius && d_radius <= radius_tolerance {
                continue 'outer;
            }
        }
        kept.push(idx);
    }

    let mut out = CircleDetections::default();
    for idx in kept {
        out.push(
            detections.centers[idx],
            detections.radii[idx],
            detections.votes[idx],
        );
    }
    out
}
