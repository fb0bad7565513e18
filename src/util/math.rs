//! Numeric helpers shared by the voting stages.

/// Computes sine and cosine for an angle in degrees.
pub(crate) fn sin_cos_deg(angle_deg: f64) -> (f64, f64) {
    angle_deg.to_radians().sin_cos()
}

/// Rounds to the nearest integer, resolving exact halves to the even neighbour.
pub(crate) fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Returns `count` evenly spaced samples over the closed range `[start, stop]`.
///
/// The last sample is exactly `stop`; a single sample yields `[start]`.
pub(crate) fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut out: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            out[count - 1] = stop;
            out
        }
    }
}
