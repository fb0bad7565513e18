//! Renders detected lines and circles on top of a grayscale image.

use houghstereo::ImageView;
use image::{GrayImage, Rgb, RgbImage};

pub const LINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const CIRCLE_COLOR: Rgb<u8> = Rgb([255, 64, 64]);

/// Expands a grayscale view into an RGB canvas.
pub fn canvas_from_gray(view: ImageView<'_, u8>) -> Option<RgbImage> {
    let mut data = Vec::with_capacity(view.width() * view.height());
    for row in view.rows() {
        data.extend_from_slice(row);
    }
    let gray = GrayImage::from_raw(view.width() as u32, view.height() as u32, data)?;
    Some(image::DynamicImage::ImageLuma8(gray).to_rgb8())
}

/// Two `(row, col)` points on the line `x cos(theta) + y sin(theta) = rho`.
///
/// Near-vertical lines (`|theta| < 1`) and exactly horizontal lines are
/// spanned edge to edge. Otherwise the first point is the crossing with
/// column 0 and the second is the crossing with row 0, or with the bottom
/// row when the line passes above the origin.
pub fn line_endpoints(
    rho: f64,
    theta_deg: f64,
    width: usize,
    height: usize,
) -> ((f64, f64), (f64, f64)) {
    if theta_deg.abs() < 1.0 {
        return ((0.0, rho.floor()), (height as f64, rho.floor()));
    }
    if theta_deg == 90.0 {
        return ((rho.floor(), 0.0), (rho.floor(), width as f64));
    }
    let (sin, cos) = theta_deg.to_radians().sin_cos();
    let slope = -cos / sin;
    let intercept = rho / sin;
    let first = (intercept.floor(), 0.0);
    let second = if intercept < 0.0 {
        let h = height as f64;
        (h, ((h - intercept) / slope).floor())
    } else {
        (0.0, (-intercept / slope).floor())
    };
    (first, second)
}

/// Draws a segment between `(row, col)` points; pixels outside are skipped.
pub fn draw_segment(img: &mut RgbImage, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
    let (dr, dc) = (to.0 - from.0, to.1 - from.1);
    let steps = dr.abs().max(dc.abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        draw_dot(img, from.0 + t * dr, from.1 + t * dc, color);
    }
}

/// Draws a circle outline centered at `(row, col)`.
pub fn draw_circle(img: &mut RgbImage, center: (usize, usize), radius: usize, color: Rgb<u8>) {
    let r = radius as f64;
    let samples = (r * 8.0).ceil().max(8.0) as usize;
    for i in 0..samples {
        let theta = i as f64 / samples as f64 * std::f64::consts::TAU;
        let (sin, cos) = theta.sin_cos();
        draw_dot(img, center.0 as f64 + r * sin, center.1 as f64 + r * cos, color);
    }
}

fn draw_dot(img: &mut RgbImage, row: f64, col: f64, color: Rgb<u8>) {
    let ri = row.round() as i64;
    let ci = col.round() as i64;

    for dy in 0..=1 {
        for dx in 0..=1 {
            let (ny, nx) = (ri + dy, ci + dx);
            if nx < 0 || ny < 0 {
                continue;
            }
            let (ux, uy) = (nx as u32, ny as u32);
            if ux >= img.width() || uy >= img.height() {
                continue;
            }
            img.put_pixel(ux, uy, color);
        }
    }
}
