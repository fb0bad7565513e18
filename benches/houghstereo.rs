use houghstereo::{
    disparity_blocks, find_circles, hough_lines_acc, hough_peaks, CircleSearchConfig,
    DisparityConfig, ImageView, LineAccumulatorConfig, OwnedImage, PeakConfig,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn make_edges(width: usize, height: usize) -> OwnedImage<bool> {
    let mut data = vec![false; width * height];
    for x in 0..width {
        data[(height / 3) * width + x] = true;
        let y = x * height / width;
        data[y * width + x] = true;
    }
    for &(cy, cx, r) in &[(60.0f64, 70.0f64, 25.0f64), (150.0, 180.0, 40.0)] {
        for step in 0..1440 {
            let theta = (step as f64 / 4.0).to_radians();
            let y = (cy + r * theta.sin()).round() as usize;
            let x = (cx + r * theta.cos()).round() as usize;
            if y < height && x < width {
                data[y * width + x] = true;
            }
        }
    }
    OwnedImage::new(data, width, height).unwrap()
}

fn bench_hough(c: &mut Criterion) {
    let edges = make_edges(256, 256);
    let edge_view = edges.view();

    c.bench_function("hough_lines_acc_256", |b| {
        b.iter(|| black_box(hough_lines_acc(edge_view, &LineAccumulatorConfig::default()).unwrap()));
    });

    let lines = hough_lines_acc(edge_view, &LineAccumulatorConfig::default()).unwrap();
    c.bench_function("hough_peaks_lines", |b| {
        b.iter(|| black_box(hough_peaks(lines.accumulator.view(), &PeakConfig::default())));
    });

    let radii: Vec<usize> = (20..45).collect();
    c.bench_function("find_circles_25_radii", |b| {
        b.iter(|| {
            black_box(find_circles(edge_view, &radii, &CircleSearchConfig::default()).unwrap())
        });
    });

    if cfg!(feature = "rayon") {
        let cfg = CircleSearchConfig {
            parallel: true,
            ..CircleSearchConfig::default()
        };
        c.bench_function("find_circles_25_radii_parallel", |b| {
            b.iter(|| black_box(find_circles(edge_view, &radii, &cfg).unwrap()));
        });
    }
}

fn bench_disparity(c: &mut Criterion) {
    let (width, height) = (384, 288);
    let left = make_image(width, height);
    let mut right = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            right[y * width + x] = left[y * width + (x + 16) % width];
        }
    }
    let left_view = ImageView::from_slice(&left, width, height).unwrap();
    let right_view = ImageView::from_slice(&right, width, height).unwrap();

    c.bench_function("disparity_blocks_384x288", |b| {
        b.iter(|| {
            black_box(
                disparity_blocks(left_view, right_view, &DisparityConfig::default()).unwrap(),
            )
        });
    });

    if cfg!(feature = "rayon") {
        let cfg = DisparityConfig {
            parallel: true,
            ..DisparityConfig::default()
        };
        c.bench_function("disparity_blocks_384x288_parallel", |b| {
            b.iter(|| black_box(disparity_blocks(left_view, right_view, &cfg).unwrap()));
        });
    }
}

criterion_group!(benches, bench_hough, bench_disparity);
criterion_main!(benches);
