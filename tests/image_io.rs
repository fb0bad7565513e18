#![cfg(feature = "image-io")]

use houghstereo::io::{
    load_edge_map, load_gray_image, owned_from_dynamic_image, view_from_gray_image,
};
use houghstereo::{hough_lines_acc, HoughStereoError, LineAccumulatorConfig};
use image::{GrayImage, Luma, Rgb, RgbImage};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("houghstereo-{}-{name}", std::process::id()))
}

#[test]
fn edge_png_round_trips_to_boolean_map() {
    let mut img = GrayImage::new(12, 8);
    for x in 0..12 {
        img.put_pixel(x, 3, Luma([200]));
    }
    img.put_pixel(5, 6, Luma([1]));
    let path = temp_path("edges.png");
    img.save(&path).unwrap();

    let edges = load_edge_map(&path).unwrap();
    assert_eq!((edges.width(), edges.height()), (12, 8));
    assert_eq!(edges.data().iter().filter(|&&e| e).count(), 13);
    assert_eq!(edges.view().get(5, 6), Some(&true));

    let gray = load_gray_image(&path).unwrap();
    let thresholded = gray.to_edge_map(100);
    assert_eq!(thresholded.data().iter().filter(|&&e| e).count(), 12);

    let hough = hough_lines_acc(edges.view(), &LineAccumulatorConfig::default()).unwrap();
    assert_eq!(hough.accumulator.get(3, 179), Some(12));

    let _ = std::fs::remove_file(path);
}

#[test]
fn color_images_collapse_to_luma() {
    let mut rgb = RgbImage::new(4, 2);
    rgb.put_pixel(1, 1, Rgb([255, 255, 255]));
    let owned = owned_from_dynamic_image(&image::DynamicImage::ImageRgb8(rgb)).unwrap();
    assert_eq!(owned.data()[5], 255);
    assert_eq!(owned.data()[0], 0);

    let gray = GrayImage::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
    let view = view_from_gray_image(&gray).unwrap();
    assert_eq!(view.row(1), Some(&[4u8, 5, 6][..]));
}

#[test]
fn missing_file_reports_io_error() {
    let err = load_gray_image(temp_path("does-not-exist.png")).unwrap_err();
    assert!(matches!(err, HoughStereoError::ImageIo { .. }));
}
