//! Loaders built on the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Decoding and color
//! collapse happen here so the voting and matching code only ever sees
//! single-channel buffers.

use crate::image::{ImageView, OwnedImage};
use crate::util::{HoughStereoError, HoughStereoResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> HoughStereoResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates an owned grayscale image from a dynamic image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> HoughStereoResult<OwnedImage<u8>> {
    let gray = img.to_luma8();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    OwnedImage::new(gray.into_raw(), width, height)
}

/// Loads an image from disk and collapses it to grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> HoughStereoResult<OwnedImage<u8>> {
    let img = image::open(path).map_err(|err| HoughStereoError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Loads a precomputed edge image; any luma value above zero is an edge.
pub fn load_edge_map<P: AsRef<Path>>(path: P) -> HoughStereoResult<OwnedImage<bool>> {
    Ok(load_gray_image(path)?.to_edge_map(0))
}
