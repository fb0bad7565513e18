use houghstereo::{Accumulator, HoughStereoError, ImageView, OwnedImage};

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = ImageView::from_slice(&data, 0, 1).err().unwrap();
    assert_eq!(
        err,
        HoughStereoError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = ImageView::from_slice(&data, 1, 0).err().unwrap();
    assert_eq!(
        err,
        HoughStereoError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn image_view_rejects_invalid_stride() {
    let data = [false; 8];

    let err = ImageView::new(&data, 4, 1, 3).err().unwrap();
    assert_eq!(
        err,
        HoughStereoError::InvalidStride {
            width: 4,
            stride: 3,
        }
    );
}

#[test]
fn image_view_rejects_small_buffer() {
    let data = [0u32; 3];

    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(err, HoughStereoError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn image_view_roi_matches_expected_values() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();
    assert_eq!(view.stride(), 4);

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.dims(), (2, 2));
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert_eq!(roi.get(0, 0).copied(), Some(5u8));
    assert!(roi.get(2, 0).is_none());

    let err = view.roi(3, 3, 2, 2).err().unwrap();
    assert_eq!(
        err,
        HoughStereoError::RoiOutOfBounds {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
            img_width: 4,
            img_height: 4,
        }
    );
}

#[test]
fn owned_image_requires_exact_length() {
    assert_eq!(
        OwnedImage::new(vec![0u8; 5], 2, 2).unwrap_err(),
        HoughStereoError::InvalidDimensions {
            width: 2,
            height: 2
        }
    );
    assert_eq!(
        OwnedImage::new(vec![0u8; 3], 2, 2).unwrap_err(),
        HoughStereoError::BufferTooSmall { needed: 4, got: 3 }
    );

    let img = OwnedImage::filled(3, 2, 7u8).unwrap();
    assert_eq!(img.view().row(1).unwrap(), &[7, 7, 7]);
}

#[test]
fn accumulator_view_is_row_major() {
    let acc = Accumulator::zeros(2, 3).unwrap();
    let view = acc.view();
    assert_eq!(view.width(), 3);
    assert_eq!(view.height(), 2);
    assert_eq!(acc.data().len(), 6);
}
