//! Image views and owned buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride,
//! indexed `(x, y)` = `(col, row)` with the origin at the top-left. The same
//! type backs grayscale inputs (`u8`), edge maps (`bool`), and vote
//! accumulators (`u32`). ROI views are zero-copy and retain the parent
//! stride, which is how the stereo engine cuts strips and blocks.

use crate::util::{HoughStereoError, HoughStereoResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed boolean edge map; `true` marks an edge pixel.
pub type EdgeMap<'a> = ImageView<'a, bool>;

/// Borrowed 2D image view with an explicit stride.
#[derive(Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

// Manual impls: a view is copyable whatever the pixel type.
impl<T> Clone for ImageView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ImageView<'_, T> {}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> HoughStereoResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> HoughStereoResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(HoughStereoError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Iterates over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + 'a {
        let view = *self;
        (0..self.height).filter_map(move |y| view.row(y))
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> HoughStereoResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(HoughStereoError::InvalidDimensions { width, height });
        }

        let out_of_bounds = HoughStereoError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .ok_or(HoughStereoError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self
            .data
            .get(start..)
            .ok_or(HoughStereoError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new(data, width, height, self.stride)
    }
}

impl<'a> ImageView<'a, bool> {
    /// Collects `(row, col)` coordinates of edge pixels in row-major order.
    pub fn edge_points(&self) -> Vec<(usize, usize)> {
        let mut points = Vec::new();
        for (y, row) in self.rows().enumerate() {
            for (x, &is_edge) in row.iter().enumerate() {
                if is_edge {
                    points.push((y, x));
                }
            }
        }
        points
    }
}

/// Owned contiguous image buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> OwnedImage<T> {
    /// Wraps a row-major buffer of exactly `width * height` elements.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> HoughStereoResult<Self> {
        if width == 0 || height == 0 {
            return Err(HoughStereoError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(HoughStereoError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(HoughStereoError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(HoughStereoError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns a borrowed view over the whole image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

impl<T: Clone> OwnedImage<T> {
    /// Creates an image filled with `value`.
    pub fn filled(width: usize, height: usize, value: T) -> HoughStereoResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(HoughStereoError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height)
    }
}

impl OwnedImage<u8> {
    /// Thresholds a grayscale image into an edge map (`value > threshold`).
    pub fn to_edge_map(&self, threshold: u8) -> OwnedImage<bool> {
        OwnedImage {
            data: self.data.iter().map(|&v| v > threshold).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> HoughStereoResult<usize> {
    if width == 0 || height == 0 {
        return Err(HoughStereoError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(HoughStereoError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(HoughStereoError::InvalidDimensions { width, height })
}
