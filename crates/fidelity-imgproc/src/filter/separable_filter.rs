use fidelity_image::{
    border::{clamp_index, kernel_offsets},
    Image, ImageError, ImageSize, SampleType,
};

use crate::{
    parallel::{for_each_row, ExecutionStrategy},
    plane::{store_plane, to_plane},
    validate::ensure_src_dst,
};

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// This struct borrows the kernels and caches their centered offsets.
struct SeparableFilter<'a> {
    kernel_x: &'a [f64],
    kernel_y: &'a [f64],
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
}

impl<'a> SeparableFilter<'a> {
    fn new(kernel_x: &'a [f64], kernel_y: &'a [f64]) -> Result<Self, ImageError> {
        if kernel_x.is_empty() || kernel_y.is_empty() {
            return Err(ImageError::InvalidKernelLength(
                kernel_x.len(),
                kernel_y.len(),
            ));
        }

        Ok(Self {
            kernel_x,
            kernel_y,
            offsets_x: kernel_offsets(kernel_x.len()),
            offsets_y: kernel_offsets(kernel_y.len()),
        })
    }

    /// Filter an interleaved plane with `channels` samples per pixel.
    ///
    /// Performs horizontal filtering followed by vertical filtering using a temporary buffer.
    /// Out of range neighbors are clamped to the border.
    fn apply(
        &self,
        src: &[f64],
        size: ImageSize,
        channels: usize,
        strategy: ExecutionStrategy,
    ) -> Vec<f64> {
        let cols = size.width;
        let rows = size.height;
        let row_len = cols * channels;
        let num_pixels = size.area();

        // horizontal pass
        let mut temp = vec![0.0f64; src.len()];
        for_each_row(&mut temp, row_len, num_pixels, strategy, |r, temp_row| {
            let src_row = &src[r * row_len..(r + 1) * row_len];
            for c in 0..cols {
                for ch in 0..channels {
                    let mut acc = 0.0;
                    for (&k, &off) in self.kernel_x.iter().zip(self.offsets_x.iter()) {
                        let x = clamp_index(c as isize + off, cols);
                        acc += src_row[x * channels + ch] * k;
                    }
                    temp_row[c * channels + ch] = acc;
                }
            }
        });

        // vertical pass
        let mut dst = vec![0.0f64; src.len()];
        for_each_row(&mut dst, row_len, num_pixels, strategy, |r, dst_row| {
            for (&k, &off) in self.kernel_y.iter().zip(self.offsets_y.iter()) {
                let y = clamp_index(r as isize + off, rows);
                let temp_row = &temp[y * row_len..(y + 1) * row_len];
                dst_row
                    .iter_mut()
                    .zip(temp_row.iter())
                    .for_each(|(d, &t)| *d += t * k);
            }
        });

        dst
    }
}

/// Apply a separable filter to an image.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
///
/// # Errors
///
/// Returns an error if `src` is empty, `dst` has a different size or a kernel is empty.
pub fn separable_filter<T: SampleType, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_x: &[f64],
    kernel_y: &[f64],
) -> Result<(), ImageError> {
    separable_filter_with_strategy(src, dst, kernel_x, kernel_y, ExecutionStrategy::default())
}

/// Apply a separable filter to an image with execution strategy control.
///
/// Same as [`separable_filter`] but rows are processed according to `strategy`.
/// The output does not depend on the strategy.
pub fn separable_filter_with_strategy<T: SampleType, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_x: &[f64],
    kernel_y: &[f64],
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    ensure_src_dst(src, dst)?;
    let filter = SeparableFilter::new(kernel_x, kernel_y)?;

    let filtered = filter.apply(&to_plane(src), src.size(), C, strategy);
    store_plane(&filtered, dst);

    Ok(())
}

/// Apply a separable filter to a raw interleaved `f64` plane.
///
/// Values are never clamped, so the result can hold intermediate quantities
/// such as squared samples or products of two images.
///
/// # Errors
///
/// Returns an error if the plane is empty, its length does not match
/// `size.area() * channels` or a kernel is empty.
pub fn separable_filter_plane(
    plane: &[f64],
    size: ImageSize,
    channels: usize,
    kernel_x: &[f64],
    kernel_y: &[f64],
    strategy: ExecutionStrategy,
) -> Result<Vec<f64>, ImageError> {
    if size.area() == 0 || channels == 0 {
        return Err(ImageError::EmptyImage);
    }

    if plane.len() != size.area() * channels {
        return Err(ImageError::InvalidChannelShape(
            plane.len(),
            size.area() * channels,
        ));
    }

    let filter = SeparableFilter::new(kernel_x, kernel_y)?;
    Ok(filter.apply(plane, size, channels, strategy))
}

/// Local weighted mean of every sample of a raw `f64` plane.
///
/// The same 1D `kernel` is applied on both axes, e.g. a gaussian window.
///
/// # Errors
///
/// See [`separable_filter_plane`].
pub fn weighted_local_average(
    plane: &[f64],
    size: ImageSize,
    channels: usize,
    kernel: &[f64],
) -> Result<Vec<f64>, ImageError> {
    separable_filter_plane(
        plane,
        size,
        channels,
        kernel,
        kernel,
        ExecutionStrategy::default(),
    )
}
