use fidelity_image::{border::kernel_offsets, Image, ImageError, SampleType};

use super::kernels::Kernel2d;
use crate::{
    parallel::{for_each_row, ExecutionStrategy},
    validate::ensure_src_dst,
};

/// Convolve an image with a dense 2D kernel.
///
/// Every output sample is the weighted sum of the `width × height` neighborhood
/// around it, read through the clamped border accessor. Channels are filtered
/// independently and the result is rounded and clamped into the sample domain.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The 2D kernel, anchored at its center.
///
/// # Errors
///
/// Returns an error if `src` is empty or `dst` has a different size.
pub fn filter2d<T: SampleType, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel2d,
) -> Result<(), ImageError> {
    filter2d_with_strategy(src, dst, kernel, ExecutionStrategy::default())
}

/// Convolve an image with a dense 2D kernel and an explicit execution strategy.
pub fn filter2d_with_strategy<T: SampleType, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel2d,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    ensure_src_dst(src, dst)?;

    let offsets_x = kernel_offsets(kernel.width());
    let offsets_y = kernel_offsets(kernel.height());
    let cols = src.cols();
    let num_pixels = src.size().area();

    for_each_row(dst.as_slice_mut(), cols * C, num_pixels, strategy, |r, dst_row| {
        for c in 0..cols {
            let mut acc = [0.0f64; C];
            let rows = kernel.weights().chunks(kernel.width());
            for (weights_row, &dy) in rows.zip(offsets_y.iter()) {
                for (&w, &dx) in weights_row.iter().zip(offsets_x.iter()) {
                    let neighbor = src.pixel_clamped(c as isize + dx, r as isize + dy);
                    for (a, &v) in acc.iter_mut().zip(neighbor.iter()) {
                        *a += w * v.as_f64();
                    }
                }
            }

            for (d, &a) in dst_row[c * C..(c + 1) * C].iter_mut().zip(acc.iter()) {
                *d = T::from_f64(a);
            }
        }
    });

    Ok(())
}
